use hashbrown::HashSet;

use super::{Edge, Triangle, Vertex};
use crate::Point2;

/// A read-only snapshot of a single insertion step.
///
/// Passed to [InsertionObserver] at each checkpoint of an insertion. Fields that have not been
/// computed yet at a checkpoint are empty.
#[derive(Debug, Clone, Copy)]
pub struct InsertionStep<'a> {
    /// The vertex that is being inserted.
    pub vertex: Vertex,
    pub(crate) mesh: &'a HashSet<Triangle>,
    /// Every triangle whose circumcircle contains the inserted vertex.
    pub bad_triangles: &'a [Triangle],
    /// The edges outlining the cavity left by removing the bad triangles.
    pub boundary: &'a [Edge],
    /// The triangles that connect the boundary to the inserted vertex.
    pub new_triangles: &'a [Triangle],
}

impl<'a> InsertionStep<'a> {
    /// Returns the inserted position.
    pub fn position(&self) -> Point2<f64> {
        self.vertex.position
    }

    /// Returns the triangles of the mesh in arbitrary order.
    ///
    /// This includes the triangles adjacent to the super triangle.
    pub fn triangles(&self) -> impl Iterator<Item = &'a Triangle> + 'a {
        let mesh = self.mesh;
        mesh.iter()
    }

    /// Returns the number of triangles of the mesh.
    pub fn num_triangles(&self) -> usize {
        self.mesh.len()
    }

    /// Returns `true` if `triangle` is currently part of the mesh.
    pub fn contains_triangle(&self, triangle: &Triangle) -> bool {
        self.mesh.contains(triangle)
    }
}

/// A triangle whose vertices turned out collinear during retriangulation.
///
/// This is not an error: the triangle is kept in the mesh but has no circumcircle. It is never
/// considered bad and never contributes a Voronoi vertex.
#[derive(Debug, Clone, Copy)]
pub struct CollinearTripleWarning {
    /// The offending triangle.
    pub triangle: Triangle,
}

/// Receives notifications at well defined checkpoints of a Bowyer-Watson run.
///
/// All methods have an empty default implementation. Observers cannot modify the triangulation,
/// they only see immutable snapshots. This can be used to e.g. render intermediate states.
///
/// # Example
/// ```
/// use delaunay_dual::{DelaunayTriangulation, InsertionObserver, InsertionStep, Point2, TriangulationParameters};
///
/// #[derive(Default)]
/// struct CavitySizes(Vec<usize>);
///
/// impl InsertionObserver for CavitySizes {
///     fn cavity_boundary_extracted(&mut self, step: &InsertionStep) {
///         self.0.push(step.boundary.len());
///     }
/// }
///
/// # fn main() -> Result<(), delaunay_dual::TriangulationError> {
/// let mut sizes = CavitySizes::default();
/// let points = [Point2::new(0.0, 0.0), Point2::new(4.0, 0.0), Point2::new(0.0, 4.0)];
/// DelaunayTriangulation::with_observer(points, &TriangulationParameters::new(), &mut sizes)?;
///
/// // The first vertex is inserted into the super triangle
/// assert_eq!(sizes.0[0], 3);
/// assert_eq!(sizes.0.len(), 3);
/// # Ok(()) }
/// ```
pub trait InsertionObserver {
    /// Notifies the observer that the super triangle has been created.
    fn super_triangle_created(&mut self, _super_triangle: &Triangle) {}

    /// Notifies the observer that all bad triangles of an insertion have been found.
    fn bad_triangles_found(&mut self, _step: &InsertionStep) {}

    /// Notifies the observer that the cavity boundary of an insertion has been extracted.
    fn cavity_boundary_extracted(&mut self, _step: &InsertionStep) {}

    /// Notifies the observer that the cavity has been filled with new triangles.
    fn cavity_retriangulated(&mut self, _step: &InsertionStep) {}

    /// Notifies the observer that a newly created triangle has collinear vertices.
    fn collinear_triangle(&mut self, _warning: &CollinearTripleWarning) {}

    /// Notifies the observer that all triangles adjacent to the super triangle have been removed.
    fn finalized(&mut self, _triangles: &[Triangle]) {}
}

/// An observer that ignores all notifications.
#[derive(Default, Debug, Clone, Copy)]
pub struct NoObserver;

impl InsertionObserver for NoObserver {}

impl<T: InsertionObserver + ?Sized> InsertionObserver for &mut T {
    fn super_triangle_created(&mut self, super_triangle: &Triangle) {
        (**self).super_triangle_created(super_triangle)
    }

    fn bad_triangles_found(&mut self, step: &InsertionStep) {
        (**self).bad_triangles_found(step)
    }

    fn cavity_boundary_extracted(&mut self, step: &InsertionStep) {
        (**self).cavity_boundary_extracted(step)
    }

    fn cavity_retriangulated(&mut self, step: &InsertionStep) {
        (**self).cavity_retriangulated(step)
    }

    fn collinear_triangle(&mut self, warning: &CollinearTripleWarning) {
        (**self).collinear_triangle(warning)
    }

    fn finalized(&mut self, triangles: &[Triangle]) {
        (**self).finalized(triangles)
    }
}
