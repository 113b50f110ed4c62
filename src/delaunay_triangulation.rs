use std::{error::Error, fmt::Display};

use hashbrown::{HashMap, HashSet};

use crate::delaunay_core::bowyer_watson::Mesh;
use crate::delaunay_core::math;
use crate::{
    validate_vertex, CoordNum, Edge, FixedVertexHandle, HasPosition, InsertionError, InsertionObserver,
    NoObserver, Point2, Triangle, TriangulationParameters, Vertex,
};

/// The input point set does not allow to build a triangulation.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum DegenerateInputError {
    /// Fewer than three input points were given.
    TooFewPoints {
        /// The number of input points.
        found: usize,
    },

    /// All input points lie on a single line.
    ///
    /// Also returned if no triangle of the final triangulation has a circumcircle, i.e. all
    /// points are collinear within the configured epsilon.
    AllCollinear,
}

impl Display for DegenerateInputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DegenerateInputError::TooFewPoints { found } => {
                write!(f, "at least 3 points are required, found {}", found)
            }
            DegenerateInputError::AllCollinear => f.write_str("all points are collinear"),
        }
    }
}

impl Error for DegenerateInputError {}

/// The error type returned when creating a [DelaunayTriangulation].
#[derive(Copy, Clone, PartialEq, Eq, Debug, Hash)]
pub enum TriangulationError {
    /// The input point set is degenerate.
    DegenerateInput(DegenerateInputError),

    /// An input coordinate is invalid, see [crate::validate_coordinate].
    InvalidCoordinate(InsertionError),
}

impl TriangulationError {
    /// Returns `true` if this error was caused by a degenerate input point set.
    pub fn is_degenerate_input(&self) -> bool {
        matches!(self, TriangulationError::DegenerateInput(_))
    }
}

impl Display for TriangulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TriangulationError::DegenerateInput(error) => write!(f, "degenerate input: {}", error),
            TriangulationError::InvalidCoordinate(error) => {
                write!(f, "invalid coordinate: {}", error)
            }
        }
    }
}

impl Error for TriangulationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TriangulationError::DegenerateInput(error) => Some(error),
            TriangulationError::InvalidCoordinate(error) => Some(error),
        }
    }
}

impl From<DegenerateInputError> for TriangulationError {
    fn from(error: DegenerateInputError) -> Self {
        TriangulationError::DegenerateInput(error)
    }
}

impl From<InsertionError> for TriangulationError {
    fn from(error: InsertionError) -> Self {
        TriangulationError::InvalidCoordinate(error)
    }
}

/// Summarizes a Bowyer-Watson run.
///
/// Gathered once at the end of the run, see [DelaunayTriangulation::stats].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TriangulationStats {
    /// The number of input sites, including duplicates.
    pub num_sites: usize,
    /// The number of distinct input sites.
    pub num_vertices: usize,
    /// The number of input sites that were merged into an earlier site with the same position.
    pub duplicates_merged: usize,
    /// The number of triangles of the final triangulation.
    pub num_triangles: usize,
    /// The number of triangles of the final triangulation without a circumcircle.
    pub collinear_triangles: usize,
    /// The number of distinct sites that are not a vertex of any triangle.
    ///
    /// This is zero unless the super triangle interfered with the input, see
    /// [DelaunayTriangulation](DelaunayTriangulation#incomplete-triangulations).
    pub sites_not_triangulated: usize,
    /// The number of triangles created with collinear vertices during the run, including
    /// those removed later on.
    pub collinear_triangles_created: usize,
    /// The number of bad triangles removed during all insertions.
    pub bad_triangles_removed: usize,
    /// The number of triangles created during all insertions.
    pub triangles_created: usize,
}

/// A two dimensional [Delaunay triangulation](https://en.wikipedia.org/wiki/Delaunay_triangulation)
/// created by the incremental Bowyer-Watson algorithm.
///
/// No input site lies strictly inside the circumcircle of any triangle, with the exception
/// described in [Incomplete triangulations](#incomplete-triangulations). Sites lying exactly on
/// a circumcircle (e.g. the corners of a square) do not count as inside, which decides how
/// cocircular sites are triangulated.
///
/// A triangulation is created once from all sites and is immutable afterwards. Its dual graph,
/// the [Voronoi diagram](crate::VoronoiDiagram), can be extracted with
/// [voronoi_diagram](Self::voronoi_diagram).
///
/// # Example
/// ```
/// use delaunay_dual::{triangulate, Point2};
///
/// # fn main() -> Result<(), delaunay_dual::TriangulationError> {
/// let triangulation = triangulate([
///     Point2::new(0.0, 0.0),
///     Point2::new(2.0, 0.0),
///     Point2::new(2.0, 2.0),
///     Point2::new(0.0, 2.0),
/// ])?;
///
/// assert_eq!(triangulation.num_vertices(), 4);
/// assert_eq!(triangulation.num_triangles(), 2);
///
/// for triangle in triangulation.triangles() {
///     println!("triangle: {:?}", triangle.positions());
/// }
/// # Ok(()) }
/// ```
///
/// # Duplicate sites
/// Sites with exactly the same position are merged into the vertex of their first occurrence.
/// The number of merged sites is reported by [TriangulationStats::duplicates_merged].
///
/// # Incomplete triangulations
/// The super triangle has a finite size. For very thin or nearly cocircular inputs, a triangle
/// that connects hull sites can lose against a triangle using a super vertex. Removing the super
/// triangle afterwards then leaves sites that are not part of any triangle, and triangles at the
/// hull may not be locally Delaunay. Such a triangulation is still returned. The affected sites
/// are counted in [TriangulationStats::sites_not_triangulated], a warning is logged and
/// [is_complete](Self::is_complete) returns `false`. A larger
/// [super triangle scale](TriangulationParameters::with_super_triangle_scale) makes this less
/// likely.
#[derive(Debug, Clone)]
pub struct DelaunayTriangulation {
    vertices: Vec<Point2<f64>>,
    vertex_lookup: HashMap<(u64, u64), FixedVertexHandle>,
    triangles: Vec<Triangle>,
    super_vertices: [Vertex; 3],
    stats: TriangulationStats,
}

/// Creates the Delaunay triangulation of a set of sites using default parameters.
///
/// Fails with [DegenerateInputError] if fewer than three sites are given or all sites are
/// collinear, or with [InsertionError] if a coordinate is invalid.
///
/// *See also [DelaunayTriangulation::with_parameters]*
pub fn triangulate<V, I>(vertices: I) -> Result<DelaunayTriangulation, TriangulationError>
where
    V: HasPosition,
    I: IntoIterator<Item = V>,
{
    DelaunayTriangulation::with_parameters(vertices, &TriangulationParameters::default())
}

impl DelaunayTriangulation {
    /// Creates the Delaunay triangulation of a set of sites.
    ///
    /// Sites are inserted in iteration order.
    pub fn with_parameters<V, I>(
        vertices: I,
        parameters: &TriangulationParameters,
    ) -> Result<Self, TriangulationError>
    where
        V: HasPosition,
        I: IntoIterator<Item = V>,
    {
        Self::with_observer(vertices, parameters, &mut NoObserver)
    }

    /// Creates the Delaunay triangulation of a set of sites and reports each step to `observer`.
    ///
    /// The observer is not notified at all if the input is rejected before the first insertion.
    pub fn with_observer<V, I, O>(
        vertices: I,
        parameters: &TriangulationParameters,
        observer: &mut O,
    ) -> Result<Self, TriangulationError>
    where
        V: HasPosition,
        I: IntoIterator<Item = V>,
        O: InsertionObserver,
    {
        let mut num_sites = 0;
        let mut positions = Vec::new();
        let mut vertex_lookup = HashMap::new();

        for vertex in vertices {
            num_sites += 1;
            validate_vertex(&vertex)?;
            let position = vertex.position().to_f64();
            let handle = FixedVertexHandle::new(positions.len());
            if let hashbrown::hash_map::Entry::Vacant(entry) =
                vertex_lookup.entry(position.bit_key())
            {
                entry.insert(handle);
                positions.push(position);
            } else {
                tracing::debug!("Merging duplicate site {:?}", position);
            }
        }

        if num_sites < 3 {
            return Err(DegenerateInputError::TooFewPoints { found: num_sites }.into());
        }

        if math::all_collinear(&positions) {
            return Err(DegenerateInputError::AllCollinear.into());
        }

        tracing::debug!(
            "Triangulating {} sites ({} distinct)",
            num_sites,
            positions.len()
        );

        let mut mesh = Mesh::new(&positions, parameters, &mut *observer);
        for (index, position) in positions.iter().enumerate() {
            let vertex = Vertex {
                handle: FixedVertexHandle::new(index),
                position: *position,
            };
            mesh.insert(vertex, &mut *observer);
        }

        let counters = mesh.counters();
        let super_vertices = mesh.super_vertices();
        let triangles = mesh.finalize(&mut *observer);

        let collinear_triangles = triangles.iter().filter(|t| t.is_collinear()).count();
        if collinear_triangles == triangles.len() {
            return Err(DegenerateInputError::AllCollinear.into());
        }

        let mut triangulated = vec![false; positions.len()];
        for triangle in &triangles {
            for handle in triangle.handles() {
                triangulated[handle.index()] = true;
            }
        }
        let sites_not_triangulated = triangulated.iter().filter(|used| !**used).count();

        let stats = TriangulationStats {
            num_sites,
            num_vertices: positions.len(),
            duplicates_merged: num_sites - positions.len(),
            num_triangles: triangles.len(),
            collinear_triangles,
            sites_not_triangulated,
            collinear_triangles_created: counters.collinear_triangles_created,
            bad_triangles_removed: counters.bad_triangles_removed,
            triangles_created: counters.triangles_created,
        };

        if stats.collinear_triangles_created > 0 {
            tracing::warn!(
                "{} collinear triangles were created, {} remain in the triangulation",
                stats.collinear_triangles_created,
                stats.collinear_triangles
            );
        }
        if stats.sites_not_triangulated > 0 {
            tracing::warn!(
                "{} of {} sites are not part of any triangle, consider a larger super triangle",
                stats.sites_not_triangulated,
                stats.num_vertices
            );
        }
        tracing::debug!("Triangulation finished: {:?}", stats);

        Ok(Self {
            vertices: positions,
            vertex_lookup,
            triangles,
            super_vertices,
            stats,
        })
    }

    /// Returns the positions of all distinct input sites.
    ///
    /// The position of a vertex with handle `h` is located at index `h.index()`.
    pub fn vertices(&self) -> &[Point2<f64>] {
        &self.vertices
    }

    /// Returns the handles of all vertices in ascending order.
    pub fn fixed_vertices(&self) -> impl Iterator<Item = FixedVertexHandle> + '_ {
        (0..self.vertices.len()).map(FixedVertexHandle::new)
    }

    /// Returns the position of a vertex.
    ///
    /// # Panics
    /// Panics if the handle does not belong to this triangulation.
    pub fn vertex(&self, handle: FixedVertexHandle) -> Point2<f64> {
        self.vertices[handle.index()]
    }

    /// Returns the handle of the vertex at exactly `position`, if any.
    pub fn locate_vertex<S: CoordNum>(
        &self,
        position: Point2<S>,
    ) -> Option<FixedVertexHandle> {
        let position = position.to_f64();
        if position.x.is_nan() || position.y.is_nan() {
            return None;
        }
        self.vertex_lookup.get(&position.bit_key()).copied()
    }

    /// Returns `true` if a vertex is located at exactly `position`.
    pub fn contains_vertex<S: CoordNum>(&self, position: Point2<S>) -> bool {
        self.locate_vertex(position).is_some()
    }

    /// Returns all triangles in canonical order.
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// Returns all undirected edges of the triangulation.
    ///
    /// Each edge is returned once, in order of first occurrence when iterating through
    /// [triangles](Self::triangles).
    pub fn edges(&self) -> Vec<Edge> {
        let mut seen = HashSet::with_capacity(self.triangles.len() * 2);
        self.triangles
            .iter()
            .flat_map(|triangle| triangle.edges())
            .filter(|edge| seen.insert(*edge))
            .collect()
    }

    /// Returns the number of distinct input sites.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// Returns the positions of the super triangle's vertices used during construction.
    ///
    /// None of these is part of any triangle.
    pub fn super_vertices(&self) -> [Point2<f64>; 3] {
        self.super_vertices.map(|v| v.position)
    }

    /// Returns a summary of the run that created this triangulation.
    pub fn stats(&self) -> TriangulationStats {
        self.stats
    }

    /// Returns `true` if every distinct site is a vertex of at least one triangle.
    ///
    /// *See also [TriangulationStats::sites_not_triangulated]*
    pub fn is_complete(&self) -> bool {
        self.stats.sites_not_triangulated == 0
    }

    /// Checks the invariants that hold for every triangulation and panics if any of them is
    /// violated.
    #[doc(hidden)]
    pub fn sanity_check(&self) {
        let mut used = vec![false; self.vertices.len()];
        let mut unique = HashSet::new();

        for window in self.triangles.windows(2) {
            assert!(window[0].cmp_canonical(&window[1]).is_lt());
        }

        for triangle in &self.triangles {
            assert!(unique.insert(*triangle));
            for vertex in triangle.vertices() {
                assert!(vertex.handle.index() < self.vertices.len());
                assert_eq!(self.vertices[vertex.handle.index()], vertex.position);
                used[vertex.handle.index()] = true;
            }
            for s in &self.super_vertices {
                assert!(!triangle.has_vertex(s.handle));
            }
        }

        assert!(self.triangles.iter().any(|t| !t.is_collinear()));
        assert_eq!(
            used.iter().filter(|used| !**used).count(),
            self.stats.sites_not_triangulated
        );
        assert_eq!(
            self.stats.collinear_triangles,
            self.triangles.iter().filter(|t| t.is_collinear()).count()
        );
        assert_eq!(self.stats.num_triangles, self.triangles.len());
        assert_eq!(self.stats.num_vertices, self.vertices.len());
        assert_eq!(
            self.stats.num_sites,
            self.stats.num_vertices + self.stats.duplicates_merged
        );
    }

    /// Additionally checks completeness, that every edge is shared by at most two triangles
    /// and the Delaunay property. Only guaranteed for inputs without super triangle
    /// interference.
    #[doc(hidden)]
    pub fn sanity_check_delaunay(&self) {
        self.sanity_check();
        assert!(self.is_complete(), "Vertex is not part of any triangle");

        let mut incident: HashMap<Edge, usize> = HashMap::new();
        for triangle in &self.triangles {
            for edge in triangle.edges() {
                *incident.entry(edge).or_default() += 1;
            }
            for (index, position) in self.vertices.iter().enumerate() {
                if !triangle.has_vertex(FixedVertexHandle::new(index)) {
                    assert!(
                        !triangle.circumcircle_contains(*position),
                        "Vertex {:?} lies inside the circumcircle of {:?}",
                        position,
                        triangle.positions()
                    );
                }
            }
        }
        assert!(incident.values().all(|count| *count <= 2));
    }
}
