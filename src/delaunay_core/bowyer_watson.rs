use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;

use super::{
    CollinearTripleWarning, Edge, FixedVertexHandle, InsertionObserver, InsertionStep, Triangle,
    TriangulationParameters, Vertex,
};
use crate::Point2;

/// Operation counters gathered during a single run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RunCounters {
    pub bad_triangles_removed: usize,
    pub triangles_created: usize,
    pub collinear_triangles_created: usize,
}

/// Calculates the vertices of a triangle that strictly contains the bounding box of `positions`.
///
/// `positions` must not be empty.
pub(crate) fn super_triangle_positions(positions: &[Point2<f64>], scale: f64) -> [Point2<f64>; 3] {
    let mut min = positions[0];
    let mut max = positions[0];
    for position in &positions[1..] {
        min = Point2::new(min.x.min(position.x), min.y.min(position.y));
        max = Point2::new(max.x.max(position.x), max.y.max(position.y));
    }

    let delta_max = (max.x - min.x).max(max.y - min.y);
    let mid_x = (min.x + max.x) / 2.0;
    let mid_y = (min.y + max.y) / 2.0;

    [
        Point2::new(
            mid_x - scale * delta_max,
            mid_y - scale / 2.0 * delta_max,
        ),
        Point2::new(
            mid_x + scale * delta_max,
            mid_y - scale / 2.0 * delta_max,
        ),
        Point2::new(mid_x, mid_y + scale * delta_max),
    ]
}

/// The mutable state of a Bowyer-Watson run: a set of triangles that starts out as the single
/// super triangle.
pub(crate) struct Mesh {
    triangles: HashSet<Triangle>,
    super_vertices: [Vertex; 3],
    epsilon: f64,
    counters: RunCounters,
}

impl Mesh {
    /// Creates a mesh whose super triangle contains all of `positions`.
    ///
    /// The super vertices receive the handles following the last input vertex.
    pub(crate) fn new(
        positions: &[Point2<f64>],
        parameters: &TriangulationParameters,
        observer: &mut impl InsertionObserver,
    ) -> Self {
        let super_positions =
            super_triangle_positions(positions, parameters.super_triangle_scale());
        let super_vertices = [0, 1, 2].map(|offset| Vertex {
            handle: FixedVertexHandle::new(positions.len() + offset),
            position: super_positions[offset],
        });
        let [s0, s1, s2] = super_vertices;
        let epsilon = parameters.collinear_epsilon();
        let super_triangle = Triangle::new(s0, s1, s2, epsilon);
        observer.super_triangle_created(&super_triangle);

        let mut triangles = HashSet::new();
        triangles.insert(super_triangle);

        Self {
            triangles,
            super_vertices,
            epsilon,
            counters: RunCounters::default(),
        }
    }

    pub(crate) fn super_vertices(&self) -> [Vertex; 3] {
        self.super_vertices
    }

    pub(crate) fn counters(&self) -> RunCounters {
        self.counters
    }

    #[cfg(test)]
    pub(crate) fn triangles(&self) -> &HashSet<Triangle> {
        &self.triangles
    }

    /// Inserts a single vertex.
    ///
    /// Removes every triangle whose circumcircle contains the vertex and fills the resulting
    /// cavity by connecting its boundary edges to the new vertex.
    pub(crate) fn insert(&mut self, vertex: Vertex, observer: &mut impl InsertionObserver) {
        let position = vertex.position;

        let mut bad_triangles: SmallVec<[Triangle; 8]> = self
            .triangles
            .iter()
            .filter(|triangle| triangle.circumcircle_contains(position))
            .copied()
            .collect();
        bad_triangles.sort_unstable_by(Triangle::cmp_canonical);

        observer.bad_triangles_found(&InsertionStep {
            vertex,
            mesh: &self.triangles,
            bad_triangles: &bad_triangles,
            boundary: &[],
            new_triangles: &[],
        });

        let boundary = cavity_boundary(&bad_triangles);

        observer.cavity_boundary_extracted(&InsertionStep {
            vertex,
            mesh: &self.triangles,
            bad_triangles: &bad_triangles,
            boundary: &boundary,
            new_triangles: &[],
        });

        for triangle in &bad_triangles {
            self.triangles.remove(triangle);
        }

        let mut new_triangles: SmallVec<[Triangle; 8]> = SmallVec::with_capacity(boundary.len());
        for edge in &boundary {
            let [v0, v1] = edge.vertices();
            let triangle = Triangle::new(v0, v1, vertex, self.epsilon);
            if triangle.is_collinear() {
                tracing::debug!(
                    "Created collinear triangle {:?} while inserting {:?}",
                    triangle.positions(),
                    position
                );
                self.counters.collinear_triangles_created += 1;
                observer.collinear_triangle(&CollinearTripleWarning { triangle });
            }
            self.triangles.insert(triangle);
            new_triangles.push(triangle);
        }

        self.counters.bad_triangles_removed += bad_triangles.len();
        self.counters.triangles_created += new_triangles.len();

        tracing::trace!(
            "Inserted vertex {} at {:?}: {} bad triangles, {} boundary edges",
            vertex.handle.index(),
            position,
            bad_triangles.len(),
            boundary.len(),
        );

        observer.cavity_retriangulated(&InsertionStep {
            vertex,
            mesh: &self.triangles,
            bad_triangles: &bad_triangles,
            boundary: &boundary,
            new_triangles: &new_triangles,
        });
    }

    /// Removes every triangle adjacent to a super vertex.
    ///
    /// The remaining triangles are returned in canonical order.
    pub(crate) fn finalize(self, observer: &mut impl InsertionObserver) -> Vec<Triangle> {
        let super_handles = self.super_vertices.map(|v| v.handle);
        let mut result: Vec<Triangle> = self
            .triangles
            .into_iter()
            .filter(|triangle| !super_handles.iter().any(|h| triangle.has_vertex(*h)))
            .collect();
        result.sort_unstable_by(Triangle::cmp_canonical);
        observer.finalized(&result);
        result
    }
}

/// Returns all edges that belong to an odd number of the given triangles, in order of first
/// occurrence.
///
/// For the bad triangles of a single insertion, this is exactly the set of edges outlining the
/// cavity: edges shared by two bad triangles lie inside the cavity. Rounding on nearly
/// cocircular sites can make three bad triangles share an edge, such an edge is kept.
pub(crate) fn cavity_boundary(bad_triangles: &[Triangle]) -> SmallVec<[Edge; 16]> {
    let mut counts: Vec<(Edge, u32)> = Vec::with_capacity(bad_triangles.len() * 3);
    let mut index_of: HashMap<Edge, usize> = HashMap::with_capacity(bad_triangles.len() * 3);

    for triangle in bad_triangles {
        for edge in triangle.edges() {
            match index_of.get(&edge) {
                Some(&index) => counts[index].1 += 1,
                None => {
                    index_of.insert(edge, counts.len());
                    counts.push((edge, 1));
                }
            }
        }
    }

    if let Some((edge, count)) = counts.iter().find(|(_, count)| *count > 2) {
        tracing::debug!(
            "Edge {:?} is shared by {} bad triangles",
            edge.positions(),
            count
        );
    }

    counts
        .into_iter()
        .filter(|(_, count)| count % 2 == 1)
        .map(|(edge, _)| edge)
        .collect()
}
