use hashbrown::{HashMap, HashSet};
use smallvec::SmallVec;

use crate::{DelaunayTriangulation, Edge, FixedVertexHandle, Point2, Triangle};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A finite edge of the Voronoi diagram.
///
/// Connects the circumcenters of the two triangles sharing an inner Delaunay edge. The Voronoi
/// edge is orthogonal to its dual Delaunay edge.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct VoronoiEdge {
    /// The circumcenter of the triangle `faces[0]`.
    pub from: Point2<f64>,
    /// The circumcenter of the triangle `faces[1]`.
    pub to: Point2<f64>,
    /// The dual Delaunay edge.
    pub delaunay_edge: Edge,
    /// Indices into [DelaunayTriangulation::triangles] of the two triangles sharing
    /// `delaunay_edge`, in ascending order.
    pub faces: [usize; 2],
}

impl VoronoiEdge {
    /// Returns both end points.
    pub fn positions(&self) -> [Point2<f64>; 2] {
        [self.from, self.to]
    }
}

/// The Voronoi diagram dual to a [DelaunayTriangulation].
///
/// Only finite edges are represented: hull edges of the triangulation and edges adjacent to
/// a collinear triangle have no Voronoi counterpart. Voronoi vertices are not deduplicated,
/// cocircular sites can produce several vertices at the same position.
///
/// # Example
/// ```
/// use delaunay_dual::{triangulate, Point2};
///
/// # fn main() -> Result<(), delaunay_dual::TriangulationError> {
/// let mut sites = vec![Point2::new(0.0, 0.0)];
/// for i in 0..6 {
///     let angle = i as f64 * std::f64::consts::PI / 3.0;
///     sites.push(Point2::new(angle.cos(), angle.sin()));
/// }
///
/// let triangulation = triangulate(sites)?;
/// let diagram = triangulation.voronoi_diagram();
/// let center = triangulation.locate_vertex(Point2::new(0.0, 0.0)).unwrap();
///
/// let cell = diagram.cell(center);
/// assert!(cell.is_closed());
/// assert_eq!(cell.edges().len(), 6);
/// # Ok(()) }
/// ```
#[derive(Clone, Debug)]
pub struct VoronoiDiagram {
    edges: Vec<VoronoiEdge>,
    vertices: Vec<Point2<f64>>,
    open_sites: HashSet<FixedVertexHandle>,
}

/// A single cell of a [VoronoiDiagram].
#[derive(Clone, Debug)]
pub struct VoronoiCell {
    site: FixedVertexHandle,
    edges: Vec<VoronoiEdge>,
    closed: bool,
}

/// Maps each Delaunay edge to the indices of its adjacent triangles.
///
/// Edges are listed in order of first occurrence.
fn edge_adjacency(triangles: &[Triangle]) -> Vec<(Edge, SmallVec<[usize; 2]>)> {
    let mut adjacency: Vec<(Edge, SmallVec<[usize; 2]>)> = Vec::new();
    let mut index_of: HashMap<Edge, usize> = HashMap::with_capacity(triangles.len() * 2);

    for (face, triangle) in triangles.iter().enumerate() {
        for edge in triangle.edges() {
            match index_of.get(&edge) {
                Some(&index) => adjacency[index].1.push(face),
                None => {
                    index_of.insert(edge, adjacency.len());
                    adjacency.push((edge, smallvec::smallvec![face]));
                }
            }
        }
    }
    adjacency
}

/// Derives the finite Voronoi edges from a Delaunay triangulation.
///
/// Emits one edge for every Delaunay edge that is shared by exactly two triangles, if both
/// triangles have a circumcenter. Returns an empty list for a triangulation with a single triangle.
pub fn voronoi_dual(triangulation: &DelaunayTriangulation) -> Vec<VoronoiEdge> {
    dual_edges(triangulation.triangles()).0
}

fn dual_edges(triangles: &[Triangle]) -> (Vec<VoronoiEdge>, HashSet<FixedVertexHandle>) {
    let mut edges = Vec::new();
    let mut open_sites = HashSet::new();

    for (delaunay_edge, faces) in edge_adjacency(triangles) {
        let dual = match faces.as_slice() {
            [f0, f1] => triangles[*f0]
                .circumcenter()
                .zip(triangles[*f1].circumcenter())
                .map(|(from, to)| VoronoiEdge {
                    from,
                    to,
                    delaunay_edge,
                    faces: [*f0, *f1],
                }),
            _ => None,
        };

        match dual {
            Some(edge) => edges.push(edge),
            None => open_sites.extend(delaunay_edge.handles()),
        }
    }

    (edges, open_sites)
}

impl VoronoiDiagram {
    /// Creates the Voronoi diagram of a triangulation.
    pub fn new(triangulation: &DelaunayTriangulation) -> Self {
        let triangles = triangulation.triangles();
        let (edges, open_sites) = dual_edges(triangles);
        let vertices: Vec<_> = triangles
            .iter()
            .filter_map(|triangle| triangle.circumcenter())
            .collect();

        tracing::debug!(
            "Derived Voronoi diagram with {} vertices and {} edges",
            vertices.len(),
            edges.len()
        );

        Self {
            edges,
            vertices,
            open_sites,
        }
    }

    /// Returns all finite Voronoi edges.
    ///
    /// Edges are ordered by their dual Delaunay edge's first occurrence in
    /// [DelaunayTriangulation::triangles].
    pub fn edges(&self) -> &[VoronoiEdge] {
        &self.edges
    }

    /// Returns the circumcenters of all triangles that have one, in triangle order.
    pub fn vertices(&self) -> &[Point2<f64>] {
        &self.vertices
    }

    /// Returns the number of Voronoi vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of finite Voronoi edges.
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    /// Returns the Voronoi cell of a site.
    ///
    /// The cell consists of the Voronoi edges dual to the Delaunay edges adjacent to `site`.
    pub fn cell(&self, site: FixedVertexHandle) -> VoronoiCell {
        let edges: Vec<_> = self
            .edges
            .iter()
            .filter(|edge| edge.delaunay_edge.has_vertex(site))
            .copied()
            .collect();

        let mut face_count: HashMap<usize, usize> = HashMap::new();
        for edge in &edges {
            for face in edge.faces {
                *face_count.entry(face).or_default() += 1;
            }
        }

        let closed = !edges.is_empty()
            && !self.open_sites.contains(&site)
            && face_count.values().all(|count| *count == 2);

        VoronoiCell {
            site,
            edges,
            closed,
        }
    }
}

impl VoronoiCell {
    /// Returns the site this cell belongs to.
    pub fn site(&self) -> FixedVertexHandle {
        self.site
    }

    /// Returns the finite Voronoi edges bounding this cell, in no particular order.
    pub fn edges(&self) -> &[VoronoiEdge] {
        &self.edges
    }

    /// Returns `true` if the cell's edges form a closed polygon.
    ///
    /// Cells of sites on the convex hull are unbounded and never closed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Returns the vertices of a closed cell in traversal order.
    ///
    /// Returns `None` if the cell is not closed or if its edges do not form a single cycle.
    pub fn polygon(&self) -> Option<Vec<Point2<f64>>> {
        if !self.closed {
            return None;
        }

        let mut edges_at_face: HashMap<usize, SmallVec<[usize; 2]>> = HashMap::new();
        for (index, edge) in self.edges.iter().enumerate() {
            for face in edge.faces {
                edges_at_face.entry(face).or_default().push(index);
            }
        }

        let mut polygon = Vec::with_capacity(self.edges.len());
        let mut current_edge = 0;
        let mut current_face = self.edges[0].faces[0];
        for step in 1..=self.edges.len() {
            let edge = &self.edges[current_edge];
            let (position, next_face) = if edge.faces[0] == current_face {
                (edge.from, edge.faces[1])
            } else {
                (edge.to, edge.faces[0])
            };
            polygon.push(position);

            current_face = next_face;
            current_edge = *edges_at_face[&current_face]
                .iter()
                .find(|index| **index != current_edge)?;

            // The edges form more than one cycle
            if current_edge == 0 && step < self.edges.len() {
                return None;
            }
        }
        Some(polygon)
    }
}

impl DelaunayTriangulation {
    /// Derives the Voronoi diagram of this triangulation.
    ///
    /// *See also [voronoi_dual]*
    pub fn voronoi_diagram(&self) -> VoronoiDiagram {
        VoronoiDiagram::new(self)
    }
}

#[cfg(test)]
mod test {
    use super::{edge_adjacency, voronoi_dual, VoronoiCell, VoronoiEdge};
    use crate::test_utilities::{random_points_with_seed, SEED, SEED2};
    use crate::{triangulate, Edge, FixedVertexHandle, Point2, TriangulationError, Vertex};
    use approx::assert_relative_eq;

    /// Creates a closed cell around site 0 from a list of face cycles.
    fn cell_from_cycles(cycles: &[&[usize]]) -> VoronoiCell {
        let site = Vertex {
            handle: FixedVertexHandle::new(0),
            position: Point2::new(0.0, 0.0),
        };
        let mut edges = Vec::new();
        for cycle in cycles {
            for (index, from) in cycle.iter().enumerate() {
                let to = cycle[(index + 1) % cycle.len()];
                let neighbor = Vertex {
                    handle: FixedVertexHandle::new(edges.len() + 1),
                    position: Point2::new(edges.len() as f64 + 1.0, 1.0),
                };
                edges.push(VoronoiEdge {
                    from: Point2::new(*from as f64, 0.0),
                    to: Point2::new(to as f64, 0.0),
                    delaunay_edge: Edge::new(site, neighbor),
                    faces: [*from, to],
                });
            }
        }
        VoronoiCell {
            site: site.handle,
            edges,
            closed: true,
        }
    }

    #[test]
    fn test_polygon_of_single_cycle() {
        let cell = cell_from_cycles(&[&[0, 1, 2, 3]]);
        let polygon = cell.polygon().unwrap();
        assert_eq!(polygon.len(), 4);
        let xs: Vec<_> = polygon.iter().map(|p| p.x).collect();
        assert_eq!(xs, [0.0, 1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_polygon_of_disjoint_cycles() {
        let cell = cell_from_cycles(&[&[0, 1, 2], &[3, 4, 5]]);
        assert!(cell.is_closed());
        assert!(cell.polygon().is_none());
    }

    fn hexagon_with_center(radius: f64) -> Vec<Point2<f64>> {
        let mut sites = vec![Point2::new(0.0, 0.0)];
        for i in 0..6 {
            let angle = i as f64 * std::f64::consts::PI / 3.0;
            sites.push(Point2::new(radius * angle.cos(), radius * angle.sin()));
        }
        sites
    }

    #[test]
    fn test_single_triangle_has_no_edges() -> Result<(), TriangulationError> {
        let triangulation = triangulate([
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(0.0, 4.0),
        ])?;
        assert!(voronoi_dual(&triangulation).is_empty());

        let diagram = triangulation.voronoi_diagram();
        assert_eq!(diagram.num_vertices(), 1);
        assert_eq!(diagram.num_edges(), 0);
        assert_relative_eq!(diagram.vertices()[0].x, 2.0);
        assert_relative_eq!(diagram.vertices()[0].y, 2.0);
        for handle in 0..3 {
            let cell = diagram.cell(crate::FixedVertexHandle::new(handle));
            assert!(cell.edges().is_empty());
            assert!(!cell.is_closed());
            assert!(cell.polygon().is_none());
        }
        Ok(())
    }

    #[test]
    fn test_square() -> Result<(), TriangulationError> {
        let triangulation = triangulate([
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 2.0),
        ])?;
        let edges = voronoi_dual(&triangulation);
        assert_eq!(edges.len(), 1);

        let edge = edges[0];
        let triangles = triangulation.triangles();
        assert_eq!(edge.faces, [0, 1]);
        assert_eq!(Some(edge.from), triangles[0].circumcenter());
        assert_eq!(Some(edge.to), triangles[1].circumcenter());
        // All four corners are cocircular, both circumcenters coincide
        for position in edge.positions() {
            assert_relative_eq!(position.x, 1.0);
            assert_relative_eq!(position.y, 1.0);
        }
        Ok(())
    }

    #[test]
    fn test_hexagon_center_cell() -> Result<(), TriangulationError> {
        for radius in [1.0, 2.0, 150.0] {
            let triangulation = triangulate(hexagon_with_center(radius))?;
            assert_eq!(triangulation.num_triangles(), 6);

            let diagram = triangulation.voronoi_diagram();
            assert_eq!(diagram.num_edges(), 6);

            let center = triangulation.locate_vertex(Point2::new(0.0, 0.0)).unwrap();
            let cell = diagram.cell(center);
            assert_eq!(cell.site(), center);
            assert_eq!(cell.edges().len(), 6);
            assert!(cell.is_closed());

            let polygon = cell.polygon().unwrap();
            assert_eq!(polygon.len(), 6);
            // The cell is a regular hexagon with inradius radius / 2
            let circumradius_2 = radius * radius / 3.0;
            for vertex in &polygon {
                assert_relative_eq!(
                    vertex.distance_2(Point2::new(0.0, 0.0)),
                    circumradius_2,
                    max_relative = 1.0e-9
                );
            }
            for (index, vertex) in polygon.iter().enumerate() {
                let next = polygon[(index + 1) % polygon.len()];
                assert_relative_eq!(vertex.distance_2(next), circumradius_2, max_relative = 1.0e-9);
            }

            // Hull sites have unbounded cells
            for handle in 1..7 {
                let cell = diagram.cell(crate::FixedVertexHandle::new(handle));
                assert_eq!(cell.edges().len(), 1);
                assert!(!cell.is_closed());
            }
        }
        Ok(())
    }

    #[test]
    fn test_dual_correctness() -> Result<(), TriangulationError> {
        for (size, seed) in [(10, SEED), (100, SEED2), (500, SEED)] {
            let triangulation = triangulate(random_points_with_seed(size, seed))?;
            let triangles = triangulation.triangles();
            let edges = voronoi_dual(&triangulation);

            let interior_edges = edge_adjacency(triangles)
                .iter()
                .filter(|(_, faces)| faces.len() == 2)
                .count();
            assert_eq!(edges.len(), interior_edges);

            for edge in &edges {
                let [f0, f1] = edge.faces;
                assert!(f0 < f1);
                assert_eq!(Some(edge.from), triangles[f0].circumcenter());
                assert_eq!(Some(edge.to), triangles[f1].circumcenter());
                assert!(triangles[f0].edges().contains(&edge.delaunay_edge));
                assert!(triangles[f1].edges().contains(&edge.delaunay_edge));

                // Both end points lie on the perpendicular bisector of the dual edge
                let [a, b] = edge.delaunay_edge.positions();
                for position in edge.positions() {
                    assert_relative_eq!(
                        position.distance_2(a),
                        position.distance_2(b),
                        max_relative = 1.0e-6
                    );
                }
            }
        }
        Ok(())
    }

    #[test]
    fn test_inner_cells_are_closed() -> Result<(), TriangulationError> {
        let grid = (0..6).flat_map(|x| (0..6).map(move |y| Point2::new(x as f64, y as f64)));
        let triangulation = triangulate(grid)?;
        let diagram = triangulation.voronoi_diagram();

        for x in 0..6 {
            for y in 0..6 {
                let site = triangulation
                    .locate_vertex(Point2::new(x as f64, y as f64))
                    .unwrap();
                let cell = diagram.cell(site);
                let on_hull = x == 0 || y == 0 || x == 5 || y == 5;
                assert_eq!(cell.is_closed(), !on_hull);
                if !on_hull {
                    // Voronoi vertices coincide for grid points, the cell is the unit square
                    let polygon = cell.polygon().unwrap();
                    for vertex in polygon {
                        assert_relative_eq!((vertex.x - x as f64).abs(), 0.5, epsilon = 1.0e-9);
                        assert_relative_eq!((vertex.y - y as f64).abs(), 0.5, epsilon = 1.0e-9);
                    }
                }
            }
        }
        Ok(())
    }

    #[test]
    fn test_vertex_count_matches_triangles() -> Result<(), TriangulationError> {
        let triangulation = triangulate(random_points_with_seed(200, SEED2))?;
        let diagram = triangulation.voronoi_diagram();
        assert_eq!(diagram.num_vertices(), triangulation.num_triangles());
        assert_eq!(diagram.edges(), voronoi_dual(&triangulation).as_slice());
        Ok(())
    }
}
