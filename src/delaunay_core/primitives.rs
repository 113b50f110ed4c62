use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use super::math;
use crate::Point2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A handle that refers to a vertex of a triangulation.
///
/// Handles are indices into the triangulation's vertex list. Input sites keep the handle
/// they were assigned on insertion; merged duplicates share the handle of their first occurrence.
///
/// Indices are stored as `u32`. A triangulation supports at most `u32::MAX - 2` distinct
/// sites, the remaining indices are taken by the super triangle.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct FixedVertexHandle {
    index: u32,
}

impl FixedVertexHandle {
    pub(crate) fn new(index: usize) -> Self {
        debug_assert!(
            index <= u32::MAX as usize,
            "Vertex index {} does not fit into a handle",
            index
        );
        Self {
            index: index as u32,
        }
    }

    /// Returns the index of the vertex this handle refers to.
    pub fn index(&self) -> usize {
        self.index as usize
    }
}

/// A vertex handle together with the vertex position.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct Vertex {
    /// The vertex handle.
    pub handle: FixedVertexHandle,
    /// The vertex position.
    pub position: Point2<f64>,
}

impl Vertex {
    fn cmp_canonical(&self, other: &Self) -> Ordering {
        self.position.cmp_lexicographic(&other.position)
    }
}

/// An undirected edge between two distinct vertices.
///
/// The vertices are stored in lexicographic position order, `Edge::new(a, b)` and
/// `Edge::new(b, a)` are equal and hash identically. Equality only considers the vertex handles.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct Edge {
    vertices: [Vertex; 2],
}

impl Edge {
    pub(crate) fn new(v0: Vertex, v1: Vertex) -> Self {
        if v0.cmp_canonical(&v1) == Ordering::Greater {
            Self { vertices: [v1, v0] }
        } else {
            Self { vertices: [v0, v1] }
        }
    }

    /// Returns both vertices in canonical order.
    pub fn vertices(&self) -> [Vertex; 2] {
        self.vertices
    }

    /// Returns both vertex handles in canonical order.
    pub fn handles(&self) -> [FixedVertexHandle; 2] {
        [self.vertices[0].handle, self.vertices[1].handle]
    }

    /// Returns both vertex positions in canonical order.
    pub fn positions(&self) -> [Point2<f64>; 2] {
        [self.vertices[0].position, self.vertices[1].position]
    }

    /// Returns `true` if `handle` is one of the edge's end points.
    pub fn has_vertex(&self, handle: FixedVertexHandle) -> bool {
        self.handles().contains(&handle)
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.handles() == other.handles()
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.handles().hash(state);
    }
}

/// The circle passing through all vertices of a triangle.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct Circumcircle {
    /// The circle's center.
    pub center: Point2<f64>,
    /// The circle's squared radius.
    pub radius_2: f64,
}

/// A triangle of a triangulation.
///
/// The vertices are stored in lexicographic position order which makes a triangle's identity
/// independent of the order in which its vertices were passed in. The circumcircle is calculated
/// once on creation and never changes.
///
/// Equality and hashing only consider the vertex handles.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct Triangle {
    vertices: [Vertex; 3],
    circumcircle: Option<Circumcircle>,
}

impl Triangle {
    pub(crate) fn new(v0: Vertex, v1: Vertex, v2: Vertex, epsilon: f64) -> Self {
        let mut vertices = [v0, v1, v2];
        vertices.sort_unstable_by(Vertex::cmp_canonical);
        let positions = vertices.map(|v| v.position);
        let circumcircle = math::circumcircle(positions, epsilon)
            .map(|(center, radius_2)| Circumcircle { center, radius_2 });
        Self {
            vertices,
            circumcircle,
        }
    }

    /// Returns all three vertices in canonical order.
    pub fn vertices(&self) -> [Vertex; 3] {
        self.vertices
    }

    /// Returns all three vertex handles in canonical order.
    pub fn handles(&self) -> [FixedVertexHandle; 3] {
        self.vertices.map(|v| v.handle)
    }

    /// Returns all three vertex positions in canonical order.
    pub fn positions(&self) -> [Point2<f64>; 3] {
        self.vertices.map(|v| v.position)
    }

    /// Returns the triangle's three edges.
    ///
    /// For canonical vertices `[a, b, c]`, the edges `(a, b)`, `(b, c)` and `(a, c)` are returned.
    pub fn edges(&self) -> [Edge; 3] {
        let [a, b, c] = self.vertices;
        [Edge::new(a, b), Edge::new(b, c), Edge::new(a, c)]
    }

    /// Returns the triangle's circumcircle.
    ///
    /// Returns `None` if the vertices are collinear.
    pub fn circumcircle(&self) -> Option<Circumcircle> {
        self.circumcircle
    }

    /// Returns the triangle's circumcenter.
    ///
    /// Returns `None` if the vertices are collinear.
    pub fn circumcenter(&self) -> Option<Point2<f64>> {
        self.circumcircle.map(|circle| circle.center)
    }

    /// Returns the triangle's squared circumradius.
    ///
    /// Returns `f64::INFINITY` if the vertices are collinear.
    pub fn circumradius_2(&self) -> f64 {
        self.circumcircle
            .map_or(f64::INFINITY, |circle| circle.radius_2)
    }

    /// Returns `true` if this triangle's vertices were considered collinear on creation.
    pub fn is_collinear(&self) -> bool {
        self.circumcircle.is_none()
    }

    /// Returns `true` if `position` lies strictly inside the triangle's circumcircle.
    ///
    /// Positions on the circle are not contained. Always returns `false` for collinear triangles.
    pub fn circumcircle_contains(&self, position: Point2<f64>) -> bool {
        match self.circumcircle {
            Some(circle) => position.distance_2(circle.center) < circle.radius_2,
            None => false,
        }
    }

    /// Returns `true` if `handle` is one of the triangle's vertices.
    pub fn has_vertex(&self, handle: FixedVertexHandle) -> bool {
        self.vertices.iter().any(|v| v.handle == handle)
    }

    pub(crate) fn cmp_canonical(&self, other: &Self) -> Ordering {
        self.vertices
            .iter()
            .zip(other.vertices.iter())
            .map(|(a, b)| a.cmp_canonical(b))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialEq for Triangle {
    fn eq(&self, other: &Self) -> bool {
        self.handles() == other.handles()
    }
}

impl Eq for Triangle {}

impl Hash for Triangle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.handles().hash(state);
    }
}
