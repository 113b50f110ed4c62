//! # delaunay-dual
//!
//! Computes the Delaunay triangulation of a finite set of 2D sites with the incremental
//! Bowyer-Watson algorithm and derives the dual Voronoi diagram from it.
//!
//! # Example
//! ```
//! use delaunay_dual::{triangulate, voronoi_dual, Point2};
//!
//! # fn main() -> Result<(), delaunay_dual::TriangulationError> {
//! let triangulation = triangulate([
//!     Point2::new(0.0, 0.0),
//!     Point2::new(2.0, 0.0),
//!     Point2::new(2.0, 2.0),
//!     Point2::new(0.0, 2.0),
//! ])?;
//! assert_eq!(triangulation.num_triangles(), 2);
//!
//! // The two triangles share the diagonal
//! let edges = voronoi_dual(&triangulation);
//! assert_eq!(edges.len(), 1);
//! # Ok(()) }
//! ```
//!
//! # Features
//! * Triangles are reported in a canonical, input order independent order
//! * Duplicate sites are merged
//! * Intermediate construction steps can be inspected with an [InsertionObserver]
//! * `serde` support for [Point2] and the Voronoi output with the `serde` feature
#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![deny(missing_docs)]

mod delaunay_core;
mod delaunay_triangulation;
mod point;
mod voronoi;

#[cfg(test)]
mod test_utilities;

pub use crate::delaunay_core::math::{
    validate_coordinate, validate_vertex, InsertionError, COLLINEAR_EPSILON, MAX_ALLOWED_VALUE,
    MIN_ALLOWED_VALUE,
};

pub use crate::delaunay_core::{
    Circumcircle, CollinearTripleWarning, Edge, FixedVertexHandle, InsertionObserver,
    InsertionStep, NoObserver, Triangle, TriangulationParameters, Vertex,
    DEFAULT_SUPER_TRIANGLE_SCALE,
};

pub use crate::delaunay_triangulation::{
    triangulate, DegenerateInputError, DelaunayTriangulation, TriangulationError,
    TriangulationStats,
};

pub use crate::point::{CoordNum, HasPosition, Point2};

pub use crate::voronoi::{voronoi_dual, VoronoiCell, VoronoiDiagram, VoronoiEdge};
