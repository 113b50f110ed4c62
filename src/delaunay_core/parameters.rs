use super::math::COLLINEAR_EPSILON;

/// The default multiplier used for the size of the super triangle.
pub const DEFAULT_SUPER_TRIANGLE_SCALE: f64 = 20.0;

/// Controls the numerical parameters of a Bowyer-Watson run.
///
/// # Example
/// ```
/// use delaunay_dual::{DelaunayTriangulation, Point2, TriangulationParameters};
///
/// # fn main() -> Result<(), delaunay_dual::TriangulationError> {
/// let parameters = TriangulationParameters::new()
///     .with_collinear_epsilon(1.0e-12)
///     .with_super_triangle_scale(50.0);
///
/// let points = [
///     Point2::new(0.0, 0.0),
///     Point2::new(1.0, 0.0),
///     Point2::new(0.0, 1.0),
/// ];
/// let triangulation = DelaunayTriangulation::with_parameters(points, &parameters)?;
/// assert_eq!(triangulation.num_triangles(), 1);
/// # Ok(()) }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangulationParameters {
    collinear_epsilon: f64,
    super_triangle_scale: f64,
}

impl Default for TriangulationParameters {
    fn default() -> Self {
        Self {
            collinear_epsilon: COLLINEAR_EPSILON,
            super_triangle_scale: DEFAULT_SUPER_TRIANGLE_SCALE,
        }
    }
}

impl TriangulationParameters {
    /// Creates a new set of `TriangulationParameters`.
    ///
    /// Refer to the [struct definition](Self) for more information.
    pub fn new() -> Self {
        Self::default()
    }

    /// Specifies below which absolute determinant value three points count as collinear.
    ///
    /// Triangles with collinear vertices have no circumcircle. They stay part of the mesh but
    /// are never considered "bad" during insertion and never contribute a Voronoi vertex.
    ///
    /// Larger values discard valid skinny triangles, smaller values may produce circumcenters
    /// that are far off due to rounding. Defaults to [COLLINEAR_EPSILON](crate::COLLINEAR_EPSILON).
    ///
    /// # Panics
    /// Panics if `epsilon` is negative or NaN.
    pub fn with_collinear_epsilon(mut self, epsilon: f64) -> Self {
        assert!(epsilon >= 0.0, "collinear epsilon must not be negative");
        self.collinear_epsilon = epsilon;
        self
    }

    /// Specifies how much larger than the input's bounding box the super triangle is.
    ///
    /// For a bounding box with center `(mx, my)` and a larger side length of `d`, the super
    /// triangle's vertices are placed at `(mx - k*d, my - k*d/2)`, `(mx + k*d, my - k*d/2)` and
    /// `(mx, my + k*d)`.
    ///
    /// The super triangle must be far enough away to not interfere with the circumcircles of
    /// triangles at the convex hull. Defaults to `20.0`.
    ///
    /// # Panics
    /// Panics if `scale` is smaller than `2.0` or NaN.
    pub fn with_super_triangle_scale(mut self, scale: f64) -> Self {
        assert!(scale >= 2.0, "super triangle scale must be at least 2.0");
        self.super_triangle_scale = scale;
        self
    }

    /// Returns the configured collinearity threshold.
    pub fn collinear_epsilon(&self) -> f64 {
        self.collinear_epsilon
    }

    /// Returns the configured super triangle multiplier.
    pub fn super_triangle_scale(&self) -> f64 {
        self.super_triangle_scale
    }
}
