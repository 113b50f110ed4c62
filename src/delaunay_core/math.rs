use std::{error::Error, fmt::Display};

use crate::{HasPosition, Point2, CoordNum};

/// The error type used for invalid input coordinates.
///
/// Vertices can be checked for validity by using [crate::validate_vertex].
#[derive(Copy, Clone, PartialOrd, Ord, PartialEq, Eq, Debug, Hash)]
pub enum InsertionError {
    /// A coordinate value was too small.
    ///
    /// The absolute value of any inserted vertex coordinate must either be zero or greater
    /// greater than or equal to [crate::MIN_ALLOWED_VALUE].
    TooSmall,

    /// A coordinate value was too large.
    ///
    /// The absolute value of any inserted vertex coordinate must be less than or equal to
    /// [crate::MAX_ALLOWED_VALUE].
    TooLarge,

    /// A coordinate value was NaN.
    NAN,
}

impl Display for InsertionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as std::fmt::Debug>::fmt(self, f)
    }
}

impl Error for InsertionError {}

/// The smallest allowed coordinate value greater than zero. This value is equal to 2<sup>-142</sup>.
///
/// The exact orientation test used to detect collinear input sets does not underflow for
/// coordinates of at least this magnitude.
///
/// *See also [validate_coordinate], [validate_vertex], [MAX_ALLOWED_VALUE]*
pub const MIN_ALLOWED_VALUE: f64 = 1.793662034335766e-43; // 1.0 * 2^-142

/// The largest allowed coordinate value. This value is equal to 2<sup>201</sup>.
///
/// *See also [validate_coordinate], [validate_vertex], [MIN_ALLOWED_VALUE]*
pub const MAX_ALLOWED_VALUE: f64 = 3.2138760885179806e60; // 1.0 * 2^201

/// Three points whose circumcircle determinant has an absolute value below this threshold
/// are considered collinear.
///
/// The threshold is absolute and does not scale with the input's coordinate magnitude.
/// It can be changed with
/// [TriangulationParameters::with_collinear_epsilon](crate::TriangulationParameters::with_collinear_epsilon).
pub const COLLINEAR_EPSILON: f64 = 1e-10;

/// Checks if a coordinate value is suitable for triangulation.
///
/// Will return an error if and only if
///  - The absolute value of the coordinate is too small (See [MIN_ALLOWED_VALUE])
///  - The absolute value of the coordinate is too large (See [MAX_ALLOWED_VALUE])
///  - The coordinate is NaN (not a number)
///
/// Passing in any non-finite floating point number (e.g. `f32::NEG_INFINITY`) will
/// result in `Err(InsertionError::TooLarge)`.
pub fn validate_coordinate<S: CoordNum>(value: S) -> Result<(), InsertionError> {
    let as_f64: f64 = value.into();
    if as_f64.is_nan() {
        Err(InsertionError::NAN)
    } else if as_f64.abs() < MIN_ALLOWED_VALUE && as_f64 != 0.0 {
        Err(InsertionError::TooSmall)
    } else if as_f64.abs() > MAX_ALLOWED_VALUE {
        Err(InsertionError::TooLarge)
    } else {
        Ok(())
    }
}

/// Checks if a vertex is suitable for triangulation.
///
/// A vertex is considered suitable if all of its coordinates are valid. See [validate_coordinate]
/// for more information.
pub fn validate_vertex<V: HasPosition>(vertex: &V) -> Result<(), InsertionError> {
    let position = vertex.position();
    validate_coordinate(position.x)?;
    validate_coordinate(position.y)?;
    Ok(())
}

/// Calculates the circumcircle through three points.
///
/// Returns the circle's center and its squared radius, or `None` if the determinant of the
/// three points is smaller than `epsilon` (the points are treated as collinear).
pub fn circumcircle(
    [p1, p2, p3]: [Point2<f64>; 3],
    epsilon: f64,
) -> Option<(Point2<f64>, f64)> {
    let d = 2.0 * (p1.x * (p2.y - p3.y) + p2.x * (p3.y - p1.y) + p3.x * (p1.y - p2.y));
    if d.abs() < epsilon {
        return None;
    }

    let p1_sq = p1.length2();
    let p2_sq = p2.length2();
    let p3_sq = p3.length2();

    let ux = (p1_sq * (p2.y - p3.y) + p2_sq * (p3.y - p1.y) + p3_sq * (p1.y - p2.y)) / d;
    let uy = (p1_sq * (p3.x - p2.x) + p2_sq * (p1.x - p3.x) + p3_sq * (p2.x - p1.x)) / d;

    let center = Point2::new(ux, uy);
    Some((center, p1.distance_2(center)))
}

fn to_robust_coord(point: Point2<f64>) -> robust::Coord<f64> {
    robust::Coord {
        x: point.x,
        y: point.y,
    }
}

/// Returns a positive value if `query_point` lies left of the line through `p1` and `p2`,
/// a negative value if it lies right of it and zero if all three points are collinear.
///
/// The sign of the result is exact.
pub fn side_query(p1: Point2<f64>, p2: Point2<f64>, query_point: Point2<f64>) -> f64 {
    robust::orient2d(
        to_robust_coord(p1),
        to_robust_coord(p2),
        to_robust_coord(query_point),
    )
}

/// Returns `true` if all given points lie exactly on a single line.
///
/// Duplicates are allowed. Zero or one distinct points are considered collinear.
pub fn all_collinear(points: &[Point2<f64>]) -> bool {
    let Some(&first) = points.first() else {
        return true;
    };
    let Some(&second) = points.iter().find(|p| **p != first) else {
        return true;
    };
    points.iter().all(|p| side_query(first, second, *p) == 0.0)
}

#[cfg(test)]
mod test {
    use super::{all_collinear, circumcircle, side_query, validate_coordinate, COLLINEAR_EPSILON};
    use crate::{validate_vertex, InsertionError, Point2};
    use approx::assert_relative_eq;

    #[test]
    fn test_validate_coordinate() {
        use super::{validate_coordinate, InsertionError::*};
        assert_eq!(validate_coordinate(f64::NAN), Err(NAN));
        let max_value = super::MAX_ALLOWED_VALUE;

        assert_eq!(validate_coordinate(f64::INFINITY), Err(TooLarge));
        assert_eq!(validate_coordinate(f64::NEG_INFINITY), Err(TooLarge));
        assert_eq!(validate_coordinate(max_value * 2.0), Err(TooLarge));

        let min_value = super::MIN_ALLOWED_VALUE;
        assert_eq!(validate_coordinate(min_value / 2.0), Err(TooSmall));

        let tiny_float = f32::MIN_POSITIVE;
        assert_eq!(validate_coordinate(tiny_float), Ok(()));

        let big_float = f32::MAX;
        assert_eq!(validate_coordinate(big_float), Ok(()));

        assert_eq!(validate_coordinate(min_value), Ok(()));
        assert_eq!(validate_coordinate(0.0), Ok(()));
    }

    #[test]
    fn test_validate_limits_are_sharp() {
        use float_next_after::NextAfter;

        assert!(validate_coordinate(super::MAX_ALLOWED_VALUE).is_ok());
        assert_eq!(
            validate_coordinate(super::MAX_ALLOWED_VALUE.next_after(f64::INFINITY)),
            Err(InsertionError::TooLarge)
        );
        assert_eq!(
            validate_coordinate(super::MIN_ALLOWED_VALUE.next_after(f64::NEG_INFINITY)),
            Err(InsertionError::TooSmall)
        );
        assert_eq!(
            validate_vertex(&Point2::new(1.0, f64::NAN)),
            Err(InsertionError::NAN)
        );
    }

    #[test]
    fn check_min_value() {
        let mut expected = 1.0f64;
        for _ in 0..142 {
            expected *= 0.5;
        }

        assert_eq!(super::MIN_ALLOWED_VALUE, expected);
    }

    #[test]
    fn check_max_value() {
        let mut expected = 1.0f64;
        for _ in 0..201 {
            expected *= 2.0;
        }

        assert_eq!(super::MAX_ALLOWED_VALUE, expected);
    }

    #[test]
    fn test_circumcircle_right_triangle() {
        let positions = [
            Point2::new(0.0, 0.0),
            Point2::new(0.0, 4.0),
            Point2::new(4.0, 0.0),
        ];
        let (center, radius_2) = circumcircle(positions, COLLINEAR_EPSILON).unwrap();
        assert_relative_eq!(center.x, 2.0);
        assert_relative_eq!(center.y, 2.0);
        assert_relative_eq!(radius_2, 8.0);
    }

    #[test]
    fn test_circumcircle_is_equidistant() {
        let positions = [
            Point2::new(-1.5, 0.25),
            Point2::new(0.5, 3.0),
            Point2::new(2.0, -1.0),
        ];
        let (center, radius_2) = circumcircle(positions, COLLINEAR_EPSILON).unwrap();
        for position in positions {
            assert_relative_eq!(position.distance_2(center), radius_2, epsilon = 1.0e-12);
        }
    }

    #[test]
    fn test_circumcircle_collinear() {
        let positions = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
        ];
        assert_eq!(circumcircle(positions, COLLINEAR_EPSILON), None);

        // Nearly collinear points fall below the threshold as well
        let positions = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0e-12),
            Point2::new(2.0, 0.0),
        ];
        assert_eq!(circumcircle(positions, COLLINEAR_EPSILON), None);
        assert!(circumcircle(positions, 0.0).is_some());
    }

    #[test]
    fn test_edge_side() {
        let p1 = Point2::new(0.0, 0.0);
        let p2 = Point2::new(1.0, 1.0);

        assert!(side_query(p1, p2, Point2::new(1.0, 0.0)) < 0.0);
        assert!(side_query(p1, p2, Point2::new(0.0, 1.0)) > 0.0);
        assert_eq!(side_query(p1, p2, Point2::new(0.5, 0.5)), 0.0);
    }

    #[test]
    fn test_all_collinear() {
        assert!(all_collinear(&[]));
        assert!(all_collinear(&[Point2::new(1.0, 1.0), Point2::new(1.0, 1.0)]));
        assert!(all_collinear(&[
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 0.0),
            Point2::new(-7.5, 0.0),
        ]));
        assert!(!all_collinear(&[
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(2.0, 1.0e-30),
        ]));
    }
}
