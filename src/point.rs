use std::cmp::Ordering;

use num_traits::{Num, Signed};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A coordinate type that can be used as input for a triangulation.
///
/// All geometric computations are performed after converting the type into a `f64`.
///
/// This type should usually be either `f32` or `f64`.
pub trait CoordNum:
    Num + PartialOrd + Into<f64> + From<f32> + Copy + Signed + std::fmt::Debug
{
}

impl<T> CoordNum for T where
    T: Num + PartialOrd + Into<f64> + From<f32> + Copy + Signed + std::fmt::Debug
{
}

/// A two dimensional point.
///
/// This is the basic type used for defining positions.
#[derive(Debug, PartialEq, Eq, PartialOrd, Clone, Copy, Default, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde")
)]
pub struct Point2<S> {
    /// The point's x coordinate
    pub x: S,
    /// The point's y coordinate
    pub y: S,
}

impl<S> Point2<S> {
    /// Creates a new point.
    #[inline]
    pub const fn new(x: S, y: S) -> Self {
        Point2 { x, y }
    }
}

impl<S: CoordNum> Point2<S> {
    /// Returns the squared distance of this point and another point.
    #[inline]
    pub fn distance_2(&self, other: Self) -> S {
        self.sub(other).length2()
    }

    /// Converts this point into a `f64` point.
    ///
    /// Negative zero coordinates are mapped to positive zero. Two converted points compare
    /// equal if and only if their bit patterns are equal (NaN excluded).
    pub(crate) fn to_f64(self) -> Point2<f64> {
        let x: f64 = self.x.into();
        let y: f64 = self.y.into();
        Point2::new(x + 0.0, y + 0.0)
    }

    pub(crate) fn length2(&self) -> S {
        self.x * self.x + self.y * self.y
    }

    pub(crate) fn sub(&self, other: Self) -> Self {
        Point2 {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

impl Point2<f64> {
    /// Compares two points lexicographically, first by `x`, then by `y`.
    ///
    /// This order carries no geometric meaning. It is used to store the vertices of edges and
    /// triangles in a canonical order.
    #[inline]
    pub fn cmp_lexicographic(&self, other: &Self) -> Ordering {
        self.x
            .total_cmp(&other.x)
            .then_with(|| self.y.total_cmp(&other.y))
    }

    /// Returns a key that is equal for two points if and only if both points are equal.
    ///
    /// Only meaningful for points created by conversion into `f64` (no negative zeros, no NaN).
    #[inline]
    pub(crate) fn bit_key(&self) -> (u64, u64) {
        (self.x.to_bits(), self.y.to_bits())
    }
}

impl<S: CoordNum> From<Point2<S>> for [S; 2] {
    #[inline]
    fn from(point: Point2<S>) -> Self {
        [point.x, point.y]
    }
}

impl<S: CoordNum> From<Point2<S>> for (S, S) {
    #[inline]
    fn from(point: Point2<S>) -> (S, S) {
        (point.x, point.y)
    }
}

impl<S: CoordNum> From<[S; 2]> for Point2<S> {
    #[inline]
    fn from(source: [S; 2]) -> Self {
        Self::new(source[0], source[1])
    }
}

impl<S: CoordNum> From<(S, S)> for Point2<S> {
    #[inline]
    fn from(source: (S, S)) -> Self {
        Self::new(source.0, source.1)
    }
}

/// An object with position.
///
/// Input sites need to implement this trait to allow being triangulated.
pub trait HasPosition {
    /// The number type used by this coordinate type.
    type Scalar: CoordNum;

    /// Returns the position of this object.
    fn position(&self) -> Point2<Self::Scalar>;
}

impl<S: CoordNum> HasPosition for Point2<S> {
    type Scalar = S;

    fn position(&self) -> Point2<S> {
        *self
    }
}

impl<S: CoordNum> HasPosition for [S; 2] {
    type Scalar = S;

    fn position(&self) -> Point2<S> {
        Point2::new(self[0], self[1])
    }
}

impl<S: CoordNum> HasPosition for (S, S) {
    type Scalar = S;

    fn position(&self) -> Point2<S> {
        Point2::new(self.0, self.1)
    }
}
