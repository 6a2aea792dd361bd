//! Data and operations on 2D points.
//!
//! [`Point`] doubles as a position and as a displacement vector; the
//! arithmetic operators, `dot`, and `cross` treat it as the latter. All
//! coordinates are `f64` and equality-with-tolerance is left to the
//! predicates module so that a single ε governs every comparison.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A point (or displacement vector) in the Euclidean plane.
///
/// # Examples
///
/// ```rust
/// use cdt2d::geometry::point::Point;
///
/// let a = Point::new(1.0, 2.0);
/// let b = Point::new(4.0, 6.0);
/// assert_eq!((b - a).magnitude(), 5.0);
/// assert_eq!(a.distance(b), 5.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// The x coordinate.
    pub x: f64,
    /// The y coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a new point from its coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The dot product of `self` and `other`, both taken as vectors.
    #[must_use]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// The z component of the cross product of `self` and `other`, both
    /// taken as vectors. Positive when `other` lies counter-clockwise of
    /// `self`.
    #[must_use]
    pub fn cross(self, other: Self) -> f64 {
        self.x * other.y - other.x * self.y
    }

    /// The squared Euclidean norm of `self` taken as a vector.
    #[must_use]
    pub fn magnitude2(self) -> f64 {
        self.dot(self)
    }

    /// The Euclidean norm of `self` taken as a vector.
    #[must_use]
    pub fn magnitude(self) -> f64 {
        self.magnitude2().sqrt()
    }

    /// The Euclidean distance between two points.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (other - self).magnitude()
    }

    /// The squared Euclidean distance between two points.
    ///
    /// Preferred over [`Point::distance`] in comparisons against a squared
    /// radius, where the square root would only lose precision.
    #[must_use]
    pub fn distance2(self, other: Self) -> f64 {
        (other - self).magnitude2()
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Point {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl Mul<f64> for Point {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<f64> for Point {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for (f64, f64) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}
