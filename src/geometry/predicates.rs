//! Geometric predicates for planar triangulation.
//!
//! This module contains the fundamental predicates the discretizer is built
//! on: orientation of an ordered point triple, in-circle classification,
//! triangle containment, and segment intersection. Every predicate takes the
//! tolerance ε explicitly so that a single configured value governs all
//! comparisons; equality holds when `|value| < ε` and strict tests carry the
//! margin on the same side everywhere.

use crate::geometry::point::Point;

/// Represents the orientation of an ordered triple of points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// The triple winds clockwise (negative cross product).
    NEGATIVE,
    /// The triple is collinear within tolerance.
    DEGENERATE,
    /// The triple winds counter-clockwise (positive cross product).
    POSITIVE,
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NEGATIVE => write!(f, "NEGATIVE"),
            Self::DEGENERATE => write!(f, "DEGENERATE"),
            Self::POSITIVE => write!(f, "POSITIVE"),
        }
    }
}

/// Represents the position of a point relative to a circumcircle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InCircle {
    /// The point is outside the circumcircle.
    OUTSIDE,
    /// The point is on the circle within tolerance.
    BOUNDARY,
    /// The point is strictly inside the circumcircle.
    INSIDE,
}

impl std::fmt::Display for InCircle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OUTSIDE => write!(f, "OUTSIDE"),
            Self::BOUNDARY => write!(f, "BOUNDARY"),
            Self::INSIDE => write!(f, "INSIDE"),
        }
    }
}

/// Determines the orientation of the ordered triple `(a, b, c)` from the
/// sign of `cross(b - a, c - b)`.
///
/// # Examples
///
/// ```rust
/// use cdt2d::geometry::point::Point;
/// use cdt2d::geometry::predicates::{orientation, Orientation};
///
/// let a = Point::new(0.0, 0.0);
/// let b = Point::new(1.0, 0.0);
/// let c = Point::new(1.0, 1.0);
/// assert_eq!(orientation(a, b, c, 1e-6), Orientation::POSITIVE);
/// assert_eq!(orientation(c, b, a, 1e-6), Orientation::NEGATIVE);
/// assert_eq!(
///     orientation(a, b, Point::new(2.0, 0.0), 1e-6),
///     Orientation::DEGENERATE
/// );
/// ```
#[must_use]
pub fn orientation(a: Point, b: Point, c: Point, epsilon: f64) -> Orientation {
    let cross = (b - a).cross(c - b);
    if cross.abs() < epsilon {
        Orientation::DEGENERATE
    } else if cross > 0.0 {
        Orientation::POSITIVE
    } else {
        Orientation::NEGATIVE
    }
}

/// Classifies point `p` against the circle given by `center` and squared
/// radius `radius2`.
///
/// The strict-with-margin convention is `d² + ε < r²` for INSIDE and
/// `d² > r² + ε` for OUTSIDE; everything between is BOUNDARY. Callers that
/// only flip on `INSIDE` therefore never flip on cocircular configurations.
#[must_use]
pub fn in_circle(center: Point, radius2: f64, p: Point, epsilon: f64) -> InCircle {
    let d2 = center.distance2(p);
    if d2 + epsilon < radius2 {
        InCircle::INSIDE
    } else if d2 > radius2 + epsilon {
        InCircle::OUTSIDE
    } else {
        InCircle::BOUNDARY
    }
}

/// Returns true iff `p` lies inside or on the boundary of the triangle
/// `(a, b, c)`, judged by three same-sign orientation tests that admit
/// boundary points within ε.
///
/// The triangle may be given with either winding.
#[must_use]
pub fn triangle_contains(a: Point, b: Point, c: Point, p: Point, epsilon: f64) -> bool {
    let o1 = orientation(a, b, p, epsilon);
    let o2 = orientation(b, c, p, epsilon);
    let o3 = orientation(c, a, p, epsilon);

    let has_positive = [o1, o2, o3].contains(&Orientation::POSITIVE);
    let has_negative = [o1, o2, o3].contains(&Orientation::NEGATIVE);
    !(has_positive && has_negative)
}

/// Returns true iff `p` lies on the closed segment `(a, b)` within ε.
#[must_use]
pub fn point_on_segment(a: Point, b: Point, p: Point, epsilon: f64) -> bool {
    if orientation(a, b, p, epsilon) != Orientation::DEGENERATE {
        return false;
    }
    let ab = b - a;
    let t = (p - a).dot(ab);
    -epsilon < t && t < ab.magnitude2() + epsilon
}

/// Returns whether the closed segments `(p0, p1)` and `(q0, q1)` properly
/// cross: their interiors intersect in exactly one point. Shared endpoints
/// and mere touching (an endpoint on the other segment's line) do not count.
///
/// # Examples
///
/// ```rust
/// use cdt2d::geometry::point::Point;
/// use cdt2d::geometry::predicates::segments_cross;
///
/// let o = Point::new(0.0, 0.0);
/// let e = Point::new(1.0, 1.0);
/// assert!(segments_cross(o, e, Point::new(0.0, 1.0), Point::new(1.0, 0.0), 1e-6));
/// // Sharing an endpoint is not a crossing.
/// assert!(!segments_cross(o, e, e, Point::new(2.0, 0.0), 1e-6));
/// ```
#[must_use]
pub fn segments_cross(p0: Point, p1: Point, q0: Point, q1: Point, epsilon: f64) -> bool {
    let o1 = orientation(p0, p1, q0, epsilon);
    let o2 = orientation(p0, p1, q1, epsilon);
    let o3 = orientation(q0, q1, p0, epsilon);
    let o4 = orientation(q0, q1, p1, epsilon);

    // A proper crossing needs strictly opposite sides in both directions;
    // any degenerate orientation means an endpoint lies on the other line.
    o1 != o2
        && o3 != o4
        && o1 != Orientation::DEGENERATE
        && o2 != Orientation::DEGENERATE
        && o3 != Orientation::DEGENERATE
        && o4 != Orientation::DEGENERATE
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    #[test]
    fn orientation_signs() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(2.0, 0.0);

        assert_eq!(orientation(a, b, Point::new(1.0, 1.0), EPS), Orientation::POSITIVE);
        assert_eq!(orientation(a, b, Point::new(1.0, -1.0), EPS), Orientation::NEGATIVE);
        assert_eq!(orientation(a, b, Point::new(3.0, 0.0), EPS), Orientation::DEGENERATE);
        // Within tolerance of the line counts as degenerate.
        assert_eq!(
            orientation(a, b, Point::new(1.0, 1e-9), EPS),
            Orientation::DEGENERATE
        );
    }

    #[test]
    fn in_circle_margins() {
        let center = Point::new(0.0, 0.0);
        let r2 = 1.0;

        assert_eq!(in_circle(center, r2, Point::new(0.5, 0.0), EPS), InCircle::INSIDE);
        assert_eq!(in_circle(center, r2, Point::new(2.0, 0.0), EPS), InCircle::OUTSIDE);
        assert_eq!(in_circle(center, r2, Point::new(1.0, 0.0), EPS), InCircle::BOUNDARY);
        // Just inside the margin still reads as boundary.
        let almost = Point::new((1.0 - 1e-9_f64).sqrt(), 0.0);
        assert_eq!(in_circle(center, r2, almost, EPS), InCircle::BOUNDARY);
    }

    #[test]
    fn containment_admits_boundary() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(4.0, 0.0);
        let c = Point::new(0.0, 4.0);

        assert!(triangle_contains(a, b, c, Point::new(1.0, 1.0), EPS));
        assert!(triangle_contains(a, b, c, Point::new(2.0, 0.0), EPS)); // on an edge
        assert!(triangle_contains(a, b, c, a, EPS)); // on a corner
        assert!(!triangle_contains(a, b, c, Point::new(3.0, 3.0), EPS));
        // Winding must not matter.
        assert!(triangle_contains(a, c, b, Point::new(1.0, 1.0), EPS));
    }

    #[test]
    fn on_segment() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(2.0, 2.0);

        assert!(point_on_segment(a, b, Point::new(1.0, 1.0), EPS));
        assert!(point_on_segment(a, b, a, EPS));
        assert!(point_on_segment(a, b, b, EPS));
        assert!(!point_on_segment(a, b, Point::new(3.0, 3.0), EPS));
        assert!(!point_on_segment(a, b, Point::new(1.0, 0.0), EPS));
    }

    #[test]
    fn proper_crossing_only() {
        let p0 = Point::new(0.0, 0.0);
        let p1 = Point::new(2.0, 0.0);

        assert!(segments_cross(p0, p1, Point::new(1.0, -1.0), Point::new(1.0, 1.0), EPS));
        // T-junction: an endpoint on the other segment is not a crossing.
        assert!(!segments_cross(p0, p1, Point::new(1.0, 0.0), Point::new(1.0, 1.0), EPS));
        // Collinear overlap is not a proper crossing.
        assert!(!segments_cross(p0, p1, Point::new(1.0, 0.0), Point::new(3.0, 0.0), EPS));
        // Disjoint.
        assert!(!segments_cross(p0, p1, Point::new(0.0, 1.0), Point::new(2.0, 1.0), EPS));
    }
}
