//! Geometric constructions for planar triangulation.
//!
//! The circumcircle construction here is the closed-form 2D solution of the
//! perpendicular-bisector system; the general d-dimensional treatment would
//! need a linear solver, which a planar mesh does not.

use crate::geometry::point::Point;
use thiserror::Error;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur during circumcircle construction.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum CircumcenterError {
    /// The three points are collinear, so no circumcircle exists.
    #[error("collinear points admit no circumcircle (determinant {determinant})")]
    CollinearPoints {
        /// The near-zero determinant of the bisector system.
        determinant: f64,
    },
}

// =============================================================================
// CONSTRUCTIONS
// =============================================================================

/// Computes the circumcircle of the triangle `(a, b, c)` as its center and
/// **squared** radius, from the intersection of the perpendicular bisectors
/// of `ab` and `ac`.
///
/// # Errors
///
/// Returns [`CircumcenterError::CollinearPoints`] when the points are
/// collinear within ε, in which case the bisectors are parallel.
///
/// # Examples
///
/// ```rust
/// use cdt2d::geometry::point::Point;
/// use cdt2d::geometry::util::circumcircle;
///
/// let (center, radius2) = circumcircle(
///     Point::new(0.0, 0.0),
///     Point::new(2.0, 0.0),
///     Point::new(0.0, 2.0),
///     1e-6,
/// )
/// .unwrap();
/// assert_eq!(center, Point::new(1.0, 1.0));
/// assert_eq!(radius2, 2.0);
/// ```
pub fn circumcircle(
    a: Point,
    b: Point,
    c: Point,
    epsilon: f64,
) -> Result<(Point, f64), CircumcenterError> {
    // The determinant of the bisector system; proportional to the signed
    // area, so it vanishes exactly on collinear input.
    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    if d.abs() < epsilon {
        return Err(CircumcenterError::CollinearPoints { determinant: d });
    }

    let a2 = a.magnitude2();
    let b2 = b.magnitude2();
    let c2 = c.magnitude2();
    let ux = (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d;
    let uy = (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d;

    let center = Point::new(ux, uy);
    Ok((center, center.distance2(a)))
}

/// The signed area of the triangle `(a, b, c)`: positive for a
/// counter-clockwise winding.
#[must_use]
pub fn signed_area(a: Point, b: Point, c: Point) -> f64 {
    0.5 * (b - a).cross(c - a)
}

/// The perimeter of the triangle `(a, b, c)`.
#[must_use]
pub fn triangle_perimeter(a: Point, b: Point, c: Point) -> f64 {
    a.distance(b) + b.distance(c) + c.distance(a)
}

/// The signed area of a polygon given by its vertices in order (shoelace
/// formula): positive for counter-clockwise orientation.
#[must_use]
pub fn polygon_area(points: &[Point]) -> f64 {
    let mut twice_area = 0.0;
    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        twice_area += p.cross(q);
    }
    0.5 * twice_area
}

/// Returns the intersection point of the lines through `(p0, p1)` and
/// `(q0, q1)`, or `None` when they are parallel within ε.
///
/// Callers that need a *segment* intersection should first establish a
/// proper crossing with
/// [`segments_cross`](crate::geometry::predicates::segments_cross).
#[must_use]
pub fn segment_intersection(
    p0: Point,
    p1: Point,
    q0: Point,
    q1: Point,
    epsilon: f64,
) -> Option<Point> {
    let r = p1 - p0;
    let s = q1 - q0;
    let denom = r.cross(s);
    if denom.abs() < epsilon {
        return None;
    }
    let t = (q0 - p0).cross(s) / denom;
    Some(p0 + r * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const EPS: f64 = 1e-6;

    #[test]
    fn circumcircle_right_triangle() {
        // Circumcenter of a right triangle sits on the hypotenuse midpoint.
        let (center, r2) = circumcircle(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            EPS,
        )
        .unwrap();
        assert_relative_eq!(center.x, 0.5);
        assert_relative_eq!(center.y, 0.5);
        assert_relative_eq!(r2, 0.5);
    }

    #[test]
    fn circumcircle_is_equidistant() {
        let a = Point::new(-1.3, 0.2);
        let b = Point::new(2.0, 1.7);
        let c = Point::new(0.4, -2.5);
        let (center, r2) = circumcircle(a, b, c, EPS).unwrap();

        assert_relative_eq!(center.distance2(a), r2, epsilon = 1e-12);
        assert_relative_eq!(center.distance2(b), r2, epsilon = 1e-12);
        assert_relative_eq!(center.distance2(c), r2, epsilon = 1e-12);
    }

    #[test]
    fn circumcircle_rejects_collinear() {
        let result = circumcircle(
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 2.0),
            EPS,
        );
        assert!(matches!(
            result,
            Err(CircumcenterError::CollinearPoints { .. })
        ));
    }

    #[test]
    fn areas() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(2.0, 0.0);
        let c = Point::new(0.0, 2.0);

        assert_relative_eq!(signed_area(a, b, c), 2.0);
        assert_relative_eq!(signed_area(a, c, b), -2.0);
        assert_relative_eq!(
            polygon_area(&[a, b, Point::new(2.0, 2.0), c]),
            4.0
        );
    }

    #[test]
    fn line_intersection() {
        let x = segment_intersection(
            Point::new(0.0, 0.0),
            Point::new(2.0, 2.0),
            Point::new(0.0, 2.0),
            Point::new(2.0, 0.0),
            EPS,
        )
        .unwrap();
        assert_relative_eq!(x.x, 1.0);
        assert_relative_eq!(x.y, 1.0);

        // Parallel lines have no intersection.
        assert!(segment_intersection(
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
            Point::new(1.0, 1.0),
            EPS,
        )
        .is_none());
    }
}
