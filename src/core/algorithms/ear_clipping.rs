//! Bootstrap of an initial triangulation from a simple polygon.
//!
//! The perimeter is validated (at least three vertices, pairwise distinct,
//! no self-intersection), normalized to a counter-clockwise ring, and then
//! triangulated by ear clipping: convex corners whose candidate triangle
//! contains no other ring vertex are clipped one at a time. Ear clipping
//! yields *a* triangulation, not a Delaunay one, so a full symmetric
//! legalization pass finishes the bootstrap.

use crate::core::config::TriangulationConfig;
use crate::core::edge::EdgeKey;
use crate::core::mesh::{Mesh, TriangulationError};
use crate::core::vertex::VertexKey;
use crate::geometry::point::Point;
use crate::geometry::predicates::{orientation, segments_cross, triangle_contains, Orientation};
use crate::geometry::util::polygon_area;
use tracing::debug;

/// Checks that `points` describe a simple polygon: at least three pairwise
/// distinct vertices and no crossing between non-adjacent perimeter
/// segments.
///
/// # Errors
///
/// `InvalidInput` on any violation. Zero enclosed area is *not* checked
/// here; the triangulation itself rejects it as `Degenerate`.
pub(crate) fn validate_polygon(
    points: &[Point],
    epsilon: f64,
) -> Result<(), TriangulationError> {
    let n = points.len();
    if n < 3 {
        return Err(TriangulationError::invalid_input(
            "a polygon needs at least three vertices",
        ));
    }
    for i in 0..n {
        for j in (i + 1)..n {
            if points[i].distance(points[j]) < epsilon {
                return Err(TriangulationError::invalid_input(format!(
                    "duplicate polygon vertices at {}",
                    points[i]
                )));
            }
        }
    }
    for i in 0..n {
        for j in (i + 1)..n {
            // Segments sharing a vertex are adjacent; the wrap-around pair
            // (last, first) is adjacent too.
            let adjacent = j == i + 1 || (i == 0 && j == n - 1);
            if adjacent {
                continue;
            }
            let (a0, a1) = (points[i], points[(i + 1) % n]);
            let (b0, b1) = (points[j], points[(j + 1) % n]);
            if segments_cross(a0, a1, b0, b1, epsilon) {
                return Err(TriangulationError::invalid_input(
                    "self-intersecting polygon",
                ));
            }
        }
    }
    Ok(())
}

impl Mesh {
    /// Creates a populated mesh covering the interior of a simple polygon,
    /// with the default configuration.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for fewer than three vertices, duplicate vertices, or
    /// a self-intersecting perimeter; `Degenerate` for a zero-area polygon.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cdt2d::core::mesh::Mesh;
    /// use cdt2d::geometry::point::Point;
    ///
    /// let pentagon = [
    ///     Point::new(0.0, 0.0),
    ///     Point::new(2.0, 0.0),
    ///     Point::new(3.0, 1.0),
    ///     Point::new(1.0, 2.0),
    ///     Point::new(-1.0, 1.0),
    /// ];
    /// let mesh = Mesh::from_polygon(&pentagon).unwrap();
    /// assert_eq!(mesh.number_of_triangles(), 3);
    /// assert!(mesh.is_delaunay().0);
    /// ```
    pub fn from_polygon(points: &[Point]) -> Result<Self, TriangulationError> {
        Self::from_polygon_with_config(points, TriangulationConfig::default())
    }

    /// Like [`Mesh::from_polygon`], with an explicit configuration.
    pub fn from_polygon_with_config(
        points: &[Point],
        config: TriangulationConfig,
    ) -> Result<Self, TriangulationError> {
        validate_polygon(points, config.epsilon)?;
        let mut mesh = Mesh::with_config(config);
        for &p in points {
            let v = mesh.insert_vertex(p);
            mesh.push_perimeter(v);
        }
        mesh.triangulate_perimeter()?;
        mesh.debug_validate();
        debug!(
            vertices = mesh.number_of_vertices(),
            triangles = mesh.number_of_triangles(),
            "bootstrapped polygon mesh"
        );
        Ok(mesh)
    }

    /// Triangulates the stored perimeter into an empty mesh by ear clipping,
    /// then legalizes the result into a Delaunay triangulation.
    pub(crate) fn triangulate_perimeter(&mut self) -> Result<(), TriangulationError> {
        if self.perimeter().len() < 3 {
            return Err(TriangulationError::invalid_input(
                "perimeter has fewer than three vertices",
            ));
        }
        let eps = self.epsilon();

        let mut ring: Vec<(VertexKey, Point)> = Vec::with_capacity(self.perimeter().len());
        for &v in self.perimeter() {
            ring.push((v, self.try_point(v)?));
        }
        let ring_points: Vec<Point> = ring.iter().map(|(_, p)| *p).collect();
        let area = polygon_area(&ring_points);
        if area.abs() < eps {
            return Err(TriangulationError::degenerate(
                "perimeter encloses no area",
            ));
        }
        // Normalize to counter-clockwise so convex corners read POSITIVE.
        if area < 0.0 {
            ring.reverse();
        }

        while ring.len() > 3 {
            let n = ring.len();
            let mut clipped = false;
            for idx in 0..n {
                let (prev, pp) = ring[(idx + n - 1) % n];
                let (cur, pc) = ring[idx];
                let (next, pn) = ring[(idx + 1) % n];
                if orientation(pp, pc, pn, eps) != Orientation::POSITIVE {
                    continue;
                }
                let blocked = ring.iter().any(|&(v, pv)| {
                    v != prev && v != cur && v != next && triangle_contains(pp, pc, pn, pv, eps)
                });
                if blocked {
                    continue;
                }
                let e1 = self.insert_edge(prev, cur)?;
                let e2 = self.insert_edge(cur, next)?;
                let e3 = self.insert_edge(prev, next)?;
                self.insert_triangle(e1, e2, e3)?;
                ring.remove(idx);
                clipped = true;
                break;
            }
            if !clipped {
                // Two-ears theorem: a simple polygon always has one. Not
                // finding one means the remainder is degenerate.
                return Err(TriangulationError::degenerate(
                    "polygon has no clippable ear",
                ));
            }
        }
        let e1 = self.insert_edge(ring[0].0, ring[1].0)?;
        let e2 = self.insert_edge(ring[1].0, ring[2].0)?;
        let e3 = self.insert_edge(ring[0].0, ring[2].0)?;
        self.insert_triangle(e1, e2, e3)?;

        let all_edges: Vec<EdgeKey> = self.edges().keys().collect();
        self.legalize(None, all_edges)
    }
}
