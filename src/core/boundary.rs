//! Boundary ring analysis.
//!
//! The mesh boundary is the set of edges with exactly one incident triangle;
//! the structural invariants keep it a simple closed polygon, so every
//! boundary vertex carries exactly two boundary edges and the ring can be
//! walked in one revolution. Exterior extension uses the walk to enumerate
//! attachment candidates for a vertex outside the hull.

use crate::core::edge::EdgeKey;
use crate::core::mesh::{Mesh, TriangulationError};
use crate::geometry::point::Point;
use crate::geometry::predicates::{orientation, Orientation};
use crate::geometry::util::{signed_area, triangle_perimeter};

impl Mesh {
    /// The edges with exactly one incident triangle, in arena order.
    #[must_use]
    pub fn boundary_edges(&self) -> Vec<EdgeKey> {
        self.edges()
            .iter()
            .filter(|(_, e)| e.is_boundary())
            .map(|(k, _)| k)
            .collect()
    }

    /// Walks the boundary ring once around, starting from an arbitrary
    /// boundary edge. Returns the ring in walk order, or an empty vector for
    /// a mesh without triangles.
    ///
    /// # Errors
    ///
    /// `Inconsistent` when the boundary does not form a single simple closed
    /// ring (an open chain, a pinched vertex, or multiple loops).
    pub(crate) fn walk_boundary(&self) -> Result<Vec<EdgeKey>, TriangulationError> {
        let boundary_count = self
            .edges()
            .iter()
            .filter(|(_, e)| e.is_boundary())
            .count();
        let Some((start, first)) = self.edges().iter().find(|(_, e)| e.is_boundary()) else {
            return Ok(Vec::new());
        };

        let [origin, mut cursor] = first.vertices();
        let mut ring = vec![start];
        let mut previous = start;
        while cursor != origin {
            if ring.len() > boundary_count {
                return Err(TriangulationError::inconsistent(
                    "boundary ring does not close",
                ));
            }
            let next = self
                .try_vertex(cursor)?
                .edges()
                .iter()
                .copied()
                .find(|&e| {
                    e != previous && self.edge(e).map_or(false, |edge| edge.is_boundary())
                })
                .ok_or_else(|| TriangulationError::inconsistent("open boundary ring"))?;
            cursor = self
                .try_edge(next)?
                .opposite(cursor)
                .ok_or_else(|| TriangulationError::inconsistent("boundary walk lost its vertex"))?;
            ring.push(next);
            previous = next;
        }

        if ring.len() != boundary_count {
            return Err(TriangulationError::inconsistent(
                "boundary has more than one loop",
            ));
        }
        Ok(ring)
    }

    /// Selects the boundary edge to attach an exterior point `p` to.
    ///
    /// An edge `(A, B)` is a candidate iff `p` and the third vertex of its
    /// one triangle lie strictly on opposite sides of the line `AB`, so the
    /// new triangle cannot overlap the mesh. Among candidates the one
    /// minimizing perimeter/area of `(p, A, B)` wins — the most equilateral
    /// attachment, which is deterministic and stable.
    pub(crate) fn best_visible_edge(
        &self,
        p: Point,
    ) -> Result<Option<EdgeKey>, TriangulationError> {
        let eps = self.epsilon();
        let mut best: Option<(f64, EdgeKey)> = None;

        for e in self.walk_boundary()? {
            let [pa, pb] = self.edge_points(e)?;
            let t = self.try_edge(e)?.triangles()[0];
            let opposite = self.opposite_vertex(t, e)?;
            let po = self.try_point(opposite)?;

            let side_p = orientation(pa, pb, p, eps);
            let side_o = orientation(pa, pb, po, eps);
            let visible = matches!(
                (side_p, side_o),
                (Orientation::POSITIVE, Orientation::NEGATIVE)
                    | (Orientation::NEGATIVE, Orientation::POSITIVE)
            );
            if !visible {
                continue;
            }

            let area = signed_area(pa, pb, p).abs();
            if 2.0 * area < eps {
                // Attaching here would create a sliver below tolerance.
                continue;
            }
            let score = triangle_perimeter(pa, pb, p) / area;
            if best.map_or(true, |(s, _)| score < s) {
                best = Some((score, e));
            }
        }
        Ok(best.map(|(_, e)| e))
    }
}

#[cfg(test)]
mod tests {
    use crate::core::mesh::Mesh;
    use crate::geometry::point::Point;

    fn square() -> Mesh {
        Mesh::from_polygon(&[
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ])
        .unwrap()
    }

    #[test]
    fn boundary_of_square_has_four_edges() {
        let mesh = square();
        assert_eq!(mesh.boundary_edges().len(), 4);
    }

    #[test]
    fn walk_covers_the_ring_once() {
        let mesh = square();
        let ring = mesh.walk_boundary().unwrap();
        assert_eq!(ring.len(), 4);
        // Every boundary edge appears exactly once.
        let mut sorted = ring.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 4);
    }

    #[test]
    fn empty_mesh_has_empty_ring() {
        let mesh = Mesh::new();
        assert!(mesh.walk_boundary().unwrap().is_empty());
    }

    #[test]
    fn visibility_selects_a_facing_edge() {
        let mesh = square();
        // A point to the right of the square sees only the x = 1 edge.
        let e = mesh
            .best_visible_edge(Point::new(2.0, 0.5))
            .unwrap()
            .expect("an exterior point must see a boundary edge");
        let [a, b] = mesh.edge_points(e).unwrap();
        assert_eq!(a.x, 1.0);
        assert_eq!(b.x, 1.0);
    }

    #[test]
    fn interior_point_sees_nothing() {
        let mesh = square();
        assert!(mesh
            .best_visible_edge(Point::new(0.5, 0.5))
            .unwrap()
            .is_none());
    }
}
