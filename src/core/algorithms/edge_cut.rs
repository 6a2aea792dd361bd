//! Forcing a straight segment into the mesh ("edge cutting").
//!
//! [`Mesh::cut_edge`] guarantees that the segment between two existing
//! vertices appears as a contiguous chain of mesh edges. Edges properly
//! crossed by the segment are processed nearest-first along it: a crossed
//! edge whose quadrilateral is strictly convex is flipped; one whose
//! quadrilateral is not is split at the crossing point, and the halves are
//! re-examined. When no crossings remain, the chain of edges collinear with
//! the segment is collected, marked constrained, and returned.

use crate::core::algorithms::legalize::quad_strictly_convex;
use crate::core::edge::EdgeKey;
use crate::core::mesh::{Mesh, TriangulationError};
use crate::core::vertex::VertexKey;
use crate::geometry::point::Point;
use crate::geometry::predicates::{point_on_segment, segments_cross};
use crate::geometry::util::segment_intersection;
use tracing::{debug, trace};

impl Mesh {
    /// Forces the segment `from → to` into the mesh and returns the chain of
    /// edges covering it, in order from `from` to `to`. The chain edges are
    /// marked constrained and thereafter exempt from legalization flips.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when either endpoint is not an existing mesh vertex,
    /// when the endpoints coincide, when the segment crosses the mesh
    /// boundary, or when it crosses a previously constrained edge;
    /// `NumericLimit` when the flip/split loop exceeds the configured cap.
    /// On error the mesh is unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use cdt2d::core::mesh::Mesh;
    /// use cdt2d::geometry::point::Point;
    ///
    /// let mut mesh = Mesh::from_polygon(&[
    ///     Point::new(0.0, 0.0),
    ///     Point::new(1.0, 0.0),
    ///     Point::new(1.0, 1.0),
    ///     Point::new(0.0, 1.0),
    /// ])
    /// .unwrap();
    /// let chain = mesh
    ///     .cut_edge(Point::new(0.0, 0.0), Point::new(1.0, 1.0))
    ///     .unwrap();
    /// assert_eq!(chain.len(), 1);
    /// assert!(mesh.edge(chain[0]).unwrap().is_constrained());
    /// ```
    pub fn cut_edge(
        &mut self,
        from: Point,
        to: Point,
    ) -> Result<Vec<EdgeKey>, TriangulationError> {
        let a = self.find_vertex(from).ok_or_else(|| {
            TriangulationError::invalid_input("cut segment start is not a mesh vertex")
        })?;
        let b = self.find_vertex(to).ok_or_else(|| {
            TriangulationError::invalid_input("cut segment end is not a mesh vertex")
        })?;
        if a == b {
            return Err(TriangulationError::invalid_input(
                "cut segment endpoints coincide",
            ));
        }

        let eps = self.epsilon();
        let pa = self.try_point(a)?;
        let pb = self.try_point(b)?;
        for e in self.boundary_edges() {
            let [q0, q1] = self.edge_points(e)?;
            if segments_cross(pa, pb, q0, q1, eps) {
                return Err(TriangulationError::invalid_input(
                    "cut segment crosses the mesh boundary",
                ));
            }
        }

        let checkpoint = self.clone();
        match self.force_segment(a, b) {
            Ok(chain) => {
                self.debug_validate();
                Ok(chain)
            }
            Err(err) => {
                *self = checkpoint;
                Err(err)
            }
        }
    }

    fn force_segment(
        &mut self,
        a: VertexKey,
        b: VertexKey,
    ) -> Result<Vec<EdgeKey>, TriangulationError> {
        let eps = self.epsilon();
        let pa = self.try_point(a)?;
        let pb = self.try_point(b)?;
        let cap = self.config().max_flip_depth;
        let mut steps = 0_usize;

        while let Some(e) = self.nearest_crossing_edge(pa, pb)? {
            steps += 1;
            if steps > cap {
                return Err(TriangulationError::NumericLimit {
                    max_flip_depth: cap,
                });
            }

            let edge = self.try_edge(e)?;
            if edge.is_constrained() {
                return Err(TriangulationError::invalid_input(
                    "cut segment crosses a constrained edge",
                ));
            }
            if edge.triangles().len() < 2 {
                return Err(TriangulationError::inconsistent(
                    "crossed edge has lost a triangle",
                ));
            }
            let [i, j] = edge.vertices();
            let (t1, t2) = (edge.triangles()[0], edge.triangles()[1]);
            let k = self.opposite_vertex(t1, e)?;
            let l = self.opposite_vertex(t2, e)?;
            let pi = self.try_point(i)?;
            let pj = self.try_point(j)?;
            let pk = self.try_point(k)?;
            let pl = self.try_point(l)?;

            if quad_strictly_convex(pi, pk, pj, pl, eps) {
                let (kl, _) = self.flip(e, t1, t2, i, j, k, l)?;
                trace!(crossed = ?e, "flipped crossed edge");
                // The new diagonal may itself land on the segment: pin it so
                // subsequent legalization cannot undo the progress.
                if point_on_segment(pa, pb, pk, eps) && point_on_segment(pa, pb, pl, eps) {
                    self.set_constrained(kl, true);
                }
            } else {
                let x = segment_intersection(pa, pb, pi, pj, eps).ok_or_else(|| {
                    TriangulationError::inconsistent("crossed edge is parallel to the cut segment")
                })?;
                trace!(crossed = ?e, at = %x, "split crossed edge");
                self.split_edge(e, x)?;
            }
        }

        let chain = self.collinear_chain(a, b)?;
        for &e in &chain {
            self.set_constrained(e, true);
        }

        // Settle the neighborhood of the forced chain; the chain itself is
        // now exempt.
        let mut seed: Vec<EdgeKey> = Vec::new();
        for &e in &chain {
            let [u, w] = self.try_edge(e)?.vertices();
            for corner in [u, w] {
                seed.extend(self.try_vertex(corner)?.edges().iter().copied());
            }
        }
        self.legalize(None, seed)?;

        debug!(edges = chain.len(), "forced segment into mesh");
        Ok(chain)
    }

    /// The edge properly crossing segment `(pa, pb)` whose crossing point is
    /// nearest to `pa`, if any.
    fn nearest_crossing_edge(
        &self,
        pa: Point,
        pb: Point,
    ) -> Result<Option<EdgeKey>, TriangulationError> {
        let eps = self.epsilon();
        let mut best: Option<(f64, EdgeKey)> = None;
        for (key, _) in self.edges().iter() {
            let [q0, q1] = self.edge_points(key)?;
            if !segments_cross(pa, pb, q0, q1, eps) {
                continue;
            }
            let x = segment_intersection(pa, pb, q0, q1, eps).ok_or_else(|| {
                TriangulationError::inconsistent("crossing edge is parallel to the cut segment")
            })?;
            let along = (x - pa).dot(pb - pa);
            if best.map_or(true, |(d, _)| along < d) {
                best = Some((along, key));
            }
        }
        Ok(best.map(|(_, e)| e))
    }

    /// Walks from `a` to `b` along edges whose far endpoint lies on the
    /// segment, always advancing toward `b`. Fails when the segment is not
    /// fully covered by collinear edges.
    fn collinear_chain(
        &self,
        a: VertexKey,
        b: VertexKey,
    ) -> Result<Vec<EdgeKey>, TriangulationError> {
        let eps = self.epsilon();
        let pa = self.try_point(a)?;
        let pb = self.try_point(b)?;
        let limit = self.number_of_edges() + 1;

        let mut chain: Vec<EdgeKey> = Vec::new();
        let mut cursor = a;
        let mut progress = 0.0_f64;
        while cursor != b {
            if chain.len() > limit {
                return Err(TriangulationError::inconsistent(
                    "segment cover walk does not terminate",
                ));
            }
            let mut next: Option<(f64, EdgeKey, VertexKey)> = None;
            for &e in self.try_vertex(cursor)?.edges() {
                let w = self
                    .try_edge(e)?
                    .opposite(cursor)
                    .ok_or_else(|| TriangulationError::inconsistent("edge incidence mismatch"))?;
                let pw = self.try_point(w)?;
                if !point_on_segment(pa, pb, pw, eps) {
                    continue;
                }
                let along = (pw - pa).dot(pb - pa);
                if along <= progress {
                    continue;
                }
                if next.map_or(true, |(d, _, _)| along < d) {
                    next = Some((along, e, w));
                }
            }
            let (along, e, w) = next.ok_or_else(|| {
                TriangulationError::inconsistent("forced segment is not covered by mesh edges")
            })?;
            chain.push(e);
            cursor = w;
            progress = along;
        }
        Ok(chain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Mesh {
        Mesh::from_polygon(&[
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(0.0, 1.0),
        ])
        .unwrap()
    }

    #[test]
    fn cutting_an_existing_chain_is_structural_noop() {
        let mut mesh = unit_square();
        mesh.add_interior_point(Point::new(0.5, 0.5)).unwrap();
        let (nv, ne, nt) = (
            mesh.number_of_vertices(),
            mesh.number_of_edges(),
            mesh.number_of_triangles(),
        );

        let chain = mesh
            .cut_edge(Point::new(0.0, 0.0), Point::new(1.0, 1.0))
            .unwrap();

        assert_eq!(chain.len(), 2);
        assert_eq!(mesh.number_of_vertices(), nv);
        assert_eq!(mesh.number_of_edges(), ne);
        assert_eq!(mesh.number_of_triangles(), nt);
        for e in &chain {
            assert!(mesh.edge(*e).unwrap().is_constrained());
        }
        assert!(mesh.is_valid().is_ok());
    }

    #[test]
    fn cutting_across_the_diagonal_flips_it() {
        let mut mesh = unit_square();
        // The bootstrap leaves one diagonal; cutting the other must flip it.
        let had_main = mesh
            .find_vertex(Point::new(0.0, 0.0))
            .zip(mesh.find_vertex(Point::new(1.0, 1.0)))
            .and_then(|(a, b)| mesh.edge_between(a, b))
            .is_some();
        let (from, to) = if had_main {
            (Point::new(0.0, 1.0), Point::new(1.0, 0.0))
        } else {
            (Point::new(0.0, 0.0), Point::new(1.0, 1.0))
        };

        let chain = mesh.cut_edge(from, to).unwrap();

        assert_eq!(chain.len(), 1);
        let [u, w] = mesh.edge(chain[0]).unwrap().vertices();
        let pu = mesh.vertex(u).unwrap().point();
        let pw = mesh.vertex(w).unwrap().point();
        assert!(point_on_segment(from, to, pu, 1e-6));
        assert!(point_on_segment(from, to, pw, 1e-6));
        assert!(mesh.edge(chain[0]).unwrap().is_constrained());
        assert_eq!(mesh.number_of_triangles(), 2);
        assert!(mesh.is_valid().is_ok());
    }

    #[test]
    fn unknown_endpoint_is_invalid() {
        let mut mesh = unit_square();
        assert!(matches!(
            mesh.cut_edge(Point::new(0.2, 0.2), Point::new(1.0, 1.0)),
            Err(TriangulationError::InvalidInput { .. })
        ));
    }

    #[test]
    fn coincident_endpoints_are_invalid() {
        let mut mesh = unit_square();
        assert!(matches!(
            mesh.cut_edge(Point::new(0.0, 0.0), Point::new(0.0, 0.0)),
            Err(TriangulationError::InvalidInput { .. })
        ));
    }

    #[test]
    fn segment_crossing_the_boundary_is_invalid() {
        // An L-shape; the chord from (2,0) to (1,2) exits through the notch,
        // properly crossing the boundary edge from (2,1) to (1,1).
        let mut mesh = Mesh::from_polygon(&[
            Point::new(0.0, 0.0),
            Point::new(2.0, 0.0),
            Point::new(2.0, 1.0),
            Point::new(1.0, 1.0),
            Point::new(1.0, 2.0),
            Point::new(0.0, 2.0),
        ])
        .unwrap();
        let before = mesh.number_of_edges();

        let result = mesh.cut_edge(Point::new(2.0, 0.0), Point::new(1.0, 2.0));

        assert!(matches!(
            result,
            Err(TriangulationError::InvalidInput { .. })
        ));
        assert_eq!(mesh.number_of_edges(), before);
        assert!(mesh.is_valid().is_ok());
    }

    #[test]
    fn crossing_a_constrained_edge_is_invalid() {
        let mut mesh = unit_square();
        mesh.cut_edge(Point::new(0.0, 0.0), Point::new(1.0, 1.0))
            .unwrap();

        // The opposite diagonal properly crosses the pinned one.
        let result = mesh.cut_edge(Point::new(1.0, 0.0), Point::new(0.0, 1.0));

        assert!(matches!(
            result,
            Err(TriangulationError::InvalidInput { .. })
        ));
        assert!(mesh.is_valid().is_ok());
    }

    #[test]
    fn cut_through_a_shared_vertex_of_a_constrained_chain_succeeds() {
        let mut mesh = unit_square();
        mesh.add_interior_point(Point::new(0.5, 0.5)).unwrap();
        mesh.cut_edge(Point::new(0.0, 0.0), Point::new(1.0, 1.0))
            .unwrap();

        // The opposite diagonal meets the constrained chain only at the
        // midpoint vertex, which is not a crossing.
        let chain = mesh
            .cut_edge(Point::new(1.0, 0.0), Point::new(0.0, 1.0))
            .unwrap();

        assert_eq!(chain.len(), 2);
        assert!(mesh.is_valid().is_ok());
    }
}
