//! The edge legalizer: the flip engine that re-establishes the Delaunay
//! property after a mutation.
//!
//! Legalization is modeled as an explicit worklist of candidate edges
//! processed to a fixed point. For each interior, unconstrained edge the
//! in-circle test decides legality; an illegal edge is flipped — the shared
//! diagonal of the two incident triangles is replaced by the other diagonal
//! of their quadrilateral — and the four rim edges are re-queued. Each flip
//! strictly decreases the number of circumcircle violations, so the cascade
//! halts; the configured `max_flip_depth` caps it defensively anyway.

use crate::core::edge::EdgeKey;
use crate::core::mesh::{Mesh, TriangulationError};
use crate::core::triangle::TriangleKey;
use crate::core::vertex::VertexKey;
use crate::geometry::point::Point;
use crate::geometry::predicates::{in_circle, orientation, InCircle, Orientation};
use rustc_hash::FxHashSet;
use std::collections::VecDeque;
use tracing::trace;

/// True iff the quadrilateral `a-b-c-d` (in ring order, either winding) is
/// strictly convex. A flip is only geometrically valid on a strictly convex
/// quadrilateral.
pub(crate) fn quad_strictly_convex(
    a: Point,
    b: Point,
    c: Point,
    d: Point,
    epsilon: f64,
) -> bool {
    let ring = [a, b, c, d];
    let mut winding: Option<Orientation> = None;
    for i in 0..4 {
        let o = orientation(ring[i], ring[(i + 1) % 4], ring[(i + 2) % 4], epsilon);
        if o == Orientation::DEGENERATE {
            return false;
        }
        match winding {
            None => winding = Some(o),
            Some(w) if w != o => return false,
            Some(_) => {}
        }
    }
    true
}

impl Mesh {
    /// Processes `seed` edges (and everything they cascade into) until every
    /// remaining candidate is legal.
    ///
    /// With a `focus` vertex — the vertex whose insertion triggered the
    /// cascade — the in-circle test is narrowed to the focus against the
    /// opposite triangle's circumcircle; without one, both opposite vertices
    /// are tested symmetrically. Constrained and boundary edges are skipped,
    /// as are keys staled by earlier flips.
    ///
    /// # Errors
    ///
    /// [`TriangulationError::NumericLimit`] when the cascade exceeds the
    /// configured `max_flip_depth`.
    pub(crate) fn legalize(
        &mut self,
        focus: Option<VertexKey>,
        seed: impl IntoIterator<Item = EdgeKey>,
    ) -> Result<(), TriangulationError> {
        let mut work: VecDeque<EdgeKey> = VecDeque::new();
        let mut queued: FxHashSet<EdgeKey> = FxHashSet::default();
        for e in seed {
            if queued.insert(e) {
                work.push_back(e);
            }
        }

        let eps = self.epsilon();
        let cap = self.config().max_flip_depth;
        let mut steps = 0_usize;

        while let Some(e) = work.pop_front() {
            queued.remove(&e);
            steps += 1;
            if steps > cap {
                return Err(TriangulationError::NumericLimit {
                    max_flip_depth: cap,
                });
            }

            // Staled by an earlier flip.
            let Some(edge) = self.edge(e) else { continue };
            if edge.is_constrained() || edge.triangles().len() < 2 {
                continue;
            }
            let [i, j] = edge.vertices();
            let (t1, t2) = (edge.triangles()[0], edge.triangles()[1]);

            let k = self.opposite_vertex(t1, e)?;
            let l = self.opposite_vertex(t2, e)?;
            let tri1 = self.try_triangle(t1)?;
            let tri2 = self.try_triangle(t2)?;
            let pk = self.try_point(k)?;
            let pl = self.try_point(l)?;
            let l_in_t1 =
                in_circle(tri1.circumcenter(), tri1.circumradius2(), pl, eps) == InCircle::INSIDE;
            let k_in_t2 =
                in_circle(tri2.circumcenter(), tri2.circumradius2(), pk, eps) == InCircle::INSIDE;

            let illegal = match focus {
                Some(f) if f == l => l_in_t1,
                Some(f) if f == k => k_in_t2,
                _ => l_in_t1 || k_in_t2,
            };
            if !illegal {
                continue;
            }

            let pi = self.try_point(i)?;
            let pj = self.try_point(j)?;
            if !quad_strictly_convex(pi, pk, pj, pl, eps) {
                // Defer: a neighboring flip may reshape the quadrilateral.
                // Once no other work remains nothing can, so drop the edge.
                if !work.is_empty() && queued.insert(e) {
                    work.push_back(e);
                }
                continue;
            }

            let (_, rim) = self.flip(e, t1, t2, i, j, k, l)?;
            for r in rim {
                if queued.insert(r) {
                    work.push_back(r);
                }
            }
        }
        Ok(())
    }

    /// Replaces the diagonal `e = (i, j)` of the quadrilateral `i-k-j-l`
    /// with `(k, l)`: removes `e` and its two triangles, inserts the new
    /// diagonal and the two triangles on it. Returns the new diagonal and
    /// the four rim edges `(ik, jk, jl, il)`.
    ///
    /// Callers must have established that the quadrilateral is strictly
    /// convex.
    pub(crate) fn flip(
        &mut self,
        e: EdgeKey,
        t1: TriangleKey,
        t2: TriangleKey,
        i: VertexKey,
        j: VertexKey,
        k: VertexKey,
        l: VertexKey,
    ) -> Result<(EdgeKey, [EdgeKey; 4]), TriangulationError> {
        let rim_missing =
            || TriangulationError::inconsistent("flip quadrilateral is missing a rim edge");
        let ik = self.edge_between(i, k).ok_or_else(rim_missing)?;
        let jk = self.edge_between(j, k).ok_or_else(rim_missing)?;
        let il = self.edge_between(i, l).ok_or_else(rim_missing)?;
        let jl = self.edge_between(j, l).ok_or_else(rim_missing)?;

        self.remove_triangle(t1)?;
        self.remove_triangle(t2)?;
        self.remove_edge(e)?;
        let kl = self.insert_edge(k, l)?;
        self.insert_triangle(ik, kl, il)?;
        self.insert_triangle(jk, kl, jl)?;
        trace!(removed = ?e, inserted = ?kl, "flipped edge");
        Ok((kl, [ik, jk, jl, il]))
    }
}
