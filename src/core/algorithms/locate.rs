//! Point location over the triangle set.
//!
//! Two strategies are available through
//! [`LocateStrategy`](crate::core::config::LocateStrategy): a linear scan,
//! and a walk that steps from triangle to neighboring triangle toward the
//! query point. The walk can exit the mesh on non-convex domains even when
//! the point is inside another pocket, so it falls back to the scan instead
//! of reporting a miss.

use crate::core::config::LocateStrategy;
use crate::core::mesh::Mesh;
use crate::core::triangle::TriangleKey;
use crate::geometry::point::Point;
use crate::geometry::predicates::{orientation, triangle_contains, Orientation};

impl Mesh {
    /// Finds a triangle containing `p` (boundary included), if any.
    pub(crate) fn locate(&self, p: Point) -> Option<TriangleKey> {
        match self.config().locate_strategy {
            LocateStrategy::Linear => self.locate_linear(p),
            LocateStrategy::Walk => self.locate_walk(p),
        }
    }

    fn locate_linear(&self, p: Point) -> Option<TriangleKey> {
        let eps = self.epsilon();
        for (key, tri) in self.triangles().iter() {
            let [a, b, c] = tri.vertices();
            let (Some(va), Some(vb), Some(vc)) =
                (self.vertex(a), self.vertex(b), self.vertex(c))
            else {
                continue;
            };
            if triangle_contains(va.point(), vb.point(), vc.point(), p, eps) {
                return Some(key);
            }
        }
        None
    }

    fn locate_walk(&self, p: Point) -> Option<TriangleKey> {
        let eps = self.epsilon();
        let mut current = self.triangles().keys().next()?;
        // One visit per triangle suffices on a convex domain; anything more
        // means the walk is cycling or was ejected.
        let max_steps = self.number_of_triangles() + 1;

        for _ in 0..max_steps {
            let tri = self.triangle(current)?;
            let [a, b, c] = tri.vertices();
            let (Some(va), Some(vb), Some(vc)) =
                (self.vertex(a), self.vertex(b), self.vertex(c))
            else {
                return self.locate_linear(p);
            };
            if triangle_contains(va.point(), vb.point(), vc.point(), p, eps) {
                return Some(current);
            }

            let mut crossed: Option<TriangleKey> = None;
            for e in tri.edges() {
                let edge = self.edge(e)?;
                let [u, w] = edge.vertices();
                let (Some(vu), Some(vw)) = (self.vertex(u), self.vertex(w)) else {
                    return self.locate_linear(p);
                };
                let Some(opposite) = tri.vertex_opposite([u, w]) else {
                    return self.locate_linear(p);
                };
                let po = self.vertex(opposite)?.point();

                let side_p = orientation(vu.point(), vw.point(), p, eps);
                let side_o = orientation(vu.point(), vw.point(), po, eps);
                let separates = matches!(
                    (side_p, side_o),
                    (Orientation::POSITIVE, Orientation::NEGATIVE)
                        | (Orientation::NEGATIVE, Orientation::POSITIVE)
                );
                if separates {
                    crossed = edge.other_triangle(current);
                    break;
                }
            }
            match crossed {
                Some(next) => current = next,
                // Boundary hit or no separating edge: the point is outside
                // the hull, on an edge, or the domain is non-convex.
                None => return self.locate_linear(p),
            }
        }
        self.locate_linear(p)
    }
}
