//! Structural and geometric validation.
//!
//! [`Mesh::is_valid`] checks the structural invariants that must hold after
//! every public operation: bidirectional adjacency closure, triangle
//! well-formedness, boundary shape, and the Euler relation.
//! [`Mesh::is_delaunay`] reports on the geometric invariant separately,
//! since a mesh with forced edges is intentionally only *constrained*
//! Delaunay.

use crate::core::mesh::{Mesh, TriangulationError};
use crate::core::triangle::TriangleKey;
use crate::geometry::predicates::{in_circle, InCircle};
use rustc_hash::FxHashSet;

impl Mesh {
    /// Tests the Delaunay condition on every interior, unconstrained edge:
    /// neither opposite vertex may lie strictly inside the circumcircle of
    /// the other triangle. Returns whether the mesh passes, together with
    /// every triangle participating in a violation.
    ///
    /// Constrained edges are exempt: after
    /// [`Mesh::cut_edge`](crate::core::mesh::Mesh::cut_edge) the mesh is a
    /// constrained Delaunay triangulation, and the forced edges are allowed
    /// to violate the empty-circumcircle property.
    #[must_use]
    pub fn is_delaunay(&self) -> (bool, Vec<TriangleKey>) {
        let eps = self.epsilon();
        let mut offending: FxHashSet<TriangleKey> = FxHashSet::default();

        for (e, edge) in self.edges().iter() {
            if edge.triangles().len() < 2 || edge.is_constrained() {
                continue;
            }
            let (t1, t2) = (edge.triangles()[0], edge.triangles()[1]);
            let (Ok(k), Ok(l)) = (self.opposite_vertex(t1, e), self.opposite_vertex(t2, e))
            else {
                continue;
            };
            let (Some(tri1), Some(tri2)) = (self.triangle(t1), self.triangle(t2)) else {
                continue;
            };
            let (Some(vk), Some(vl)) = (self.vertex(k), self.vertex(l)) else {
                continue;
            };

            let l_in_t1 = in_circle(tri1.circumcenter(), tri1.circumradius2(), vl.point(), eps)
                == InCircle::INSIDE;
            let k_in_t2 = in_circle(tri2.circumcenter(), tri2.circumradius2(), vk.point(), eps)
                == InCircle::INSIDE;
            if l_in_t1 || k_in_t2 {
                offending.insert(t1);
                offending.insert(t2);
            }
        }

        let mut result: Vec<TriangleKey> = offending.into_iter().collect();
        result.sort_unstable();
        (result.is_empty(), result)
    }

    /// Verifies the structural invariants. Returns the first violation as
    /// [`TriangulationError::Inconsistent`].
    ///
    /// Checked, in order: vertex↔edge closure and vertex dedup, edge↔triangle
    /// closure and lookup consistency, triangle well-formedness, boundary
    /// shape (every boundary vertex on exactly two boundary edges, forming
    /// one simple closed ring), and the Euler relation `V − E + F = 1` for a
    /// populated mesh.
    pub fn is_valid(&self) -> Result<(), TriangulationError> {
        self.validate_vertices()?;
        self.validate_edges()?;
        self.validate_triangles()?;
        self.validate_boundary()?;
        self.validate_euler()
    }

    pub(crate) fn debug_validate(&self) {
        #[cfg(debug_assertions)]
        if let Err(err) = self.is_valid() {
            panic!("mesh invariant violated after mutation: {err}");
        }
    }

    fn validate_vertices(&self) -> Result<(), TriangulationError> {
        let eps = self.epsilon();
        for (key, vertex) in self.vertices().iter() {
            let mut seen = FxHashSet::default();
            for &e in vertex.edges() {
                if !seen.insert(e) {
                    return Err(TriangulationError::inconsistent(
                        "duplicate edge in vertex incidence list",
                    ));
                }
                let edge = self
                    .edge(e)
                    .ok_or_else(|| TriangulationError::inconsistent("vertex references a dead edge"))?;
                if !edge.has_vertex(key) {
                    return Err(TriangulationError::inconsistent(
                        "vertex back-reference points at a foreign edge",
                    ));
                }
            }
        }
        // Structural identity: no two vertices within ε of each other.
        let keys: Vec<_> = self.vertices().iter().collect();
        for (i, (_, a)) in keys.iter().enumerate() {
            for (_, b) in keys.iter().skip(i + 1) {
                if a.point().distance(b.point()) < eps {
                    return Err(TriangulationError::inconsistent(format!(
                        "two vertices within tolerance at {}",
                        a.point()
                    )));
                }
            }
        }
        Ok(())
    }

    fn validate_edges(&self) -> Result<(), TriangulationError> {
        let populated = self.number_of_triangles() > 0;
        for (key, edge) in self.edges().iter() {
            let [a, b] = edge.vertices();
            if a == b {
                return Err(TriangulationError::inconsistent("zero-length edge stored"));
            }
            for v in [a, b] {
                let vertex = self.vertex(v).ok_or_else(|| {
                    TriangulationError::inconsistent("edge references a dead vertex")
                })?;
                if !vertex.edges().contains(&key) {
                    return Err(TriangulationError::inconsistent(
                        "edge is missing from its endpoint's incidence list",
                    ));
                }
            }
            match edge.triangles().len() {
                1 | 2 => {}
                0 if !populated => {}
                n => {
                    return Err(TriangulationError::inconsistent(format!(
                        "edge has {n} incident triangles"
                    )));
                }
            }
            for &t in edge.triangles() {
                let tri = self.triangle(t).ok_or_else(|| {
                    TriangulationError::inconsistent("edge references a dead triangle")
                })?;
                if !tri.has_edge(key) {
                    return Err(TriangulationError::inconsistent(
                        "edge back-reference points at a foreign triangle",
                    ));
                }
            }
            if self.edge_between(a, b) != Some(key) {
                return Err(TriangulationError::inconsistent(
                    "edge lookup table disagrees with the arena",
                ));
            }
        }
        Ok(())
    }

    fn validate_triangles(&self) -> Result<(), TriangulationError> {
        let eps = self.epsilon();
        for (key, tri) in self.triangles().iter() {
            let [a, b, c] = tri.vertices();
            if a == b || b == c || a == c {
                return Err(TriangulationError::inconsistent(
                    "triangle with duplicated vertices",
                ));
            }
            if 2.0 * tri.area() < eps {
                return Err(TriangulationError::inconsistent(
                    "triangle with area below tolerance",
                ));
            }
            // The three edges must pairwise share exactly one vertex and
            // jointly cover exactly the triangle's vertices.
            let expected = [[a, b], [b, c], [c, a]];
            for (e, pair) in tri.edges().into_iter().zip(expected) {
                let edge = self.edge(e).ok_or_else(|| {
                    TriangulationError::inconsistent("triangle references a dead edge")
                })?;
                if !edge.has_vertex(pair[0]) || !edge.has_vertex(pair[1]) {
                    return Err(TriangulationError::inconsistent(
                        "triangle edges are misaligned with its vertices",
                    ));
                }
                if !edge.triangles().contains(&key) {
                    return Err(TriangulationError::inconsistent(
                        "triangle is missing from its edge's incidence list",
                    ));
                }
            }
        }
        Ok(())
    }

    fn validate_boundary(&self) -> Result<(), TriangulationError> {
        if self.number_of_triangles() == 0 {
            return Ok(());
        }
        for (key, vertex) in self.vertices().iter() {
            let boundary_degree = vertex
                .edges()
                .iter()
                .filter(|&&e| self.edge(e).map_or(false, |edge| edge.is_boundary()))
                .count();
            let on_boundary = boundary_degree > 0;
            if on_boundary && boundary_degree != 2 {
                return Err(TriangulationError::inconsistent(format!(
                    "boundary vertex {key:?} has {boundary_degree} boundary edges"
                )));
            }
        }
        // A single simple closed ring; the walk enforces closure and count.
        self.walk_boundary().map(|_| ())
    }

    fn validate_euler(&self) -> Result<(), TriangulationError> {
        if self.number_of_triangles() == 0 {
            return Ok(());
        }
        for (key, vertex) in self.vertices().iter() {
            if vertex.degree() == 0 {
                return Err(TriangulationError::inconsistent(format!(
                    "isolated vertex {key:?} in a populated mesh"
                )));
            }
        }
        let euler = self.number_of_vertices() as i64 - self.number_of_edges() as i64
            + self.number_of_triangles() as i64;
        if euler != 1 {
            return Err(TriangulationError::inconsistent(format!(
                "Euler relation violated: V - E + F = {euler}"
            )));
        }
        Ok(())
    }
}
