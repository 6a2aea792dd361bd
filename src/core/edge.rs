//! Data and operations on mesh edges.
//!
//! An [`Edge`] is an unordered pair of distinct vertices plus the one or two
//! triangles that contain it. The canonical (sorted) vertex pair is the
//! structural identity used for deduplication. An edge may additionally be
//! *constrained* — forced into the mesh by
//! [`Mesh::cut_edge`](crate::core::mesh::Mesh::cut_edge) and thereafter
//! exempt from legalization flips.

use crate::core::triangle::TriangleKey;
use crate::core::vertex::VertexKey;
use slotmap::new_key_type;
use smallvec::SmallVec;

new_key_type! {
    /// Key type for accessing edges in the mesh arena.
    pub struct EdgeKey;
}

/// Returns the canonical (sorted) form of an unordered vertex pair.
#[must_use]
pub(crate) fn canonical_pair(a: VertexKey, b: VertexKey) -> (VertexKey, VertexKey) {
    if a <= b { (a, b) } else { (b, a) }
}

/// A mesh edge: an unordered pair of vertices and its incident triangles.
///
/// Every stored edge has one incident triangle (a boundary edge) or two (an
/// interior edge) outside the brief mutation windows of an in-progress
/// operation.
#[derive(Clone, Debug)]
pub struct Edge {
    vertices: [VertexKey; 2],
    pub(crate) triangles: SmallVec<[TriangleKey; 2]>,
    constrained: bool,
}

impl Edge {
    pub(crate) fn new(a: VertexKey, b: VertexKey) -> Self {
        let (a, b) = canonical_pair(a, b);
        Self {
            vertices: [a, b],
            triangles: SmallVec::new(),
            constrained: false,
        }
    }

    /// The two endpoints, in canonical order.
    #[must_use]
    pub fn vertices(&self) -> [VertexKey; 2] {
        self.vertices
    }

    /// The incident triangles (one for a boundary edge, two for an interior
    /// edge).
    #[must_use]
    pub fn triangles(&self) -> &[TriangleKey] {
        &self.triangles
    }

    /// True iff this edge has exactly one incident triangle.
    #[must_use]
    pub fn is_boundary(&self) -> bool {
        self.triangles.len() == 1
    }

    /// True iff this edge was forced by an edge cut and is exempt from
    /// flipping.
    #[must_use]
    pub fn is_constrained(&self) -> bool {
        self.constrained
    }

    /// True iff `v` is one of the endpoints.
    #[must_use]
    pub fn has_vertex(&self, v: VertexKey) -> bool {
        self.vertices.contains(&v)
    }

    /// The endpoint other than `v`, or `None` when `v` is not an endpoint.
    #[must_use]
    pub fn opposite(&self, v: VertexKey) -> Option<VertexKey> {
        match self.vertices {
            [a, b] if a == v => Some(b),
            [a, b] if b == v => Some(a),
            _ => None,
        }
    }

    /// The incident triangle other than `t`, or `None` for a boundary edge
    /// (or when `t` is not incident).
    #[must_use]
    pub fn other_triangle(&self, t: TriangleKey) -> Option<TriangleKey> {
        match self.triangles.as_slice() {
            [t1, t2] if *t1 == t => Some(*t2),
            [t1, t2] if *t2 == t => Some(*t1),
            _ => None,
        }
    }

    pub(crate) fn set_constrained(&mut self, constrained: bool) {
        self.constrained = constrained;
    }

    pub(crate) fn attach_triangle(&mut self, t: TriangleKey) {
        if !self.triangles.contains(&t) {
            self.triangles.push(t);
        }
    }

    pub(crate) fn detach_triangle(&mut self, t: TriangleKey) {
        self.triangles.retain(|x| *x != t);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn vertex_keys(n: usize) -> Vec<VertexKey> {
        let mut arena: SlotMap<VertexKey, ()> = SlotMap::with_key();
        (0..n).map(|_| arena.insert(())).collect()
    }

    #[test]
    fn canonical_order_is_stable() {
        let vs = vertex_keys(2);
        let e1 = Edge::new(vs[0], vs[1]);
        let e2 = Edge::new(vs[1], vs[0]);
        assert_eq!(e1.vertices(), e2.vertices());
    }

    #[test]
    fn endpoint_queries() {
        let vs = vertex_keys(3);
        let e = Edge::new(vs[0], vs[1]);

        assert!(e.has_vertex(vs[0]));
        assert!(!e.has_vertex(vs[2]));
        assert_eq!(e.opposite(vs[0]), Some(vs[1]));
        assert_eq!(e.opposite(vs[2]), None);
    }

    #[test]
    fn triangle_incidence() {
        let vs = vertex_keys(2);
        let mut tris: SlotMap<TriangleKey, ()> = SlotMap::with_key();
        let t1 = tris.insert(());
        let t2 = tris.insert(());

        let mut e = Edge::new(vs[0], vs[1]);
        assert!(!e.is_boundary());

        e.attach_triangle(t1);
        assert!(e.is_boundary());
        assert_eq!(e.other_triangle(t1), None);

        e.attach_triangle(t2);
        assert!(!e.is_boundary());
        assert_eq!(e.other_triangle(t1), Some(t2));
        assert_eq!(e.other_triangle(t2), Some(t1));

        e.detach_triangle(t1);
        assert_eq!(e.triangles(), &[t2]);
    }
}
