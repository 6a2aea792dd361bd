//! Data and operations on mesh triangles.
//!
//! A [`Triangle`] is an unordered triple of edges sharing three distinct
//! vertices. The vertex and edge arrays are kept aligned — `edges[0]`
//! connects `vertices[0]` and `vertices[1]`, `edges[1]` connects
//! `vertices[1]` and `vertices[2]`, `edges[2]` connects `vertices[2]` and
//! `vertices[0]` — so the algorithms can pair each rim edge with its
//! opposite vertex without lookups. The circumcircle and area are computed
//! once at creation; vertices never move, so the cache cannot go stale.

use crate::core::edge::EdgeKey;
use crate::core::vertex::VertexKey;
use crate::geometry::point::Point;
use slotmap::new_key_type;

new_key_type! {
    /// Key type for accessing triangles in the mesh arena.
    pub struct TriangleKey;
}

/// Returns the canonical (sorted) form of an unordered edge triple.
pub(crate) fn canonical_triple(mut edges: [EdgeKey; 3]) -> [EdgeKey; 3] {
    edges.sort_unstable();
    edges
}

/// A mesh triangle with cached geometry.
#[derive(Clone, Debug)]
pub struct Triangle {
    vertices: [VertexKey; 3],
    edges: [EdgeKey; 3],
    circumcenter: Point,
    circumradius2: f64,
    area: f64,
}

impl Triangle {
    pub(crate) fn new(
        vertices: [VertexKey; 3],
        edges: [EdgeKey; 3],
        circumcenter: Point,
        circumradius2: f64,
        area: f64,
    ) -> Self {
        Self {
            vertices,
            edges,
            circumcenter,
            circumradius2,
            area,
        }
    }

    /// The three vertices, aligned with [`Triangle::edges`].
    #[must_use]
    pub fn vertices(&self) -> [VertexKey; 3] {
        self.vertices
    }

    /// The three edges, aligned with [`Triangle::vertices`].
    #[must_use]
    pub fn edges(&self) -> [EdgeKey; 3] {
        self.edges
    }

    /// The center of the circle through the three vertices.
    #[must_use]
    pub fn circumcenter(&self) -> Point {
        self.circumcenter
    }

    /// The **squared** radius of the circumcircle.
    #[must_use]
    pub fn circumradius2(&self) -> f64 {
        self.circumradius2
    }

    /// The unsigned area of the triangle.
    #[must_use]
    pub fn area(&self) -> f64 {
        self.area
    }

    /// True iff `e` is one of this triangle's edges.
    #[must_use]
    pub fn has_edge(&self, e: EdgeKey) -> bool {
        self.edges.contains(&e)
    }

    /// True iff `v` is one of this triangle's vertices.
    #[must_use]
    pub fn has_vertex(&self, v: VertexKey) -> bool {
        self.vertices.contains(&v)
    }

    /// The vertex not belonging to the given endpoint pair, or `None` when
    /// the pair is not an edge of this triangle.
    #[must_use]
    pub fn vertex_opposite(&self, endpoints: [VertexKey; 2]) -> Option<VertexKey> {
        if !endpoints.iter().all(|v| self.has_vertex(*v)) {
            return None;
        }
        self.vertices
            .into_iter()
            .find(|v| !endpoints.contains(v))
    }

    /// The canonical identity of this triangle: its sorted edge triple.
    #[must_use]
    pub fn edge_triple(&self) -> [EdgeKey; 3] {
        canonical_triple(self.edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    #[test]
    fn opposite_vertex_lookup() {
        let mut varena: SlotMap<VertexKey, ()> = SlotMap::with_key();
        let vs: Vec<VertexKey> = (0..4).map(|_| varena.insert(())).collect();
        let mut earena: SlotMap<EdgeKey, ()> = SlotMap::with_key();
        let es: Vec<EdgeKey> = (0..3).map(|_| earena.insert(())).collect();

        let t = Triangle::new(
            [vs[0], vs[1], vs[2]],
            [es[0], es[1], es[2]],
            Point::new(0.0, 0.0),
            1.0,
            0.5,
        );

        assert_eq!(t.vertex_opposite([vs[0], vs[1]]), Some(vs[2]));
        assert_eq!(t.vertex_opposite([vs[2], vs[0]]), Some(vs[1]));
        assert_eq!(t.vertex_opposite([vs[0], vs[3]]), None);
        assert!(t.has_edge(es[1]));
        assert!(t.has_vertex(vs[2]));
    }

    #[test]
    fn edge_triple_is_sorted() {
        let mut earena: SlotMap<EdgeKey, ()> = SlotMap::with_key();
        let es: Vec<EdgeKey> = (0..3).map(|_| earena.insert(())).collect();
        let triple = canonical_triple([es[2], es[0], es[1]]);
        assert_eq!(triple, [es[0], es[1], es[2]]);
    }
}
