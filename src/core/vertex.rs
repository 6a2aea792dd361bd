//! Data and operations on mesh vertices.
//!
//! A [`Vertex`] is a 2D point plus the set of edges incident to it. Vertices
//! are created on insertion, never move, and are only destroyed with the
//! mesh; their identity is coordinate equality within the configured ε,
//! enforced by the deduplicating insertion in
//! [`Mesh`](crate::core::mesh::Mesh).

use crate::core::edge::EdgeKey;
use crate::geometry::point::Point;
use slotmap::new_key_type;
use smallvec::SmallVec;

new_key_type! {
    /// Key type for accessing vertices in the mesh arena.
    ///
    /// Keys are versioned: after a slot is reused, stale keys no longer
    /// resolve, so handles held across mutations fail loudly instead of
    /// aliasing.
    pub struct VertexKey;
}

/// A mesh vertex: a fixed 2D position and its incident edges.
#[derive(Clone, Debug)]
pub struct Vertex {
    point: Point,
    pub(crate) edges: SmallVec<[EdgeKey; 8]>,
}

impl Vertex {
    pub(crate) fn new(point: Point) -> Self {
        Self {
            point,
            edges: SmallVec::new(),
        }
    }

    /// The position of this vertex.
    #[must_use]
    pub fn point(&self) -> Point {
        self.point
    }

    /// The edges incident to this vertex, in attachment order.
    #[must_use]
    pub fn edges(&self) -> &[EdgeKey] {
        &self.edges
    }

    /// The number of incident edges.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.edges.len()
    }

    pub(crate) fn attach_edge(&mut self, edge: EdgeKey) {
        if !self.edges.contains(&edge) {
            self.edges.push(edge);
        }
    }

    pub(crate) fn detach_edge(&mut self, edge: EdgeKey) {
        self.edges.retain(|e| *e != edge);
    }
}
