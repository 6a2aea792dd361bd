//! The owning container for triangulation state.
//!
//! [`Mesh`] holds the three entity arenas (vertices, edges, triangles), the
//! dedup side-tables keyed on structural identity, the ordered perimeter
//! sequence, and the configuration. Vertex↔edge and edge↔triangle
//! back-references form cycles; arena keys break them — forward and back
//! references are symmetric key pairs, and removals invalidate only the
//! versioned keys of the removed entities.
//!
//! All mutation goes through the deduplicating `insert_*` and the paired
//! `remove_*` methods, which maintain the back-references and side-tables
//! atomically. The discretization algorithms (in
//! [`algorithms`](crate::core::algorithms)) are built entirely on top of
//! these.

use crate::core::config::TriangulationConfig;
use crate::core::edge::{canonical_pair, Edge, EdgeKey};
use crate::core::triangle::{canonical_triple, Triangle, TriangleKey};
use crate::core::vertex::{Vertex, VertexKey};
use crate::geometry::point::Point;
use crate::geometry::util::{circumcircle, signed_area, CircumcenterError};
use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use thiserror::Error;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors surfaced by mesh operations.
///
/// Mutating operations are atomic with respect to observable mesh state: on
/// `Err` the mesh is left as it was before the call.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum TriangulationError {
    /// Attempted creation of a zero-length edge or a collinear/zero-area
    /// triangle or polygon.
    #[error("degenerate geometry: {message}")]
    Degenerate {
        /// What was degenerate.
        message: String,
    },
    /// Caller-supplied input was rejected: a perimeter with fewer than three
    /// vertices, a self-intersecting polygon, or a cut segment whose
    /// endpoints are not mesh vertices or which leaves the mesh.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// What was invalid.
        message: String,
    },
    /// An internal invariant check failed. Not recoverable; indicates a bug.
    #[error("internal invariant violated: {message}")]
    Inconsistent {
        /// Which invariant failed.
        message: String,
    },
    /// Legalization (or an edge cut) exceeded the configured
    /// [`max_flip_depth`](crate::core::config::TriangulationConfig::max_flip_depth).
    #[error("flip cascade exceeded {max_flip_depth} iterations")]
    NumericLimit {
        /// The configured cap that was hit.
        max_flip_depth: usize,
    },
    /// A circumcircle construction failed.
    #[error("circumcircle construction failed: {0}")]
    Circumcircle(#[from] CircumcenterError),
}

impl TriangulationError {
    pub(crate) fn degenerate(message: impl Into<String>) -> Self {
        Self::Degenerate {
            message: message.into(),
        }
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub(crate) fn inconsistent(message: impl Into<String>) -> Self {
        Self::Inconsistent {
            message: message.into(),
        }
    }
}

// =============================================================================
// MESH
// =============================================================================

/// A two-dimensional triangulated mesh with Delaunay maintenance.
///
/// Construct one with [`Mesh::from_polygon`] (or stream boundary points
/// through [`Mesh::add_perimeter_point`]), then refine with
/// [`Mesh::add_interior_point`] and [`Mesh::cut_edge`].
///
/// Entities are exclusively owned by the mesh; the keys handed out are
/// non-owning references whose validity spans until the next mutation that
/// could remove the referent (vertices are never removed, edges and
/// triangles can be consumed by flips and splits).
#[derive(Clone, Debug, Default)]
pub struct Mesh {
    vertices: SlotMap<VertexKey, Vertex>,
    edges: SlotMap<EdgeKey, Edge>,
    triangles: SlotMap<TriangleKey, Triangle>,
    /// Structural dedup: canonical vertex pair → edge.
    edge_lookup: FxHashMap<(VertexKey, VertexKey), EdgeKey>,
    /// Structural dedup: canonical edge triple → triangle.
    triangle_lookup: FxHashMap<[EdgeKey; 3], TriangleKey>,
    perimeter: Vec<VertexKey>,
    config: TriangulationConfig,
}

impl Mesh {
    /// Creates an empty mesh with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty mesh with the given configuration.
    #[must_use]
    pub fn with_config(config: TriangulationConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    // -------------------------------------------------------------------------
    // Read-only views
    // -------------------------------------------------------------------------

    /// The vertex arena.
    #[must_use]
    pub fn vertices(&self) -> &SlotMap<VertexKey, Vertex> {
        &self.vertices
    }

    /// The edge arena.
    #[must_use]
    pub fn edges(&self) -> &SlotMap<EdgeKey, Edge> {
        &self.edges
    }

    /// The triangle arena.
    #[must_use]
    pub fn triangles(&self) -> &SlotMap<TriangleKey, Triangle> {
        &self.triangles
    }

    /// The ordered perimeter sequence set at bootstrap (or accumulated by
    /// [`Mesh::add_perimeter_point`]).
    #[must_use]
    pub fn perimeter(&self) -> &[VertexKey] {
        &self.perimeter
    }

    /// The configuration this mesh was created with.
    #[must_use]
    pub fn config(&self) -> &TriangulationConfig {
        &self.config
    }

    /// The number of vertices.
    #[must_use]
    pub fn number_of_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// The number of edges.
    #[must_use]
    pub fn number_of_edges(&self) -> usize {
        self.edges.len()
    }

    /// The number of triangles.
    #[must_use]
    pub fn number_of_triangles(&self) -> usize {
        self.triangles.len()
    }

    /// Looks up a vertex by key.
    #[must_use]
    pub fn vertex(&self, v: VertexKey) -> Option<&Vertex> {
        self.vertices.get(v)
    }

    /// Looks up an edge by key.
    #[must_use]
    pub fn edge(&self, e: EdgeKey) -> Option<&Edge> {
        self.edges.get(e)
    }

    /// Looks up a triangle by key.
    #[must_use]
    pub fn triangle(&self, t: TriangleKey) -> Option<&Triangle> {
        self.triangles.get(t)
    }

    /// Finds the vertex whose coordinates match `p` within ε, if any.
    ///
    /// Coordinate identity under a tolerance cannot be hashed consistently,
    /// so this is a linear scan.
    #[must_use]
    pub fn find_vertex(&self, p: Point) -> Option<VertexKey> {
        let eps = self.config.epsilon;
        self.vertices
            .iter()
            .find(|(_, v)| v.point().distance(p) < eps)
            .map(|(k, _)| k)
    }

    /// Finds the edge joining two vertices, if any.
    #[must_use]
    pub fn edge_between(&self, a: VertexKey, b: VertexKey) -> Option<EdgeKey> {
        self.edge_lookup.get(&canonical_pair(a, b)).copied()
    }

    // -------------------------------------------------------------------------
    // Internal helpers
    // -------------------------------------------------------------------------

    pub(crate) fn epsilon(&self) -> f64 {
        self.config.epsilon
    }

    pub(crate) fn try_vertex(&self, v: VertexKey) -> Result<&Vertex, TriangulationError> {
        self.vertices
            .get(v)
            .ok_or_else(|| TriangulationError::inconsistent("stale vertex key"))
    }

    pub(crate) fn try_edge(&self, e: EdgeKey) -> Result<&Edge, TriangulationError> {
        self.edges
            .get(e)
            .ok_or_else(|| TriangulationError::inconsistent("stale edge key"))
    }

    pub(crate) fn try_triangle(&self, t: TriangleKey) -> Result<&Triangle, TriangulationError> {
        self.triangles
            .get(t)
            .ok_or_else(|| TriangulationError::inconsistent("stale triangle key"))
    }

    pub(crate) fn try_point(&self, v: VertexKey) -> Result<Point, TriangulationError> {
        Ok(self.try_vertex(v)?.point())
    }

    pub(crate) fn edge_points(&self, e: EdgeKey) -> Result<[Point; 2], TriangulationError> {
        let [a, b] = self.try_edge(e)?.vertices();
        Ok([self.try_point(a)?, self.try_point(b)?])
    }

    /// The vertex of triangle `t` opposite to its edge `e`.
    pub(crate) fn opposite_vertex(
        &self,
        t: TriangleKey,
        e: EdgeKey,
    ) -> Result<VertexKey, TriangulationError> {
        let endpoints = self.try_edge(e)?.vertices();
        self.try_triangle(t)?
            .vertex_opposite(endpoints)
            .ok_or_else(|| TriangulationError::inconsistent("edge is not part of triangle"))
    }

    pub(crate) fn push_perimeter(&mut self, v: VertexKey) {
        self.perimeter.push(v);
    }

    pub(crate) fn set_constrained(&mut self, e: EdgeKey, constrained: bool) {
        if let Some(edge) = self.edges.get_mut(e) {
            edge.set_constrained(constrained);
        }
    }

    // -------------------------------------------------------------------------
    // Mutation primitives
    // -------------------------------------------------------------------------

    /// Inserts a vertex, returning the existing one when `p` matches it
    /// within ε.
    pub(crate) fn insert_vertex(&mut self, p: Point) -> VertexKey {
        if let Some(v) = self.find_vertex(p) {
            return v;
        }
        self.vertices.insert(Vertex::new(p))
    }

    /// Inserts the edge `(a, b)`, returning the existing one for a known
    /// pair. Attaches the edge to both endpoints' incidence lists.
    ///
    /// # Errors
    ///
    /// `Degenerate` when `a == b`; `Inconsistent` when either endpoint is
    /// not in the mesh.
    pub(crate) fn insert_edge(
        &mut self,
        a: VertexKey,
        b: VertexKey,
    ) -> Result<EdgeKey, TriangulationError> {
        if a == b {
            return Err(TriangulationError::degenerate(
                "edge endpoints must be distinct",
            ));
        }
        if !self.vertices.contains_key(a) || !self.vertices.contains_key(b) {
            return Err(TriangulationError::inconsistent(
                "edge endpoint is not a mesh vertex",
            ));
        }
        let pair = canonical_pair(a, b);
        if let Some(&e) = self.edge_lookup.get(&pair) {
            return Ok(e);
        }
        let e = self.edges.insert(Edge::new(a, b));
        self.edge_lookup.insert(pair, e);
        if let Some(v) = self.vertices.get_mut(a) {
            v.attach_edge(e);
        }
        if let Some(v) = self.vertices.get_mut(b) {
            v.attach_edge(e);
        }
        Ok(e)
    }

    /// Inserts the triangle closed by three edges, returning the existing
    /// one for a known triple. Attaches the triangle to all three edges'
    /// incidence lists and caches circumcircle and area.
    ///
    /// # Errors
    ///
    /// `Degenerate` when the edges do not close a triangle on three distinct
    /// vertices or the enclosed area is below ε; `Inconsistent` when an edge
    /// already has two triangles.
    pub(crate) fn insert_triangle(
        &mut self,
        e1: EdgeKey,
        e2: EdgeKey,
        e3: EdgeKey,
    ) -> Result<TriangleKey, TriangulationError> {
        let triple = canonical_triple([e1, e2, e3]);
        if triple[0] == triple[1] || triple[1] == triple[2] {
            return Err(TriangulationError::degenerate(
                "triangle needs three distinct edges",
            ));
        }
        if let Some(&t) = self.triangle_lookup.get(&triple) {
            return Ok(t);
        }

        // Align vertices and edges: derive (a, b, c) with ab = e1, then
        // match e2/e3 onto bc and ca.
        let [a, b] = self.try_edge(e1)?.vertices();
        let v2 = self.try_edge(e2)?.vertices();
        let v3 = self.try_edge(e3)?.vertices();
        let c = *v2
            .iter()
            .find(|v| **v != a && **v != b)
            .ok_or_else(|| TriangulationError::degenerate("triangle edges share both endpoints"))?;
        let pair = |x, y| {
            let (lo, hi) = canonical_pair(x, y);
            [lo, hi]
        };
        let (bc, ca) = if v2 == pair(b, c) && v3 == pair(c, a) {
            (e2, e3)
        } else if v3 == pair(b, c) && v2 == pair(c, a) {
            (e3, e2)
        } else {
            return Err(TriangulationError::degenerate(
                "edges do not close a triangle",
            ));
        };

        let pa = self.try_point(a)?;
        let pb = self.try_point(b)?;
        let pc = self.try_point(c)?;
        let area = signed_area(pa, pb, pc).abs();
        // Same quantity the orientation predicate compares against ε, so a
        // corner triple reads DEGENERATE exactly when the triangle is
        // rejected here.
        if 2.0 * area < self.config.epsilon {
            return Err(TriangulationError::degenerate(format!(
                "zero-area triangle {pa} {pb} {pc}"
            )));
        }
        let (circumcenter, circumradius2) = circumcircle(pa, pb, pc, self.config.epsilon)?;

        for e in [e1, bc, ca] {
            if self.try_edge(e)?.triangles().len() >= 2 {
                return Err(TriangulationError::inconsistent(
                    "edge already belongs to two triangles",
                ));
            }
        }

        let t = self.triangles.insert(Triangle::new(
            [a, b, c],
            [e1, bc, ca],
            circumcenter,
            circumradius2,
            area,
        ));
        self.triangle_lookup.insert(triple, t);
        for e in [e1, bc, ca] {
            if let Some(edge) = self.edges.get_mut(e) {
                edge.attach_triangle(t);
            }
        }
        Ok(t)
    }

    /// Removes a triangle and detaches it from its edges.
    pub(crate) fn remove_triangle(&mut self, t: TriangleKey) -> Result<(), TriangulationError> {
        let tri = self
            .triangles
            .remove(t)
            .ok_or_else(|| TriangulationError::inconsistent("removing a missing triangle"))?;
        self.triangle_lookup.remove(&tri.edge_triple());
        for e in tri.edges() {
            if let Some(edge) = self.edges.get_mut(e) {
                edge.detach_triangle(t);
            }
        }
        Ok(())
    }

    /// Removes an edge that no triangle references and detaches it from its
    /// endpoints.
    pub(crate) fn remove_edge(&mut self, e: EdgeKey) -> Result<(), TriangulationError> {
        if !self.try_edge(e)?.triangles().is_empty() {
            return Err(TriangulationError::inconsistent(
                "removing an edge still referenced by triangles",
            ));
        }
        let edge = self
            .edges
            .remove(e)
            .ok_or_else(|| TriangulationError::inconsistent("removing a missing edge"))?;
        let [a, b] = edge.vertices();
        self.edge_lookup.remove(&canonical_pair(a, b));
        if let Some(v) = self.vertices.get_mut(a) {
            v.detach_edge(e);
        }
        if let Some(v) = self.vertices.get_mut(b) {
            v.detach_edge(e);
        }
        Ok(())
    }
}
