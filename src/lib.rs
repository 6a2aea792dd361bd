//! # cdt2d
//!
//! An incremental two-dimensional constrained Delaunay triangulation engine.
//!
//! Given a simple polygon, the library produces a triangulation of its
//! interior whose triangles satisfy the empty-circumcircle (Delaunay)
//! property, and supports incremental refinement of the result:
//!
//! - interior point insertion with triangle splitting and edge legalization,
//! - extension past the current hull when a point falls outside the mesh,
//! - forcing straight-line segments into the mesh as chains of constrained
//!   edges ("edge cutting").
//!
//! # Basic Usage
//!
//! ```rust
//! use cdt2d::core::mesh::Mesh;
//! use cdt2d::geometry::point::Point;
//!
//! // Triangulate the unit square.
//! let square = [
//!     Point::new(0.0, 0.0),
//!     Point::new(1.0, 0.0),
//!     Point::new(1.0, 1.0),
//!     Point::new(0.0, 1.0),
//! ];
//! let mut mesh = Mesh::from_polygon(&square).unwrap();
//! assert_eq!(mesh.number_of_vertices(), 4);
//! assert_eq!(mesh.number_of_edges(), 5);
//! assert_eq!(mesh.number_of_triangles(), 2);
//!
//! // Refine with an interior point; the mesh stays Delaunay throughout.
//! mesh.add_interior_point(Point::new(0.5, 0.5)).unwrap();
//! assert_eq!(mesh.number_of_triangles(), 4);
//! let (delaunay, offenders) = mesh.is_delaunay();
//! assert!(delaunay, "unexpected offenders: {offenders:?}");
//! assert!(mesh.is_valid().is_ok());
//! ```
//!
//! # Forced edges
//!
//! [`Mesh::cut_edge`](core::mesh::Mesh::cut_edge) guarantees that a segment
//! between two existing vertices appears in the mesh as a contiguous chain
//! of edges. Forced edges are marked *constrained*: they are exempt from
//! legalization flips, so the refined mesh is a constrained Delaunay
//! triangulation rather than an unconstrained one.
//!
//! # Invariants
//!
//! After every public operation the mesh satisfies a set of structural
//! invariants — bidirectional adjacency closure between vertices, edges, and
//! triangles; one or two incident triangles per edge with the one-triangle
//! edges forming a simple closed boundary ring; well-formed triangles with
//! non-degenerate area; and the Euler relation V − E + F = 1. These are
//! checked by [`Mesh::is_valid`](core::mesh::Mesh::is_valid) and asserted in
//! debug builds at the end of each mutating operation. The Delaunay property
//! itself is reported by [`Mesh::is_delaunay`](core::mesh::Mesh::is_delaunay).
//!
//! # Tolerances
//!
//! All geometric predicates share a single tolerance ε (default `1e-6`),
//! configured through [`TriangulationConfig`](core::config::TriangulationConfig).
//! Tests are either of the form `|value| < ε` (equality with margin) or
//! `value + ε < bound` (strict with margin), applied with the same sign
//! convention everywhere to avoid flip oscillation.

// Forbid unsafe code throughout the entire crate
#![forbid(unsafe_code)]

#[macro_use]
extern crate derive_builder;

/// The `core` module contains the mesh data structure and the discretization
/// algorithms that build and refine triangulations.
pub mod core {
    /// Discretization algorithms: bootstrap, location, insertion, legalization, cutting.
    pub mod algorithms {
        /// Initial triangulation of a simple polygon by ear clipping.
        pub mod ear_clipping;
        /// Forcing a straight segment into the mesh as constrained edges.
        pub mod edge_cut;
        /// Point insertion: interior splits, perimeter streaming, hull extension.
        pub mod insertion;
        /// The edge legalizer: recursive flip engine for the Delaunay property.
        pub mod legalize;
        /// Point location strategies over the triangle set.
        pub mod locate;
    }
    pub mod boundary;
    pub mod config;
    pub mod edge;
    pub mod mesh;
    pub mod triangle;
    pub mod validation;
    pub mod vertex;
    pub use config::*;
    pub use edge::*;
    pub use mesh::*;
    pub use triangle::*;
    pub use vertex::*;
}

/// Contains the 2D geometric types and predicates: points, orientation,
/// in-circle classification, containment, segment intersection, and the
/// circumcircle construction.
pub mod geometry {
    pub mod point;
    pub mod predicates;
    pub mod util;
    pub use point::*;
    pub use predicates::*;
    pub use util::*;
}

/// A prelude module that re-exports the commonly used types.
pub mod prelude {
    pub use crate::core::{
        config::{LocateStrategy, TriangulationConfig, TriangulationConfigBuilder},
        edge::{Edge, EdgeKey},
        mesh::{Mesh, TriangulationError},
        triangle::{Triangle, TriangleKey},
        vertex::{Vertex, VertexKey},
    };
    pub use crate::geometry::{
        point::Point,
        predicates::{InCircle, Orientation},
        util::CircumcenterError,
    };
}

/// The function `is_normal` checks that structs implement `auto` traits.
/// Traits are checked at compile time, so this function is only used for
/// testing.
#[must_use]
pub const fn is_normal<T: Sized + Send + Sync + Unpin>() -> bool {
    true
}
