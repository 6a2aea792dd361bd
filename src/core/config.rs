//! Configuration options recognized by the discretizer.

use serde::{Deserialize, Serialize};

/// How [`Mesh`](crate::core::mesh::Mesh) locates the triangle containing a
/// query point.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocateStrategy {
    /// Linear search over the triangle set.
    #[default]
    Linear,
    /// Walk from triangle to neighboring triangle toward the query point,
    /// falling back to the linear scan when the walk exits the mesh (which
    /// can happen on non-convex domains).
    Walk,
}

/// Tuning knobs shared by every operation on a mesh.
///
/// Build one with [`TriangulationConfigBuilder`]:
///
/// ```rust
/// use cdt2d::core::config::{LocateStrategy, TriangulationConfigBuilder};
///
/// let config = TriangulationConfigBuilder::default()
///     .epsilon(1e-9)
///     .locate_strategy(LocateStrategy::Walk)
///     .build()
///     .unwrap();
/// assert_eq!(config.epsilon, 1e-9);
/// ```
#[derive(Builder, Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[builder(default)]
pub struct TriangulationConfig {
    /// Tolerance used by every orientation, containment, and in-circle test.
    pub epsilon: f64,
    /// Safety cap on legalization and edge-cut iteration counts; exceeding
    /// it fails the operation with
    /// [`TriangulationError::NumericLimit`](crate::core::mesh::TriangulationError::NumericLimit).
    pub max_flip_depth: usize,
    /// Point-location strategy for interior insertion.
    pub locate_strategy: LocateStrategy,
}

impl Default for TriangulationConfig {
    fn default() -> Self {
        Self {
            epsilon: 1e-6,
            max_flip_depth: 100_000,
            locate_strategy: LocateStrategy::Linear,
        }
    }
}
