//! Vector index - nearest-neighbor search over catalog embeddings
//!
//! The index file is built elsewhere; this module only loads and queries it.
//! Keys stored in the index are catalog row positions.

mod flat;
mod hnsw;

pub use flat::FlatIndex;
pub use hnsw::HnswIndex;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// One search hit: catalog key plus the index's distance to the query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub key: u64,
    pub distance: f32,
}

/// Distance metric the index was built with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Cosine distance (`1 - cos`)
    #[default]
    Cos,
    /// Squared euclidean distance
    L2sq,
    /// Inner product distance (`1 - dot`)
    Ip,
}

/// Read-only k-nearest-neighbor search
pub trait VectorIndex {
    /// Up to `k` neighbors, closest first
    fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>>;

    /// Vector dimensionality the index expects
    fn dimensions(&self) -> usize;

    /// Number of stored vectors
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
