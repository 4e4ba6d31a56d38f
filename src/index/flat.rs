//! Exact in-memory index
//!
//! Brute-force cosine search. Useful for small catalogs and for exercising
//! the resolver without an index file.

use super::{Neighbor, VectorIndex};
use crate::embeddings::cosine_distance;
use anyhow::Result;

/// Vectors keyed by insertion position
#[derive(Debug, Clone)]
pub struct FlatIndex {
    dimensions: usize,
    vectors: Vec<Vec<f32>>,
}

impl FlatIndex {
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions,
            vectors: Vec::new(),
        }
    }

    /// Append a vector; its key is the number of vectors added before it
    pub fn add(&mut self, vector: Vec<f32>) -> Result<u64> {
        if vector.len() != self.dimensions {
            anyhow::bail!(
                "Vector has {} dimensions, index expects {}",
                vector.len(),
                self.dimensions
            );
        }
        self.vectors.push(vector);
        Ok((self.vectors.len() - 1) as u64)
    }
}

impl VectorIndex for FlatIndex {
    fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        if query.len() != self.dimensions {
            anyhow::bail!(
                "Query has {} dimensions, index expects {}",
                query.len(),
                self.dimensions
            );
        }

        let mut scored: Vec<Neighbor> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(key, v)| Neighbor {
                key: key as u64,
                distance: cosine_distance(query, v),
            })
            .collect();

        // Stable sort keeps insertion order for ties
        scored.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        scored.truncate(k);

        Ok(scored)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn len(&self) -> usize {
        self.vectors.len()
    }
}
