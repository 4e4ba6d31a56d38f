//! USearch HNSW index loaded from disk

use super::{Metric, Neighbor, VectorIndex};
use anyhow::{Context, Result};
use std::path::Path;
use usearch::{Index, IndexOptions, MetricKind, ScalarKind};

/// Pre-built usearch index file
pub struct HnswIndex {
    index: Index,
}

impl HnswIndex {
    /// Load an index file built for `dimensions`-wide vectors
    ///
    /// Fails if the file is missing or was built for a different width.
    pub fn load(path: &Path, dimensions: usize, metric: Metric) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("Vector index not found at: {}", path.display());
        }

        let options = IndexOptions {
            dimensions,
            metric: metric_kind(metric),
            quantization: ScalarKind::F32,
            ..Default::default()
        };

        let index = Index::new(&options).with_context(|| "Failed to create index")?;

        let path_str = path
            .to_str()
            .ok_or_else(|| anyhow::anyhow!("Index path is not valid UTF-8: {}", path.display()))?;
        index
            .load(path_str)
            .with_context(|| format!("Failed to load index: {}", path.display()))?;

        if index.dimensions() != dimensions {
            anyhow::bail!(
                "Index {} holds {}-dimensional vectors but the embedding model produces {}",
                path.display(),
                index.dimensions(),
                dimensions
            );
        }

        tracing::debug!(vectors = index.size(), dimensions, path = %path.display(), "vector index loaded");
        Ok(Self { index })
    }
}

fn metric_kind(metric: Metric) -> MetricKind {
    match metric {
        Metric::Cos => MetricKind::Cos,
        Metric::L2sq => MetricKind::L2sq,
        Metric::Ip => MetricKind::IP,
    }
}

impl VectorIndex for HnswIndex {
    fn search(&self, query: &[f32], k: usize) -> Result<Vec<Neighbor>> {
        let matches = self
            .index
            .search(query, k)
            .with_context(|| "Vector search failed")?;

        Ok(matches
            .keys
            .iter()
            .zip(matches.distances.iter())
            .map(|(&key, &distance)| Neighbor { key, distance })
            .collect())
    }

    fn dimensions(&self) -> usize {
        self.index.dimensions()
    }

    fn len(&self) -> usize {
        self.index.size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_index(path: &Path, vectors: &[[f32; 3]]) {
        let options = IndexOptions {
            dimensions: 3,
            metric: MetricKind::Cos,
            quantization: ScalarKind::F32,
            ..Default::default()
        };
        let index = Index::new(&options).unwrap();
        index.reserve(vectors.len()).unwrap();
        for (key, v) in vectors.iter().enumerate() {
            index.add(key as u64, &v[..]).unwrap();
        }
        index.save(path.to_str().unwrap()).unwrap();
    }

    #[test]
    fn test_load_and_search() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.usearch");
        build_index(&path, &[[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.7, 0.7, 0.0]]);

        let index = HnswIndex::load(&path, 3, Metric::Cos).unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.dimensions(), 3);

        let hits = index.search(&[1.0, 0.1, 0.0], 2).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].key, 0);
        assert_eq!(hits[1].key, 2);
        assert!(hits[0].distance <= hits[1].distance);
    }

    #[test]
    fn test_dimension_mismatch_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.usearch");
        build_index(&path, &[[1.0, 0.0, 0.0]]);

        let err = HnswIndex::load(&path, 384, Metric::Cos).err().unwrap();
        let msg = format!("{:#}", err);
        assert!(
            msg.contains("3-dimensional") || msg.contains("Failed to load index"),
            "unexpected error: {}",
            msg
        );
    }

    #[test]
    fn test_missing_file() {
        let err = HnswIndex::load(Path::new("/nonexistent/index.usearch"), 384, Metric::Cos)
            .err()
            .unwrap();
        assert!(err.to_string().contains("Vector index not found"));
    }
}
