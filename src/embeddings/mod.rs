//! Embeddings module - Turn query text into vectors
//!
//! Provides trait-based abstraction for embedding generation with ONNX backend.
//! The model is a pre-trained artifact; this module only runs inference.

mod onnx;
mod similarity;

pub use onnx::OnnxEmbedder;
pub use similarity::{cosine_distance, cosine_similarity, euclidean_distance};

use crate::config::EmbeddingsConfig;
use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Trait for embedding generation engines
pub trait EmbeddingEngine {
    /// Generate embedding for a single text
    fn embed(&mut self, text: &str) -> Result<Vec<f32>>;

    /// Generate embedding for a query text (with model-specific prefix if needed)
    ///
    /// For symmetric models (e.g., all-MiniLM), this is identical to embed().
    fn embed_query(&mut self, text: &str) -> Result<Vec<f32>> {
        self.embed(text)
    }

    /// Get embedding dimension (e.g., 384 for all-MiniLM-L6-v2)
    fn dimension(&self) -> usize;

    /// Get model name
    fn model_name(&self) -> &str;
}

/// Create the configured ONNX embedder
///
/// Prefers `model_quantized.onnx` over `model.onnx` when both exist, and
/// verifies the model checksum when one is configured.
pub fn create_embedder(config: &EmbeddingsConfig) -> Result<Box<dyn EmbeddingEngine>> {
    let model_path = resolve_model_file(&config.model_dir);
    let tokenizer_path = config.model_dir.join("tokenizer.json");

    if let Some(expected) = &config.sha256 {
        verify_checksum(&model_path, expected)?;
    }

    tracing::debug!(model = %config.model, path = %model_path.display(), "loading embedding model");

    Ok(Box::new(OnnxEmbedder::new_from_paths(
        &model_path,
        &tokenizer_path,
        &config.model,
        config.dimensions,
        config.query_prefix.clone(),
        config.max_length,
    )?))
}

/// Pick the ONNX file inside a model directory
pub fn resolve_model_file(model_dir: &Path) -> PathBuf {
    let quantized = model_dir.join("model_quantized.onnx");
    if quantized.exists() {
        quantized
    } else {
        model_dir.join("model.onnx")
    }
}

/// Compute the lowercase hex SHA-256 of a file
pub fn sha256_file(path: &Path) -> Result<String> {
    let mut file = std::fs::File::open(path)
        .with_context(|| format!("Failed to open {} for hashing", path.display()))?;

    let mut hasher = Sha256::new();
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = file.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Fail if a file's SHA-256 differs from the expected digest
pub fn verify_checksum(path: &Path, expected: &str) -> Result<()> {
    let actual = sha256_file(path)?;
    if actual != expected.trim().to_lowercase() {
        anyhow::bail!(
            "Checksum mismatch for {}!\n  Expected: {}\n  Got: {}",
            path.display(),
            expected,
            actual
        );
    }
    Ok(())
}
