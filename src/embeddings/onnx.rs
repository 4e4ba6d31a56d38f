//! ONNX Runtime embedder for sentence-transformer models (all-MiniLM-L6-v2)

use super::EmbeddingEngine;
use anyhow::{anyhow, bail, Context, Result};
use ndarray::Array2;
use ort::{inputs, session::Session, value::Value};
use std::path::Path;
use tokenizers::Tokenizer;

/// ONNX-based embedding generator
pub struct OnnxEmbedder {
    session: Session,
    tokenizer: Tokenizer,
    dimension: usize,
    model_name: String,
    query_prefix: Option<String>,
}

impl OnnxEmbedder {
    /// Create a new ONNX embedder from model and tokenizer files
    ///
    /// # Arguments
    /// * `model_path` - Path to ONNX model file
    /// * `tokenizer_path` - Path to tokenizer.json file
    /// * `model_name` - Human-readable model name (e.g., "all-MiniLM-L6-v2")
    /// * `dimension` - Embedding dimension (384 for small models, 768 for base models)
    /// * `query_prefix` - Optional prefix for query embeddings (for asymmetric models like BGE)
    /// * `max_length` - Token limit; longer inputs are truncated
    pub fn new_from_paths(
        model_path: &Path,
        tokenizer_path: &Path,
        model_name: &str,
        dimension: usize,
        query_prefix: Option<String>,
        max_length: usize,
    ) -> Result<Self> {
        if !model_path.exists() {
            bail!(
                "ONNX model not found at: {}\n\n\
                Download it with:\n  \
                mkdir -p $(dirname {}) && \\\n  \
                curl -L -o {} \\\n  \
                https://huggingface.co/Xenova/all-MiniLM-L6-v2/resolve/main/onnx/model_quantized.onnx",
                model_path.display(),
                model_path.display(),
                model_path.display()
            );
        }

        if !tokenizer_path.exists() {
            bail!(
                "Tokenizer not found at: {}\n\n\
                Download it with:\n  \
                curl -L -o {} \\\n  \
                  https://huggingface.co/sentence-transformers/all-MiniLM-L6-v2/resolve/main/tokenizer.json",
                tokenizer_path.display(),
                tokenizer_path.display()
            );
        }

        let session = Session::builder()
            .context("Failed to create ONNX session builder")?
            .commit_from_file(model_path)
            .context("Failed to load ONNX model")?;

        let mut tokenizer = Tokenizer::from_file(tokenizer_path)
            .map_err(|e| anyhow!("Failed to load tokenizer: {}", e))?;

        // Position embeddings stop at max_length; longer job descriptions would
        // otherwise fail to broadcast inside the model
        tokenizer
            .with_truncation(Some(tokenizers::TruncationParams {
                max_length,
                ..Default::default()
            }))
            .map_err(|e| anyhow!("Failed to configure truncation: {}", e))?;

        Ok(Self {
            session,
            tokenizer,
            dimension,
            model_name: model_name.to_string(),
            query_prefix,
        })
    }

    /// Tokenize text into input_ids and attention_mask
    fn tokenize(&self, text: &str) -> Result<(Vec<i64>, Vec<i64>)> {
        let encoding = self
            .tokenizer
            .encode(text, true) // Add special tokens ([CLS], [SEP])
            .map_err(|e| anyhow!("Tokenization failed: {}", e))?;

        let input_ids = encoding.get_ids().iter().map(|&x| x as i64).collect();
        let attention_mask = encoding
            .get_attention_mask()
            .iter()
            .map(|&x| x as i64)
            .collect();

        Ok((input_ids, attention_mask))
    }

    /// Run the model on a batch of one and return `[seq_len, hidden]` token states
    fn token_states(&mut self, input_ids: Vec<i64>, attention_mask: Vec<i64>) -> Result<Array2<f32>> {
        let seq_len = input_ids.len();
        let input_ids_array = Array2::from_shape_vec((1, seq_len), input_ids)
            .context("Failed to create input_ids array")?;
        let attention_mask_array = Array2::from_shape_vec((1, seq_len), attention_mask)
            .context("Failed to create attention_mask array")?;
        // Single-sentence input: every token belongs to segment 0
        let token_type_ids_array = Array2::from_shape_vec((1, seq_len), vec![0i64; seq_len])
            .context("Failed to create token_type_ids array")?;

        let outputs = self
            .session
            .run(inputs![
                "input_ids" => Value::from_array(input_ids_array)?,
                "attention_mask" => Value::from_array(attention_mask_array)?,
                "token_type_ids" => Value::from_array(token_type_ids_array)?
            ])
            .context("ONNX inference failed")?;

        let (shape, data) = outputs["last_hidden_state"]
            .try_extract_tensor::<f32>()
            .context("Failed to extract last_hidden_state tensor")?;

        // [batch=1, seq_len, hidden]
        let dims = shape.as_ref();
        if dims.len() != 3 {
            bail!("Expected 3D tensor, got shape: {:?}", dims);
        }
        let rows = dims[1] as usize;
        let hidden = dims[2] as usize;
        check_hidden_width(hidden, self.dimension)?;

        let states = Array2::from_shape_vec((rows, hidden), data[..rows * hidden].to_vec())
            .context("Failed to reshape token embeddings")?;
        Ok(states)
    }
}

/// The model's hidden size must equal the configured embedding dimension
pub(crate) fn check_hidden_width(hidden: usize, dimension: usize) -> Result<()> {
    if hidden != dimension {
        bail!(
            "Model produces {}-dimensional embeddings but embeddings.dimensions is {}",
            hidden,
            dimension
        );
    }
    Ok(())
}

/// Average token embeddings weighted by the attention mask
///
/// The result is as wide as the model's hidden state.
pub(crate) fn mean_pooling(token_embeddings: &Array2<f32>, attention_mask: &[i64]) -> Vec<f32> {
    let width = token_embeddings.ncols();
    let mask_sum: f32 = attention_mask.iter().map(|&x| x as f32).sum();
    if mask_sum == 0.0 {
        return vec![0.0; width];
    }

    let mut pooled = vec![0.0; width];
    for (i, &mask) in attention_mask.iter().enumerate() {
        if mask == 1 && i < token_embeddings.nrows() {
            for (slot, &value) in pooled.iter_mut().zip(token_embeddings.row(i)) {
                *slot += value;
            }
        }
    }

    pooled.iter().map(|&x| x / mask_sum).collect()
}

/// L2 normalize; zero vectors are returned unchanged
pub(crate) fn normalize(vec: &[f32]) -> Vec<f32> {
    let norm: f32 = vec.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm == 0.0 {
        return vec.to_vec();
    }
    vec.iter().map(|x| x / norm).collect()
}

impl EmbeddingEngine for OnnxEmbedder {
    fn embed_query(&mut self, text: &str) -> Result<Vec<f32>> {
        let input = match &self.query_prefix {
            Some(prefix) => format!("{}{}", prefix, text),
            None => text.to_string(),
        };
        self.embed(&input)
    }

    fn embed(&mut self, text: &str) -> Result<Vec<f32>> {
        let (input_ids, attention_mask) = self.tokenize(text)?;
        let states = self.token_states(input_ids, attention_mask.clone())?;
        let pooled = mean_pooling(&states, &attention_mask);
        Ok(normalize(&pooled))
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_pooling_respects_mask() {
        let states = Array2::from_shape_vec((3, 2), vec![1.0, 2.0, 3.0, 4.0, 100.0, 100.0]).unwrap();
        let pooled = mean_pooling(&states, &[1, 1, 0]);
        assert_relative_eq!(pooled[0], 2.0);
        assert_relative_eq!(pooled[1], 3.0);
    }

    #[test]
    fn test_mean_pooling_keeps_model_width() {
        let states = Array2::from_shape_vec((1, 3), vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(mean_pooling(&states, &[1]), vec![1.0, 2.0, 3.0]);
        assert_eq!(mean_pooling(&states, &[0]), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_hidden_width_must_match_configured_dimension() {
        assert!(check_hidden_width(384, 384).is_ok());

        let narrower = check_hidden_width(3, 2).unwrap_err().to_string();
        assert!(narrower.contains("3-dimensional"));
        assert!(narrower.contains("is 2"));

        let wider = check_hidden_width(768, 384).unwrap_err().to_string();
        assert!(wider.contains("768-dimensional"));
    }

    #[test]
    fn test_mean_pooling_all_masked() {
        let states = Array2::from_shape_vec((1, 2), vec![1.0, 2.0]).unwrap();
        assert_eq!(mean_pooling(&states, &[0]), vec![0.0, 0.0]);
    }

    #[test]
    fn test_normalize_unit_length() {
        let v = normalize(&[3.0, 4.0]);
        assert_relative_eq!(v[0], 0.6);
        assert_relative_eq!(v[1], 0.8);
        assert_eq!(normalize(&[0.0, 0.0]), vec![0.0, 0.0]);
    }

    #[test]
    fn test_missing_model_reports_download_hint() {
        let err = OnnxEmbedder::new_from_paths(
            Path::new("/nonexistent/model.onnx"),
            Path::new("/nonexistent/tokenizer.json"),
            "all-MiniLM-L6-v2",
            384,
            None,
            256,
        )
        .err()
        .unwrap();
        assert!(err.to_string().contains("ONNX model not found"));
    }
}
