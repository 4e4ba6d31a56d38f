//! Default filesystem layout.
//!
//! This module defines WHERE data lives. It has no I/O and no validation.
//! Relative paths resolve against the working directory.
//!
//! ```text
//! ./
//! ├── recommender.toml                 # Optional project config
//! ├── data/
//! │   ├── shl_catalog_detailed.csv     # Catalog (row position = index key)
//! │   └── shl_assessments_index.usearch
//! ├── resources/models/all-minilm-l6-v2/
//! │   ├── model_quantized.onnx         # Preferred when present
//! │   ├── model.onnx
//! │   └── tokenizer.json
//! └── shl_recommendations.csv          # Written only on export
//! ```

use std::path::PathBuf;

/// Default embedding model name
pub const DEFAULT_MODEL: &str = "all-MiniLM-L6-v2";

/// Default CSV export file name
pub const EXPORT_FILENAME: &str = "shl_recommendations.csv";

/// Project-local config file: `./recommender.toml`
pub fn local_config() -> PathBuf {
    PathBuf::from("recommender.toml")
}

/// User config file: `<config_dir>/assessment-recommender/config.toml`
pub fn user_config() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("assessment-recommender").join("config.toml"))
}

/// Data directory: `./data/`
pub fn data_dir() -> PathBuf {
    PathBuf::from("data")
}

/// Catalog dataset: `./data/shl_catalog_detailed.csv`
pub fn catalog() -> PathBuf {
    data_dir().join("shl_catalog_detailed.csv")
}

/// Vector index: `./data/shl_assessments_index.usearch`
pub fn index() -> PathBuf {
    data_dir().join("shl_assessments_index.usearch")
}

/// Model directory: `./resources/models/all-minilm-l6-v2/`
pub fn model_dir() -> PathBuf {
    PathBuf::from("resources/models/all-minilm-l6-v2")
}
