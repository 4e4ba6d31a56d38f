//! Configuration
//!
//! Every field has a default, so the tool runs without any config file when
//! the artifacts sit in the default layout (see [`crate::paths`]).

use crate::index::Metric;
use crate::paths;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Smallest and largest number of recommendations per query
pub const MIN_TOP_K: usize = 1;
pub const MAX_TOP_K: usize = 10;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub catalog: CatalogConfig,
    pub index: IndexConfig,
    pub embeddings: EmbeddingsConfig,
    pub search: SearchConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    pub path: PathBuf,
    pub metric: Metric,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbeddingsConfig {
    pub model: String,
    pub model_dir: PathBuf,
    pub dimensions: usize,
    /// Prepended to queries for asymmetric models (BGE, E5)
    pub query_prefix: Option<String>,
    pub max_length: usize,
    /// Expected SHA-256 of the ONNX file; skipped when unset
    pub sha256: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub default_top_k: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub filename: PathBuf,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            path: paths::catalog(),
        }
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            path: paths::index(),
            metric: Metric::Cos,
        }
    }
}

impl Default for EmbeddingsConfig {
    fn default() -> Self {
        Self {
            model: paths::DEFAULT_MODEL.to_string(),
            model_dir: paths::model_dir(),
            dimensions: 384,
            query_prefix: None,
            max_length: 256,
            sha256: None,
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { default_top_k: 5 }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            filename: PathBuf::from(paths::EXPORT_FILENAME),
        }
    }
}

impl Config {
    /// Load configuration
    ///
    /// An explicit path must exist. Otherwise `./recommender.toml`, then the
    /// user config file, then built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let candidate = match explicit {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file not found: {}", path.display());
                }
                Some(path.to_path_buf())
            }
            None => std::iter::once(paths::local_config())
                .chain(paths::user_config())
                .find(|p| p.exists()),
        };

        let config = match candidate {
            Some(path) => {
                tracing::debug!(path = %path.display(), "reading config");
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read config: {}", path.display()))?;
                Self::from_toml(&content)
                    .with_context(|| format!("Failed to parse config: {}", path.display()))?
            }
            None => Self::default(),
        };

        Ok(config)
    }

    /// Parse, expand and validate a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content)?;
        config.expand_paths()?;
        config.validate()?;
        Ok(config)
    }

    fn expand_paths(&mut self) -> Result<()> {
        self.catalog.path = expand(&self.catalog.path)?;
        self.index.path = expand(&self.index.path)?;
        self.embeddings.model_dir = expand(&self.embeddings.model_dir)?;
        self.export.filename = expand(&self.export.filename)?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if !(MIN_TOP_K..=MAX_TOP_K).contains(&self.search.default_top_k) {
            anyhow::bail!(
                "search.default_top_k must be between {} and {}, got {}",
                MIN_TOP_K,
                MAX_TOP_K,
                self.search.default_top_k
            );
        }
        if self.embeddings.dimensions == 0 {
            anyhow::bail!("embeddings.dimensions must be positive");
        }
        Ok(())
    }
}

/// Expand `~` and `$VAR` in a configured path
fn expand(path: &Path) -> Result<PathBuf> {
    let raw = path.to_string_lossy();
    let expanded = shellexpand::full(&raw)
        .with_context(|| format!("Failed to expand path: {}", raw))?;
    Ok(PathBuf::from(expanded.as_ref()))
}
