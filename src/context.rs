//! Search context - the artifacts a session queries
//!
//! Everything is loaded once by [`Session::init`]. The catalog and index are
//! immutable afterwards. The embedder stays next to them because ONNX
//! inference needs mutable access to its session.

use anyhow::{Context, Result};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::embeddings::{create_embedder, EmbeddingEngine};
use crate::index::{HnswIndex, VectorIndex};
use crate::resolver::{self, Resolution, ResolveError};

/// Immutable catalog + index pair
pub struct SearchContext {
    catalog: Catalog,
    index: Box<dyn VectorIndex>,
}

impl SearchContext {
    pub fn new(catalog: Catalog, index: Box<dyn VectorIndex>) -> Self {
        let context = Self { catalog, index };
        if !context.is_aligned() {
            tracing::warn!(
                catalog_rows = context.catalog.len(),
                index_vectors = context.index.len(),
                "index size does not match catalog size; some hits may fall outside the catalog"
            );
        }
        context
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn index(&self) -> &dyn VectorIndex {
        self.index.as_ref()
    }

    /// Whether the index holds exactly one vector per catalog row
    pub fn is_aligned(&self) -> bool {
        self.catalog.len() == self.index.len()
    }
}

/// A loaded context plus the embedder that feeds it
pub struct Session {
    context: SearchContext,
    embedder: Box<dyn EmbeddingEngine>,
}

impl Session {
    /// Load catalog, index and model; any failure aborts startup
    pub fn init(config: &Config) -> Result<Self> {
        tracing::info!("loading catalog");
        let catalog = Catalog::load(&config.catalog.path).context("Failed to load catalog")?;

        tracing::info!("loading vector index");
        let index = HnswIndex::load(
            &config.index.path,
            config.embeddings.dimensions,
            config.index.metric,
        )
        .context("Failed to load vector index")?;

        tracing::info!(model = %config.embeddings.model, "loading embedding model");
        let embedder =
            create_embedder(&config.embeddings).context("Failed to load embedding model")?;

        tracing::info!("all loaded");
        Ok(Self::new(
            SearchContext::new(catalog, Box::new(index)),
            embedder,
        ))
    }

    pub fn new(context: SearchContext, embedder: Box<dyn EmbeddingEngine>) -> Self {
        Self { context, embedder }
    }

    pub fn context(&self) -> &SearchContext {
        &self.context
    }

    pub fn model_name(&self) -> &str {
        self.embedder.model_name()
    }

    /// Resolve one query against the loaded artifacts
    pub fn resolve(&mut self, query: &str, k: usize) -> Result<Resolution, ResolveError> {
        resolver::resolve(&self.context, self.embedder.as_mut(), query, k)
    }
}
