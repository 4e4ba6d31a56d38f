//! Query resolver - query text in, ranked recommendations out
//!
//! Embeds the query, asks the index for the k nearest catalog keys, and turns
//! each key into a display-ready [`Recommendation`]. Results keep the index's
//! order. A key that cannot be turned into a row becomes a [`RowFailure`]
//! and the remaining rows are still returned.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::catalog::AssessmentRecord;
use crate::config::{MAX_TOP_K, MIN_TOP_K};
use crate::context::SearchContext;
use crate::embeddings::EmbeddingEngine;

/// Errors that stop a query from producing any result set
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("query is empty")]
    EmptyQuery,

    #[error("number of results must be between {min} and {max}, got {k}")]
    InvalidTopK { k: usize, min: usize, max: usize },

    #[error("failed to embed query: {0:#}")]
    Embedding(anyhow::Error),

    #[error("query embedding has {actual} dimensions, index expects {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("vector search failed: {0:#}")]
    Search(anyhow::Error),
}

/// Why a single search hit was dropped from the result set
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowFailureReason {
    #[error("key is outside the catalog ({catalog_len} rows)")]
    OutOfRange { catalog_len: usize },

    #[error("catalog row has no assessment name")]
    MissingName,

    #[error("catalog row has no URL")]
    MissingUrl,
}

/// A search hit that could not be turned into a recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowFailure {
    /// 1-based position in the index's result list
    pub rank: usize,
    pub key: u64,
    pub reason: RowFailureReason,
}

impl fmt::Display for RowFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} (key {}): {}", self.rank, self.key, self.reason)
    }
}

/// Assessment name paired with its catalog URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssessmentLink {
    pub name: String,
    pub url: String,
}

impl fmt::Display for AssessmentLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]({})", self.name, self.url)
    }
}

/// One display-ready result row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    /// 1-based position in the index's result list
    pub rank: usize,
    /// Catalog row position
    pub id: usize,
    pub assessment: AssessmentLink,
    pub description: String,
    pub remote_testing: bool,
    pub adaptive_irt: bool,
    pub duration: String,
    /// Resolved labels, or the raw code when unrecognised
    pub test_types: Vec<String>,
}

impl Recommendation {
    /// Build a recommendation from a catalog row, rejecting rows that cannot be linked
    pub fn from_record(
        rank: usize,
        id: usize,
        record: &AssessmentRecord,
    ) -> Result<Self, RowFailureReason> {
        if record.name.trim().is_empty() {
            return Err(RowFailureReason::MissingName);
        }
        if record.url.trim().is_empty() {
            return Err(RowFailureReason::MissingUrl);
        }

        Ok(Self {
            rank,
            id,
            assessment: AssessmentLink {
                name: record.name.clone(),
                url: record.url.clone(),
            },
            description: record.description.clone(),
            remote_testing: record.remote_testing,
            adaptive_irt: record.adaptive_irt,
            duration: record.duration.clone(),
            test_types: record.test_types(),
        })
    }
}

/// Everything one query produced
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    pub query: String,
    pub top_k: usize,
    pub recommendations: Vec<Recommendation>,
    pub failures: Vec<RowFailure>,
}

/// Check a requested result count against the supported range
pub fn validate_top_k(k: usize) -> Result<(), ResolveError> {
    if (MIN_TOP_K..=MAX_TOP_K).contains(&k) {
        Ok(())
    } else {
        Err(ResolveError::InvalidTopK {
            k,
            min: MIN_TOP_K,
            max: MAX_TOP_K,
        })
    }
}

/// Resolve a query into at most `k` recommendations, best match first
pub fn resolve(
    context: &SearchContext,
    embedder: &mut dyn EmbeddingEngine,
    query: &str,
    k: usize,
) -> Result<Resolution, ResolveError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(ResolveError::EmptyQuery);
    }
    validate_top_k(k)?;

    let embedding = embedder
        .embed_query(query)
        .map_err(ResolveError::Embedding)?;

    let expected = context.index().dimensions();
    if embedding.len() != expected {
        return Err(ResolveError::DimensionMismatch {
            expected,
            actual: embedding.len(),
        });
    }

    let neighbors = context
        .index()
        .search(&embedding, k)
        .map_err(ResolveError::Search)?;

    let catalog = context.catalog();
    let mut recommendations = Vec::with_capacity(neighbors.len());
    let mut failures = Vec::new();

    for (position, neighbor) in neighbors.iter().take(k).enumerate() {
        let rank = position + 1;
        tracing::debug!(rank, key = neighbor.key, distance = neighbor.distance, "search hit");

        let row = usize::try_from(neighbor.key)
            .ok()
            .and_then(|id| catalog.get(id).map(|record| (id, record)));

        let outcome = match row {
            Some((id, record)) => Recommendation::from_record(rank, id, record),
            None => Err(RowFailureReason::OutOfRange {
                catalog_len: catalog.len(),
            }),
        };

        match outcome {
            Ok(recommendation) => recommendations.push(recommendation),
            Err(reason) => {
                let failure = RowFailure {
                    rank,
                    key: neighbor.key,
                    reason,
                };
                tracing::warn!(%failure, "skipping search hit");
                failures.push(failure);
            }
        }
    }

    tracing::info!(
        query,
        k,
        returned = recommendations.len(),
        skipped = failures.len(),
        "query resolved"
    );

    Ok(Resolution {
        query: query.to_string(),
        top_k: k,
        recommendations,
        failures,
    })
}
