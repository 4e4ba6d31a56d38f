//! Assessment catalog - the static table the index was built from
//!
//! Loaded once at startup from the catalog CSV. Rows are addressed by their
//! 0-based position, which must match the keys stored in the vector index.

mod record;

pub use record::{format_flag, parse_flag, AssessmentRecord};

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;

/// Immutable, position-addressed collection of assessment records
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<AssessmentRecord>,
}

impl Catalog {
    /// Load the catalog from a CSV file with a header row
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("Catalog not found at: {}", path.display());
        }

        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open catalog: {}", path.display()))?;

        let catalog = Self::from_reader(file)
            .with_context(|| format!("Failed to parse catalog: {}", path.display()))?;

        tracing::debug!(rows = catalog.len(), path = %path.display(), "catalog loaded");
        Ok(catalog)
    }

    /// Parse catalog rows from any CSV source
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for (row, result) in csv_reader.deserialize::<AssessmentRecord>().enumerate() {
            let record = result.with_context(|| format!("Malformed catalog row {}", row))?;
            records.push(record);
        }

        Ok(Self { records })
    }

    /// Build a catalog from records already in memory
    pub fn from_records(records: Vec<AssessmentRecord>) -> Self {
        Self { records }
    }

    /// Record at the given row position
    pub fn get(&self, id: usize) -> Option<&AssessmentRecord> {
        self.records.get(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AssessmentRecord> {
        self.records.iter()
    }
}
