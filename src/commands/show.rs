//! Show command - print one catalog record

use anyhow::{Context, Result};

use recommender::output;
use recommender::{Catalog, Config};

/// Execute show command
///
/// Only the catalog is loaded; the index and model are not needed.
pub fn execute(config: &Config, id: usize) -> Result<()> {
    let catalog = Catalog::load(&config.catalog.path)
        .context("Failed to load catalog")
        .context("Failed to load")?;

    let record = catalog.get(id).ok_or_else(|| {
        anyhow::anyhow!(
            "No catalog row {} (catalog has {} rows, ids 0-{})",
            id,
            catalog.len(),
            catalog.len().saturating_sub(1)
        )
    })?;

    output::print_record(id, record);
    Ok(())
}
