//! Check command - load every artifact and report how they line up

use anyhow::Result;
use colored::Colorize;
use serde_json::json;

use recommender::Config;

pub fn execute(config: &Config, json: bool) -> Result<()> {
    let session = super::load_session(config)?;
    let context = session.context();

    let catalog_rows = context.catalog().len();
    let index_vectors = context.index().len();
    let dimensions = context.index().dimensions();
    let aligned = context.is_aligned();

    if json {
        let report = json!({
            "catalog": {
                "path": config.catalog.path.display().to_string(),
                "rows": catalog_rows,
            },
            "index": {
                "path": config.index.path.display().to_string(),
                "vectors": index_vectors,
                "dimensions": dimensions,
            },
            "model": session.model_name(),
            "aligned": aligned,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Catalog:    {} ({} rows)", config.catalog.path.display(), catalog_rows);
    println!(
        "Index:      {} ({} vectors, {} dimensions)",
        config.index.path.display(),
        index_vectors,
        dimensions
    );
    println!("Model:      {}", session.model_name());
    if aligned {
        println!("Alignment:  {} one vector per catalog row", "✓".green());
    } else {
        println!(
            "Alignment:  {} index and catalog sizes differ; hits outside the catalog will be skipped",
            "✗".yellow()
        );
    }
    Ok(())
}
