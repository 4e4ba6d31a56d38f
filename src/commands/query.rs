//! Query command - one-shot recommendation lookup

use anyhow::Result;
use colored::Colorize;
use std::path::PathBuf;

use recommender::output::{self, export};
use recommender::Config;

/// Execute query command
///
/// # Arguments
/// * `text` - Job description or skill keyword
/// * `top_k` - Number of recommendations (falls back to the configured default)
/// * `export_to` - `Some(None)` exports to the configured file name, `Some(Some(p))` to `p`
/// * `json` - Print the resolution as JSON instead of a table
pub fn execute(
    config: &Config,
    text: &str,
    top_k: Option<usize>,
    export_to: Option<Option<PathBuf>>,
    json: bool,
) -> Result<()> {
    let k = top_k.unwrap_or(config.search.default_top_k);

    let mut session = super::load_session(config)?;
    let resolution = session.resolve(text, k)?;

    if json {
        output::print_json(&resolution)?;
    } else {
        println!("💬 Query: \"{}\"\n", resolution.query);
        output::print_resolution(&resolution)?;
    }

    if let Some(target) = export_to {
        let path = target.unwrap_or_else(|| config.export.filename.clone());
        export::write_file(&path, &resolution.recommendations)?;
        if !json {
            println!(
                "\n{} Exported {} row(s) to {}",
                "✓".green(),
                resolution.recommendations.len(),
                path.display()
            );
        }
    }

    Ok(())
}
