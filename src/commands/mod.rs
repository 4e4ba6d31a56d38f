pub mod check;
pub mod interactive;
pub mod query;
pub mod show;
pub mod types;

use anyhow::{Context, Result};
use recommender::{Config, Session};

/// Load catalog, index and model for commands that run queries
pub(crate) fn load_session(config: &Config) -> Result<Session> {
    Session::init(config).context("Failed to load")
}
