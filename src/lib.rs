pub mod catalog;
pub mod config;
pub mod context;
pub mod embeddings;
pub mod index;
pub mod output;
pub mod paths;
pub mod resolver;
pub mod test_types;

// Re-export commonly used types
pub use catalog::{AssessmentRecord, Catalog};
pub use config::Config;
pub use context::{SearchContext, Session};
pub use resolver::{Recommendation, Resolution, ResolveError, RowFailure};
