//! Pipeline error types.

use entity_search_repository::SearchError;
use thiserror::Error;

/// Errors that can occur while running the indexing pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A collection source could not be queried or decoded.
    #[error("Collection error: {0}")]
    CollectionError(String),

    /// The search engine rejected an operation.
    #[error("Search engine error: {0}")]
    Search(#[from] SearchError),
}

impl PipelineError {
    /// Create a collection error.
    pub fn collection(msg: impl Into<String>) -> Self {
        Self::CollectionError(msg.into())
    }
}

impl From<reqwest::Error> for PipelineError {
    fn from(err: reqwest::Error) -> Self {
        Self::CollectionError(err.to_string())
    }
}
