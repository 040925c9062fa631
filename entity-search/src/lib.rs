//! # Entity Search
//!
//! Main library for the entity search service.
//!
//! This crate provides the configuration, dependency wiring, logging setup
//! and HTTP surface for searching and re-indexing Wikidata entities.

pub mod config;
pub mod logging;
pub mod server;

pub use config::{Dependencies, LogFormat, Settings};
pub use server::{router, AppState};

use thiserror::Error;

/// Errors that can occur during service initialization or execution.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Pipeline error.
    #[error("Pipeline error: {0}")]
    PipelineError(#[from] entity_search_pipeline::PipelineError),

    /// Search error.
    #[error("Search error: {0}")]
    SearchError(#[from] entity_search_repository::SearchError),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl ServiceError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
