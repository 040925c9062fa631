//! OpenSearch implementation of the search engine client.
//!
//! This module provides a concrete implementation of `SearchEngineClient`
//! using OpenSearch as the backend, plus the connector that builds it on
//! demand for `SearchConnection`.

mod client;
mod connector;
mod index_config;

pub use client::OpenSearchClient;
pub use connector::OpenSearchConnector;
pub use index_config::{get_index_settings, IndexConfig, FRENCH_ANALYZER};
