//! # Entity Search Repository
//!
//! This crate provides traits and implementations for interacting with the
//! search engine. It includes definitions for errors, interfaces, the lazily
//! validated connection, the search service and a concrete implementation
//! for OpenSearch.

pub mod client;
pub mod config;
pub mod connection;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod types;

pub use client::EntitySearchClient;
pub use config::SearchIndexConfig;
pub use connection::{Connector, SearchConnection};
pub use errors::SearchError;
pub use interfaces::SearchEngineClient;
pub use opensearch::{OpenSearchClient, OpenSearchConnector};
pub use types::{BulkIndexSummary, NoResultReason, SearchOutcome, SearchResponse};
