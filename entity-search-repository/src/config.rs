//! Configuration types for the search engine connection.

use std::time::Duration;

/// Default OpenSearch URL.
pub const DEFAULT_SEARCH_URL: &str = "http://localhost:9200";

/// Default name of the entity index.
pub const DEFAULT_INDEX_NAME: &str = "wikidata_advanced_index";

/// Configuration for connecting to the search engine.
#[derive(Debug, Clone)]
pub struct SearchIndexConfig {
    /// Search engine base URL (e.g. "http://localhost:9200").
    pub url: String,
    /// Name of the index holding entity documents.
    pub index_name: String,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

impl Default for SearchIndexConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SEARCH_URL.to_string(),
            index_name: DEFAULT_INDEX_NAME.to_string(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl SearchIndexConfig {
    /// Create a config for the given URL and index name.
    pub fn new(url: impl Into<String>, index_name: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            index_name: index_name.into(),
            ..Default::default()
        }
    }
}
