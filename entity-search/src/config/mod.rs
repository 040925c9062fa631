//! Service configuration read from the environment.

mod dependencies;

pub use dependencies::Dependencies;

use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::ServiceError;
use entity_search_pipeline::collector::DEFAULT_SPARQL_ENDPOINT;
use entity_search_pipeline::SourceLimits;
use entity_search_query::DEFAULT_PAGE_SIZE;
use entity_search_repository::config::{DEFAULT_INDEX_NAME, DEFAULT_SEARCH_URL};
use entity_search_repository::SearchIndexConfig;

/// Default listen address.
const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:5000";

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(ServiceError::config(format!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                other
            ))),
        }
    }
}

/// All runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub search: SearchIndexConfig,
    pub sparql_endpoint: String,
    pub limits: SourceLimits,
    pub page_size: usize,
    pub bind_address: SocketAddr,
    pub log_format: LogFormat,
}

impl Settings {
    /// Read settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `SEARCH_INDEX`: index name (default: wikidata_advanced_index)
    /// - `SPARQL_ENDPOINT`: SPARQL endpoint (default: https://query.wikidata.org/sparql)
    /// - `SCIENTIST_LIMIT`, `MOVIE_LIMIT`, `COUNTRY_LIMIT`: rows per source (3000 / 4000 / 300)
    /// - `PAGE_SIZE`: hits per page (default: 10)
    /// - `BIND_ADDRESS`: listen address (default: 127.0.0.1:5000)
    /// - `LOG_FORMAT`: `text` or `json` (default: text)
    pub fn from_env() -> Result<Self, ServiceError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through `lookup`, which returns the raw value of a variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ServiceError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let defaults = SourceLimits::default();

        let search = SearchIndexConfig {
            url: get("OPENSEARCH_URL", DEFAULT_SEARCH_URL),
            index_name: get("SEARCH_INDEX", DEFAULT_INDEX_NAME),
            request_timeout: Duration::from_secs(30),
        };

        let limits = SourceLimits {
            scientists: parse_number(&lookup, "SCIENTIST_LIMIT", defaults.scientists)?,
            movies: parse_number(&lookup, "MOVIE_LIMIT", defaults.movies)?,
            countries: parse_number(&lookup, "COUNTRY_LIMIT", defaults.countries)?,
        };

        let page_size = parse_number(&lookup, "PAGE_SIZE", DEFAULT_PAGE_SIZE)?;
        if page_size == 0 {
            return Err(ServiceError::config("PAGE_SIZE must be at least 1"));
        }

        let bind_address = get("BIND_ADDRESS", DEFAULT_BIND_ADDRESS)
            .parse::<SocketAddr>()
            .map_err(|e| ServiceError::config(format!("Invalid BIND_ADDRESS: {}", e)))?;

        Ok(Self {
            search,
            sparql_endpoint: get("SPARQL_ENDPOINT", DEFAULT_SPARQL_ENDPOINT),
            limits,
            page_size,
            bind_address,
            log_format: get("LOG_FORMAT", "text").parse()?,
        })
    }
}

fn parse_number<F>(lookup: &F, key: &str, default: usize) -> Result<usize, ServiceError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ServiceError::config(format!("{} must be a non-negative integer, got '{}'", key, raw))),
        None => Ok(default),
    }
}
