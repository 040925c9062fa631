//! Collector module for the entity search pipeline.
//!
//! Pulls raw binding rows for each entity source from the knowledge-graph
//! query service.

mod queries;
mod sparql_client;

use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;

use crate::errors::PipelineError;

pub use sparql_client::{SparqlClient, DEFAULT_SPARQL_ENDPOINT};

/// A single bound value in a result row.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BindingValue {
    pub value: String,
}

/// One result row: variable name to bound value. Unbound optional
/// variables are simply absent.
pub type Binding = HashMap<String, BindingValue>;

/// The three entity sources, in collection order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntitySource {
    Scientists,
    Movies,
    Countries,
}

impl EntitySource {
    /// All sources in the order they are collected.
    pub const ALL: [EntitySource; 3] = [
        EntitySource::Scientists,
        EntitySource::Movies,
        EntitySource::Countries,
    ];

    /// Plural label used in progress messages and logs.
    pub fn label(&self) -> &'static str {
        match self {
            EntitySource::Scientists => "scientists",
            EntitySource::Movies => "movies",
            EntitySource::Countries => "countries",
        }
    }

    /// SPARQL query returning at most `limit` rows for this source.
    pub fn query(&self, limit: usize) -> String {
        match self {
            EntitySource::Scientists => queries::scientists(limit),
            EntitySource::Movies => queries::movies(limit),
            EntitySource::Countries => queries::countries(limit),
        }
    }
}

/// Maximum number of rows requested per source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLimits {
    pub scientists: usize,
    pub movies: usize,
    pub countries: usize,
}

impl Default for SourceLimits {
    fn default() -> Self {
        Self {
            scientists: 3000,
            movies: 4000,
            countries: 300,
        }
    }
}

impl SourceLimits {
    pub fn for_source(&self, source: EntitySource) -> usize {
        match source {
            EntitySource::Scientists => self.scientists,
            EntitySource::Movies => self.movies,
            EntitySource::Countries => self.countries,
        }
    }
}

/// Anything that can answer a source query with binding rows.
#[async_trait]
pub trait BindingSource: Send + Sync {
    async fn fetch(&self, source: EntitySource, limit: usize)
        -> Result<Vec<Binding>, PipelineError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_limits() {
        let limits = SourceLimits::default();

        assert_eq!(limits.for_source(EntitySource::Scientists), 3000);
        assert_eq!(limits.for_source(EntitySource::Movies), 4000);
        assert_eq!(limits.for_source(EntitySource::Countries), 300);
    }
}
