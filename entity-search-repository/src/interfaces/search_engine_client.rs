//! Search engine client trait definition.
//!
//! This module defines the abstract interface for search engine operations,
//! allowing for different backend implementations (OpenSearch, Elasticsearch, etc.).

use async_trait::async_trait;

use crate::errors::SearchError;
use crate::types::{BulkIndexSummary, SearchResponse};
use entity_search_query::ComposedSearch;
use entity_search_shared::EntityDocument;

/// Abstract interface for search engine operations.
///
/// This trait defines all the operations required to interact with a search engine.
/// Implementations can be swapped for different backends (OpenSearch, mock, etc.)
/// enabling easy testing and potential future migrations.
///
/// Every implementation is bound to a single index, fixed at construction.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async tasks.
#[async_trait]
pub trait SearchEngineClient: Send + Sync {
    /// Check if the search engine is reachable.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the search engine answered the liveness probe
    /// * `Ok(false)` - If it answered with an error status
    /// * `Err(SearchError)` - If the probe could not be sent
    async fn health_check(&self) -> Result<bool, SearchError>;

    /// Check whether the entity index exists.
    async fn index_exists(&self) -> Result<bool, SearchError>;

    /// Drop the entity index if present, then create it with the entity
    /// settings and mappings.
    async fn recreate_index(&self) -> Result<(), SearchError>;

    /// Index documents in a single bulk request, keyed by their URI.
    ///
    /// # Returns
    ///
    /// * `Ok(BulkIndexSummary)` - Counts of accepted and rejected documents
    /// * `Err(SearchError::BulkIndexError)` - If the request itself failed
    async fn bulk_index(&self, documents: &[EntityDocument])
        -> Result<BulkIndexSummary, SearchError>;

    /// Make recently indexed documents visible to search.
    async fn refresh(&self) -> Result<(), SearchError>;

    /// Execute a composed search against the index.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let parsed = parse_query("films réalisés par James Cameron");
    /// let composed = compose_search(&parsed, Pagination::default());
    /// let response = client.search(&composed).await?;
    /// println!("Found {} results", response.total);
    /// ```
    async fn search(&self, search: &ComposedSearch) -> Result<SearchResponse, SearchError>;
}
