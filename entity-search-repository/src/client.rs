//! Entity search client.
//!
//! This module provides the read path application code uses: it turns a
//! natural-language query into a composed search and executes it against
//! the shared connection.

use std::sync::Arc;

use tracing::{debug, info};

use crate::connection::SearchConnection;
use crate::errors::SearchError;
use crate::types::{NoResultReason, SearchOutcome};
use entity_search_query::{compose_search, parse_query, Pagination};
use entity_search_shared::SearchPage;

/// The main client for searching the entity index.
pub struct EntitySearchClient {
    connection: Arc<SearchConnection>,
    page_size: usize,
}

impl EntitySearchClient {
    /// Create a new EntitySearchClient over a shared connection.
    pub fn new(connection: Arc<SearchConnection>, page_size: usize) -> Self {
        Self {
            connection,
            page_size,
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Search the entity index.
    /// Input: query text and 1-based page number
    /// Output: a page of ranked hits, or the no-result sentinel when the
    /// query is blank or the index does not exist yet
    ///
    /// # Errors
    ///
    /// Returns `SearchError::ConnectionError` if the engine is unreachable,
    /// or another `SearchError` if the search itself fails.
    pub async fn search(&self, query: &str, page: usize) -> Result<SearchOutcome, SearchError> {
        if query.trim().is_empty() {
            return Ok(SearchOutcome::NoResult(NoResultReason::EmptyQuery));
        }

        let engine = self.connection.get().await?;

        if !engine.index_exists().await? {
            info!("Search requested before the entity index was created");
            return Ok(SearchOutcome::NoResult(NoResultReason::IndexMissing));
        }

        let pagination = Pagination::new(page, self.page_size);
        let parsed = parse_query(query);
        let composed = compose_search(&parsed, pagination);
        debug!(
            query = %query,
            body = %composed.body(),
            from = composed.from,
            size = composed.size,
            "Executing composed search"
        );

        let response = engine.search(&composed).await?;

        info!(
            query = %query,
            page = pagination.page(),
            total = response.total,
            "Search completed"
        );

        Ok(SearchOutcome::Page(SearchPage {
            hits: response.hits,
            total: response.total,
            page: pagination.page(),
            page_size: pagination.page_size(),
            total_pages: pagination.total_pages(response.total),
        }))
    }
}
