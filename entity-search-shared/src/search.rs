//! Search result types.

use serde::{Deserialize, Serialize};

use crate::document::EntityDocument;

/// A single ranked hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    /// Index document id (the entity URI).
    pub id: String,
    /// Relevance score reported by the search engine.
    pub score: f64,
    pub document: EntityDocument,
}

/// One page of ranked hits plus the pagination metadata the caller needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub hits: Vec<SearchHit>,
    /// Total number of matching documents across all pages.
    pub total: u64,
    /// 1-based page number.
    pub page: usize,
    pub page_size: usize,
    pub total_pages: u64,
}
