//! Request and response types for search index operations.

use entity_search_shared::{SearchHit, SearchPage};

/// Raw result of executing a composed search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResponse {
    /// Ranked hits for the requested window.
    pub hits: Vec<SearchHit>,
    /// Total number of matching documents.
    pub total: u64,
}

/// Why a search could not be run at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoResultReason {
    /// The query text was empty or whitespace.
    EmptyQuery,
    /// The entity index has not been created yet.
    IndexMissing,
}

/// Outcome of a search request.
///
/// `NoResult` means "could not search", which callers render differently
/// from a page with zero hits.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    NoResult(NoResultReason),
    Page(SearchPage),
}

/// Summary of a bulk indexing operation.
///
/// Per-document failures do not fail the whole operation; they are counted
/// here and a sample of their messages is kept for logging.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BulkIndexSummary {
    /// Number of documents submitted.
    pub total: usize,
    /// Number of documents the engine accepted.
    pub succeeded: usize,
    /// Number of documents the engine rejected.
    pub failed: usize,
    /// First few per-document error messages.
    pub errors: Vec<String>,
}

impl BulkIndexSummary {
    /// Fold another summary into this one.
    pub fn merge(&mut self, other: BulkIndexSummary) {
        self.total += other.total;
        self.succeeded += other.succeeded;
        self.failed += other.failed;
        self.errors.extend(other.errors);
    }
}
