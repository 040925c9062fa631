//! Search request composition.
//!
//! This module builds the final boolean query from a [`ParsedQuery`]:
//! - parser `must` clauses are required and contribute to the score
//! - parser `filter` clauses are required and do not score
//! - a full-text disjunction over the raw query is always added as `should`
//!
//! The disjunction is mandatory (`minimum_should_match: 1`) only when the
//! parser produced no `must` clause. A fully structured query such as
//! "films réalisés par X" can then match on structure alone, while a free
//! text query still needs some lexical relevance.

use serde_json::{json, Value};

use crate::clause::Clause;
use crate::fields;
use crate::parser::ParsedQuery;

/// Number of hits per page when the caller does not choose one.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Deepest hit the engine will page to (`index.max_result_window`).
pub const MAX_RESULT_WINDOW: usize = 10_000;

/// Boost applied to exact phrase matches on the name.
const NAME_PHRASE_BOOST: f64 = 5.0;

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: usize,
    page_size: usize,
}

impl Pagination {
    /// Page numbers below 1 are clamped to 1, and so are empty page sizes.
    /// Page sizes never exceed the result window.
    pub fn new(page: usize, page_size: usize) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, MAX_RESULT_WINDOW),
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Index of the first hit on this page, capped at the result window.
    pub fn offset(&self) -> usize {
        (self.page - 1)
            .saturating_mul(self.page_size)
            .min(MAX_RESULT_WINDOW)
    }

    /// Number of hits to request so that `offset + size` stays inside the
    /// result window. Zero for pages past the window.
    pub fn window_size(&self) -> usize {
        self.page_size.min(MAX_RESULT_WINDOW - self.offset())
    }

    /// Number of pages needed to show `total` hits.
    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.page_size as u64)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(1, DEFAULT_PAGE_SIZE)
    }
}

/// A ranked query ready to be executed.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedSearch {
    /// The `query` object of the search request body.
    pub query: Value,
    /// Offset of the first hit.
    pub from: usize,
    /// Number of hits to return.
    pub size: usize,
}

impl ComposedSearch {
    /// Full request body, without pagination (sent as URL parameters).
    pub fn body(&self) -> Value {
        json!({ "query": self.query })
    }
}

/// Compose the ranked query for `parsed` and the requested page.
pub fn compose_search(parsed: &ParsedQuery, pagination: Pagination) -> ComposedSearch {
    let must: Vec<Value> = parsed.must_clauses().iter().map(Clause::to_query).collect();
    let filter: Vec<Value> = parsed
        .filter_clauses()
        .iter()
        .map(Clause::to_query)
        .collect();
    let minimum_should_match = if must.is_empty() { 1 } else { 0 };

    let query = json!({
        "bool": {
            "must": must,
            "filter": filter,
            "should": build_full_text_clauses(parsed.raw_query()),
            "minimum_should_match": minimum_should_match
        }
    });

    ComposedSearch {
        query,
        from: pagination.offset(),
        size: pagination.window_size(),
    }
}

/// Build the full-text disjunction over the unmodified query text.
///
/// - Fuzzy `best_fields` match across the name, description and free-text
///   details, tolerant of typos (AUTO fuzziness)
/// - Exact phrase on the name at a much higher weight, for queries that are
///   themselves a title or a person's name
fn build_full_text_clauses(query_text: &str) -> Vec<Value> {
    vec![
        json!({
            "multi_match": {
                "query": query_text,
                "fields": [
                    format!("{}^4", fields::NAME),
                    format!("{}^2", fields::DESCRIPTION),
                    fields::DIRECTOR,
                    fields::GENRE,
                    fields::DOMAIN,
                    fields::NATIONALITY,
                    fields::BIRTH_PLACE,
                    fields::CAPITAL,
                    fields::CONTINENT
                ],
                "type": "best_fields",
                "fuzziness": "AUTO"
            }
        }),
        json!({
            "multi_match": {
                "query": query_text,
                "fields": [fields::NAME],
                "type": "phrase",
                "boost": NAME_PHRASE_BOOST
            }
        }),
    ]
}
