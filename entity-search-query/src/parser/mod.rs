//! Rule-based query parser.
//!
//! The parser lowercases the query, pads it with a space on each side and
//! hands it through [`EXTRACTORS`] in order. Each extractor receives the
//! remaining text and the clauses accumulated so far and returns both,
//! with whatever span it recognized replaced by a space. Later extractors
//! therefore never see text an earlier one consumed.

mod extractors;
mod vocabulary;

use tracing::debug;

use crate::clause::Clause;
use entity_search_shared::EntityType;

pub use vocabulary::{AttributeTrigger, ATTRIBUTE_TRIGGERS, NATIONALITIES, TYPE_KEYWORDS};

/// Clauses accumulated by the extractor pipeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryClauses {
    /// Entity type named explicitly in the query. Set at most once.
    pub detected_type: Option<EntityType>,
    /// Required, score-contributing conditions.
    pub must: Vec<Clause>,
    /// Required, non-scoring conditions.
    pub filter: Vec<Clause>,
}

/// One pipeline stage: `(remaining text, clauses) -> (remaining text, clauses)`.
pub type Extractor = fn(String, QueryClauses) -> (String, QueryClauses);

/// The extraction pipeline, in the order it runs.
pub const EXTRACTORS: [(&str, Extractor); 5] = [
    ("entity_type", extractors::entity_type),
    ("year", extractors::year),
    ("director", extractors::director),
    ("attribute", extractors::attribute),
    ("nationality", extractors::nationality),
];

/// Result of parsing one query string.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedQuery {
    raw_query: String,
    remaining_text: String,
    clauses: QueryClauses,
}

impl ParsedQuery {
    /// The query exactly as the user typed it.
    pub fn raw_query(&self) -> &str {
        &self.raw_query
    }

    /// Working text left over after every extractor ran.
    pub fn remaining_text(&self) -> &str {
        &self.remaining_text
    }

    pub fn detected_type(&self) -> Option<EntityType> {
        self.clauses.detected_type
    }

    pub fn must_clauses(&self) -> &[Clause] {
        &self.clauses.must
    }

    pub fn filter_clauses(&self) -> &[Clause] {
        &self.clauses.filter
    }

    /// True when no extractor produced anything.
    pub fn is_unstructured(&self) -> bool {
        self.clauses.must.is_empty() && self.clauses.filter.is_empty()
    }
}

/// Single-use parser for one query string.
pub struct QueryParser {
    raw_query: String,
    working_text: String,
}

impl QueryParser {
    pub fn new(raw_query: impl Into<String>) -> Self {
        let raw_query = raw_query.into();
        let working_text = format!(" {} ", raw_query.to_lowercase());
        Self {
            raw_query,
            working_text,
        }
    }

    /// Run every extractor once, in pipeline order.
    pub fn parse(self) -> ParsedQuery {
        let (remaining_text, clauses) = EXTRACTORS.iter().fold(
            (self.working_text, QueryClauses::default()),
            |(text, clauses), (_, extract)| extract(text, clauses),
        );

        debug!(
            query = %self.raw_query,
            detected_type = ?clauses.detected_type,
            must = clauses.must.len(),
            filter = clauses.filter.len(),
            "Parsed search query"
        );

        ParsedQuery {
            raw_query: self.raw_query,
            remaining_text,
            clauses,
        }
    }
}

/// Parse `raw_query` into structured clauses.
pub fn parse_query(raw_query: &str) -> ParsedQuery {
    QueryParser::new(raw_query).parse()
}

/// Whether `word` occurs in `text` as a whole space-delimited word.
fn contains_word(text: &str, word: &str) -> bool {
    text.contains(&format!(" {} ", word))
}

/// Consume the first whole-word occurrence of `word`.
fn remove_word(text: &str, word: &str) -> String {
    text.replacen(&format!(" {} ", word), " ", 1)
}

/// Consume a byte span, leaving a space so neighbouring words stay apart.
fn remove_span(text: &str, span: std::ops::Range<usize>) -> String {
    let mut remaining = String::with_capacity(text.len());
    remaining.push_str(&text[..span.start]);
    remaining.push(' ');
    remaining.push_str(&text[span.end..]);
    remaining
}
