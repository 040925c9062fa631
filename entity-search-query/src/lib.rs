//! # Entity Search Query
//!
//! Turns a free-text query into a ranked search request.
//!
//! ## Architecture
//!
//! 1. **Parser**: runs an ordered pipeline of extractors over a working copy
//!    of the query, producing structured `must` and `filter` clauses
//! 2. **Composer**: blends those clauses with a fuzzy full-text disjunction
//!    over the untouched query text and applies pagination
//!
//! Nothing in this crate performs I/O; the output is a JSON query body ready
//! to be sent to the search engine.

pub mod clause;
pub mod composer;
pub mod fields;
pub mod parser;

pub use clause::{Clause, DateRange};
pub use composer::{
    compose_search, ComposedSearch, Pagination, DEFAULT_PAGE_SIZE, MAX_RESULT_WINDOW,
};
pub use parser::{parse_query, ParsedQuery, QueryClauses, QueryParser};
