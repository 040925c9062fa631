//! Error types for the entity search repository.

mod search_error;

pub use search_error::SearchError;
