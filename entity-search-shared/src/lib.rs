//! # Entity Search Shared
//!
//! Types shared by every crate of the entity search system: the indexed
//! entity document and the shape of search results handed back to callers.

pub mod document;
pub mod search;

pub use document::{
    CountryDetails, EntityDetails, EntityDocument, EntityType, MovieDetails, ScientistDetails,
};
pub use search::{SearchHit, SearchPage};
