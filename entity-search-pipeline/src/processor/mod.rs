//! Processor module for the entity search pipeline.
//!
//! Transforms raw binding rows into entity documents.

mod entity_processor;

pub use entity_processor::{clean_date, EntityProcessor};
