//! # Entity Search Pipeline
//!
//! This crate provides the pipeline components for collecting entities from
//! the Wikidata SPARQL endpoint and indexing them into OpenSearch.
//!
//! ## Architecture
//!
//! The pipeline follows the Collector-Processor-Loader pattern:
//!
//! 1. **Collector**: Pulls binding rows for each entity source
//! 2. **Processor**: Transforms rows into entity documents
//! 3. **Loader**: Rebuilds the index and bulk loads the documents
//! 4. **Orchestrator**: Runs the stages in order and reports progress
//!    through the shared indexing status

pub mod collector;
pub mod errors;
pub mod loader;
pub mod orchestrator;
pub mod processor;
pub mod status;

#[cfg(test)]
pub(crate) mod mocks;

pub use collector::{Binding, BindingSource, EntitySource, SourceLimits, SparqlClient};
pub use errors::PipelineError;
pub use loader::{LoadReport, LoaderConfig, SearchLoader};
pub use orchestrator::{
    IndexingOrchestrator, IndexingReport, IndexingWorker, StartOutcome, CRITICAL_FAILURE_MESSAGE,
};
pub use processor::EntityProcessor;
pub use status::{IndexingStatus, IndexingStatusHandle};
