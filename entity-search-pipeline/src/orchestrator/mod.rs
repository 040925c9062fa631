//! Orchestrator module for the entity search pipeline.
//!
//! Coordinates the collector, processor, and loader components.

mod worker;

use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::collector::{BindingSource, EntitySource, SourceLimits};
use crate::errors::PipelineError;
use crate::loader::SearchLoader;
use crate::processor::EntityProcessor;
use crate::status::IndexingStatusHandle;
use entity_search_shared::EntityDocument;

pub use worker::{IndexingWorker, StartOutcome, CRITICAL_FAILURE_MESSAGE};

/// Final message when every source came back empty.
pub const NOTHING_COLLECTED_MESSAGE: &str = "No documents were collected for indexing.";

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexingReport {
    pub message: String,
    pub final_count: usize,
}

/// Orchestrator that runs one full collection and indexing pass.
///
/// The orchestrator:
/// - Collects the three sources in order, tolerating per-source failures
/// - Reports each stage through the shared status
/// - Hands the combined batch to the loader
pub struct IndexingOrchestrator {
    source: Arc<dyn BindingSource>,
    processor: EntityProcessor,
    loader: SearchLoader,
    limits: SourceLimits,
    status: IndexingStatusHandle,
}

impl IndexingOrchestrator {
    /// Create a new orchestrator with the given components.
    pub fn new(
        source: Arc<dyn BindingSource>,
        loader: SearchLoader,
        limits: SourceLimits,
        status: IndexingStatusHandle,
    ) -> Self {
        Self {
            source,
            processor: EntityProcessor::new(),
            loader,
            limits,
            status,
        }
    }

    /// Run the orchestrator.
    ///
    /// Collection failures are logged and skipped. A loader failure is
    /// returned to the caller, which records it as the final status.
    #[instrument(skip(self))]
    pub async fn run(&self) -> Result<IndexingReport, PipelineError> {
        info!("Starting indexing run");

        let mut documents: Vec<EntityDocument> = Vec::new();
        for (step, source) in EntitySource::ALL.into_iter().enumerate() {
            self.status
                .set_message(format!("Step {}/4: Collecting {}...", step + 1, source.label()))
                .await;

            match self.collect(source).await {
                Ok(batch) => {
                    info!(source = source.label(), count = batch.len(), "Collected source");
                    documents.extend(batch);
                }
                Err(e) => {
                    warn!(source = source.label(), error = %e, "Failed to collect source");
                    self.status
                        .set_message(format!(
                            "Error while collecting {}, moving on...",
                            source.label()
                        ))
                        .await;
                }
            }
        }

        if documents.is_empty() {
            info!("Nothing collected, index left untouched");
            return Ok(IndexingReport {
                message: NOTHING_COLLECTED_MESSAGE.to_string(),
                final_count: 0,
            });
        }

        self.status
            .set_message(format!("Step 4/4: Indexing {} documents...", documents.len()))
            .await;

        let report = self.loader.load(documents).await?;

        info!(indexed = report.indexed, "Indexing run complete");
        Ok(IndexingReport {
            message: report.message,
            final_count: report.indexed,
        })
    }

    async fn collect(&self, source: EntitySource) -> Result<Vec<EntityDocument>, PipelineError> {
        let rows = self
            .source
            .fetch(source, self.limits.for_source(source))
            .await?;
        Ok(self.processor.process_batch(source, rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{row, MockEngine, MockSource};

    fn orchestrator(source: MockSource, engine: Arc<MockEngine>) -> IndexingOrchestrator {
        IndexingOrchestrator::new(
            Arc::new(source),
            SearchLoader::new(engine),
            SourceLimits::default(),
            IndexingStatusHandle::new(),
        )
    }

    #[tokio::test]
    async fn test_failing_source_does_not_block_others() {
        let source = MockSource::default()
            .with_rows(
                EntitySource::Scientists,
                vec![row("http://www.wikidata.org/entity/Q7186", "Marie Curie")],
            )
            .with_rows(
                EntitySource::Countries,
                vec![
                    row("http://www.wikidata.org/entity/Q142", "France"),
                    row("http://www.wikidata.org/entity/Q183", "Allemagne"),
                ],
            );
        let engine = Arc::new(MockEngine::default());

        let report = orchestrator(source, engine.clone()).run().await.unwrap();

        assert_eq!(report.final_count, 3);
        assert_eq!(report.message, "Indexing complete. 3 documents added.");
        assert_eq!(*engine.batches.lock().unwrap(), vec![3]);
    }

    #[tokio::test]
    async fn test_nothing_collected_skips_loader() {
        let engine = Arc::new(MockEngine::default());

        let report = orchestrator(MockSource::default(), engine.clone())
            .run()
            .await
            .unwrap();

        assert_eq!(report.message, NOTHING_COLLECTED_MESSAGE);
        assert_eq!(report.final_count, 0);
        assert!(engine.batches.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_loader_failure_is_returned() {
        let source = MockSource::default().with_rows(
            EntitySource::Movies,
            vec![row("http://www.wikidata.org/entity/Q25188", "Avatar")],
        );
        let engine = Arc::new(MockEngine {
            fail_recreate: true,
            ..Default::default()
        });

        let result = orchestrator(source, engine).run().await;

        assert!(result.is_err());
    }
}
