//! Background indexing worker.

use std::sync::Arc;

use tracing::{error, info};

use crate::collector::{BindingSource, SourceLimits};
use crate::loader::{LoaderConfig, SearchLoader};
use crate::orchestrator::IndexingOrchestrator;
use crate::status::IndexingStatusHandle;
use entity_search_repository::SearchEngineClient;

/// Final status message of a run that failed or stopped unexpectedly.
pub const CRITICAL_FAILURE_MESSAGE: &str =
    "A critical error occurred during indexing. See the service logs for details.";

/// Result of asking the worker to start a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    AlreadyRunning,
}

/// Starts indexing runs on the Tokio runtime, at most one at a time.
#[derive(Clone)]
pub struct IndexingWorker {
    source: Arc<dyn BindingSource>,
    limits: SourceLimits,
    loader_config: LoaderConfig,
    status: IndexingStatusHandle,
}

impl IndexingWorker {
    pub fn new(
        source: Arc<dyn BindingSource>,
        limits: SourceLimits,
        loader_config: LoaderConfig,
        status: IndexingStatusHandle,
    ) -> Self {
        Self {
            source,
            limits,
            loader_config,
            status,
        }
    }

    pub fn status(&self) -> &IndexingStatusHandle {
        &self.status
    }

    /// Start a run against `client` unless one is already in progress.
    ///
    /// Returns as soon as the run is spawned. The run itself executes in one
    /// task and a second task awaits it and records the final status, so a
    /// panic in the run still leaves the status complete and not running.
    pub async fn start(&self, client: Arc<dyn SearchEngineClient>) -> StartOutcome {
        if !self.status.try_begin().await {
            info!("Indexing already running, start request ignored");
            return StartOutcome::AlreadyRunning;
        }

        let orchestrator = IndexingOrchestrator::new(
            Arc::clone(&self.source),
            SearchLoader::with_config(client, self.loader_config),
            self.limits,
            self.status.clone(),
        );

        let run = tokio::spawn(async move { orchestrator.run().await });

        let status = self.status.clone();
        tokio::spawn(async move {
            let (message, final_count) = match run.await {
                Ok(Ok(report)) => (report.message, report.final_count),
                Ok(Err(e)) => {
                    error!(error = %e, "Indexing run failed");
                    (CRITICAL_FAILURE_MESSAGE.to_string(), 0)
                }
                Err(e) => {
                    error!(error = %e, "Indexing task aborted");
                    (CRITICAL_FAILURE_MESSAGE.to_string(), 0)
                }
            };
            info!(message = %message, final_count, "Indexing worker finished");
            status.finish(message, final_count).await;
        });

        StartOutcome::Started
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::{Binding, EntitySource};
    use crate::errors::PipelineError;
    use crate::mocks::{row, MockEngine, MockSource};
    use crate::status::IndexingStatus;
    use async_trait::async_trait;
    use std::time::Duration;
    use tokio::sync::Notify;

    fn worker(source: impl BindingSource + 'static) -> IndexingWorker {
        IndexingWorker::new(
            Arc::new(source),
            SourceLimits::default(),
            LoaderConfig::default(),
            IndexingStatusHandle::new(),
        )
    }

    async fn wait_for_completion(status: &IndexingStatusHandle) -> IndexingStatus {
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let snapshot = status.snapshot().await;
                if snapshot.is_complete {
                    return snapshot;
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("indexing run did not complete")
    }

    #[tokio::test]
    async fn test_start_runs_to_completion() {
        let source = MockSource::default().with_rows(
            EntitySource::Countries,
            vec![row("http://www.wikidata.org/entity/Q142", "France")],
        );
        let worker = worker(source);

        let outcome = worker.start(Arc::new(MockEngine::default())).await;
        assert_eq!(outcome, StartOutcome::Started);

        let status = wait_for_completion(worker.status()).await;
        assert!(!status.is_running);
        assert_eq!(status.final_count, 1);
        assert_eq!(status.message, "Indexing complete. 1 documents added.");
    }

    #[tokio::test]
    async fn test_second_start_while_running() {
        let gate = Arc::new(Notify::new());
        let worker = worker(MockSource::default().gated(gate.clone()));

        assert_eq!(
            worker.start(Arc::new(MockEngine::default())).await,
            StartOutcome::Started
        );
        assert_eq!(
            worker.start(Arc::new(MockEngine::default())).await,
            StartOutcome::AlreadyRunning
        );

        gate.notify_one();
        let status = wait_for_completion(worker.status()).await;
        assert_eq!(status.message, "No documents were collected for indexing.");
    }

    struct PanickingSource;

    #[async_trait]
    impl BindingSource for PanickingSource {
        async fn fetch(
            &self,
            _source: EntitySource,
            _limit: usize,
        ) -> Result<Vec<Binding>, PipelineError> {
            panic!("malformed response");
        }
    }

    #[tokio::test]
    async fn test_panic_is_recorded_as_final_status() {
        let worker = worker(PanickingSource);

        worker.start(Arc::new(MockEngine::default())).await;

        let status = wait_for_completion(worker.status()).await;
        assert!(!status.is_running);
        assert_eq!(status.message, CRITICAL_FAILURE_MESSAGE);
        assert_eq!(status.final_count, 0);
    }

    #[tokio::test]
    async fn test_loader_error_is_recorded_as_final_status() {
        let source = MockSource::default().with_rows(
            EntitySource::Movies,
            vec![row("http://www.wikidata.org/entity/Q25188", "Avatar")],
        );
        let worker = worker(source);
        let engine = MockEngine {
            fail_recreate: true,
            ..Default::default()
        };

        worker.start(Arc::new(engine)).await;

        let status = wait_for_completion(worker.status()).await;
        assert!(!status.is_running);
        assert_eq!(status.final_count, 0);
        assert_eq!(status.message, CRITICAL_FAILURE_MESSAGE);
        assert!(!status.message.contains("read-only"));
    }
}
