//! Loader module for the entity search pipeline.
//!
//! Rebuilds the search index and loads processed documents into it.

use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::errors::PipelineError;
use entity_search_repository::{BulkIndexSummary, SearchEngineClient};
use entity_search_shared::EntityDocument;

/// Configuration for the search loader.
#[derive(Debug, Clone, Copy)]
pub struct LoaderConfig {
    /// Number of documents sent per bulk request.
    pub batch_size: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self { batch_size: 500 }
    }
}

/// Result of a load: documents committed and a message for the status page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadReport {
    pub indexed: usize,
    pub message: String,
}

/// Loader that indexes documents into the search engine.
///
/// Every load is a full rebuild: the index is dropped and recreated before
/// the documents are written.
pub struct SearchLoader {
    client: Arc<dyn SearchEngineClient>,
    config: LoaderConfig,
}

impl SearchLoader {
    /// Create a new search loader with the given client.
    pub fn new(client: Arc<dyn SearchEngineClient>) -> Self {
        Self {
            client,
            config: LoaderConfig::default(),
        }
    }

    /// Create a new search loader with custom configuration.
    pub fn with_config(client: Arc<dyn SearchEngineClient>, config: LoaderConfig) -> Self {
        Self {
            client,
            config: LoaderConfig {
                batch_size: config.batch_size.max(1),
            },
        }
    }

    /// Recreate the index, bulk load `documents` in chunks and refresh.
    ///
    /// Documents the engine rejects are counted and logged; they do not fail
    /// the load. A failed bulk request does.
    #[instrument(skip(self, documents), fields(document_count = documents.len()))]
    pub async fn load(&self, documents: Vec<EntityDocument>) -> Result<LoadReport, PipelineError> {
        self.client.recreate_index().await?;

        let mut summary = BulkIndexSummary::default();
        for chunk in documents.chunks(self.config.batch_size) {
            let chunk_summary = self.client.bulk_index(chunk).await?;
            debug!(
                count = chunk.len(),
                succeeded = chunk_summary.succeeded,
                "Indexed chunk"
            );
            summary.merge(chunk_summary);
        }

        self.client.refresh().await?;

        if summary.failed > 0 {
            warn!(
                failed = summary.failed,
                errors = ?summary.errors.iter().take(5).collect::<Vec<_>>(),
                "Some documents were rejected by the search engine"
            );
        }

        info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Load completed"
        );

        let message = if summary.failed > 0 {
            format!(
                "Indexing complete. {} documents added, {} rejected.",
                summary.succeeded, summary.failed
            )
        } else {
            format!("Indexing complete. {} documents added.", summary.succeeded)
        };

        Ok(LoadReport {
            indexed: summary.succeeded,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::MockEngine;
    use entity_search_shared::{EntityDetails, MovieDetails};
    use std::sync::atomic::Ordering;

    fn movies(count: usize) -> Vec<EntityDocument> {
        (0..count)
            .map(|i| {
                EntityDocument::new(
                    format!("http://www.wikidata.org/entity/Q{}", i),
                    format!("Film {}", i),
                    EntityDetails::Movie(MovieDetails::default()),
                )
            })
            .collect()
    }

    #[tokio::test]
    async fn test_load_in_chunks() {
        let client = Arc::new(MockEngine::default());
        let loader = SearchLoader::with_config(client.clone(), LoaderConfig { batch_size: 2 });

        let report = loader.load(movies(5)).await.unwrap();

        assert_eq!(report.indexed, 5);
        assert_eq!(report.message, "Indexing complete. 5 documents added.");
        assert_eq!(*client.batches.lock().unwrap(), vec![2, 2, 1]);
        assert!(client.recreated.load(Ordering::SeqCst));
        assert!(client.refreshed.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_rejected_documents_are_counted() {
        let client = Arc::new(MockEngine {
            reject_uri: Some("http://www.wikidata.org/entity/Q1".to_string()),
            ..Default::default()
        });
        let loader = SearchLoader::new(client.clone());

        let report = loader.load(movies(3)).await.unwrap();

        assert_eq!(report.indexed, 2);
        assert_eq!(report.message, "Indexing complete. 2 documents added, 1 rejected.");
    }

    #[tokio::test]
    async fn test_recreate_failure_aborts_load() {
        let client = Arc::new(MockEngine {
            fail_recreate: true,
            ..Default::default()
        });
        let loader = SearchLoader::new(client.clone());

        let result = loader.load(movies(3)).await;

        assert!(matches!(result, Err(PipelineError::Search(_))));
        assert!(client.batches.lock().unwrap().is_empty());
    }
}
