//! Hand-written test doubles shared by the pipeline tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::Notify;

use crate::collector::{Binding, BindingSource, BindingValue, EntitySource};
use crate::errors::PipelineError;
use entity_search_query::ComposedSearch;
use entity_search_repository::{BulkIndexSummary, SearchEngineClient, SearchError, SearchResponse};
use entity_search_shared::EntityDocument;

pub(crate) fn row(uri: &str, name: &str) -> Binding {
    let mut row = HashMap::new();
    row.insert("item".to_string(), BindingValue { value: uri.to_string() });
    row.insert("itemLabel".to_string(), BindingValue { value: name.to_string() });
    row
}

/// Serves canned rows per source; a source without rows fails.
#[derive(Default)]
pub(crate) struct MockSource {
    rows: HashMap<EntitySource, Vec<Binding>>,
    gate: Option<std::sync::Arc<Notify>>,
    pub calls: AtomicUsize,
}

impl MockSource {
    pub fn with_rows(mut self, source: EntitySource, rows: Vec<Binding>) -> Self {
        self.rows.insert(source, rows);
        self
    }

    /// Block the first fetch until the gate is notified.
    pub fn gated(mut self, gate: std::sync::Arc<Notify>) -> Self {
        self.gate = Some(gate);
        self
    }
}

#[async_trait]
impl BindingSource for MockSource {
    async fn fetch(
        &self,
        source: EntitySource,
        _limit: usize,
    ) -> Result<Vec<Binding>, PipelineError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if let (0, Some(gate)) = (call, &self.gate) {
            gate.notified().await;
        }
        self.rows
            .get(&source)
            .cloned()
            .ok_or_else(|| PipelineError::collection(format!("{} endpoint timed out", source.label())))
    }
}

/// Records every bulk request.
#[derive(Default)]
pub(crate) struct MockEngine {
    pub recreated: AtomicBool,
    pub refreshed: AtomicBool,
    pub batches: Mutex<Vec<usize>>,
    pub reject_uri: Option<String>,
    pub fail_recreate: bool,
}

#[async_trait]
impl SearchEngineClient for MockEngine {
    async fn health_check(&self) -> Result<bool, SearchError> {
        Ok(true)
    }

    async fn index_exists(&self) -> Result<bool, SearchError> {
        Ok(self.recreated.load(Ordering::SeqCst))
    }

    async fn recreate_index(&self) -> Result<(), SearchError> {
        if self.fail_recreate {
            return Err(SearchError::index_creation("cluster is read-only"));
        }
        self.recreated.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn bulk_index(
        &self,
        documents: &[EntityDocument],
    ) -> Result<BulkIndexSummary, SearchError> {
        self.batches.lock().unwrap().push(documents.len());
        let rejected = documents
            .iter()
            .filter(|doc| Some(&doc.uri) == self.reject_uri.as_ref())
            .count();
        Ok(BulkIndexSummary {
            total: documents.len(),
            succeeded: documents.len() - rejected,
            failed: rejected,
            errors: vec!["rejected".to_string(); rejected],
        })
    }

    async fn refresh(&self) -> Result<(), SearchError> {
        self.refreshed.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn search(&self, _search: &ComposedSearch) -> Result<SearchResponse, SearchError> {
        Ok(SearchResponse::default())
    }
}
