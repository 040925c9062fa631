//! Shared indexing status.
//!
//! The status record is the only channel between the background indexing
//! run and the request handlers polling it.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;

/// Message shown before the first run.
pub const INITIAL_MESSAGE: &str = "No indexing run since startup.";

/// Snapshot of the indexing progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexingStatus {
    pub is_running: bool,
    pub message: String,
    pub is_complete: bool,
    /// Documents committed by the last completed run.
    pub final_count: usize,
}

impl Default for IndexingStatus {
    fn default() -> Self {
        Self {
            is_running: false,
            message: INITIAL_MESSAGE.to_string(),
            is_complete: false,
            final_count: 0,
        }
    }
}

/// Cloneable handle to the process-wide status record.
#[derive(Debug, Clone, Default)]
pub struct IndexingStatusHandle {
    inner: Arc<RwLock<IndexingStatus>>,
}

impl IndexingStatusHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn snapshot(&self) -> IndexingStatus {
        self.inner.read().await.clone()
    }

    pub async fn is_running(&self) -> bool {
        self.inner.read().await.is_running
    }

    /// Mark a run as started unless one already is.
    ///
    /// Check and set happen under one write lock, so two concurrent callers
    /// can never both get `true`.
    pub async fn try_begin(&self) -> bool {
        let mut status = self.inner.write().await;
        if status.is_running {
            return false;
        }
        *status = IndexingStatus {
            is_running: true,
            message: "Initializing...".to_string(),
            is_complete: false,
            final_count: 0,
        };
        true
    }

    pub async fn set_message(&self, message: impl Into<String>) {
        self.inner.write().await.message = message.into();
    }

    /// Record the end of a run, successful or not.
    pub async fn finish(&self, message: impl Into<String>, final_count: usize) {
        let mut status = self.inner.write().await;
        status.is_running = false;
        status.is_complete = true;
        status.message = message.into();
        status.final_count = final_count;
    }
}
