//! Lazily established, shared search engine connection.
//!
//! The connection is created on first use and re-validated with a liveness
//! probe on every subsequent use. A failed connect or probe is never cached,
//! so the next caller simply tries again. The slot lock is only held to read
//! or replace the cached client, never across a network call.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::errors::SearchError;
use crate::interfaces::SearchEngineClient;

/// Creates a new search engine client.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self) -> Result<Arc<dyn SearchEngineClient>, SearchError>;
}

/// Shared handle to the search engine.
pub struct SearchConnection {
    connector: Box<dyn Connector>,
    client: Mutex<Option<Arc<dyn SearchEngineClient>>>,
}

impl SearchConnection {
    pub fn new(connector: Box<dyn Connector>) -> Self {
        Self {
            connector,
            client: Mutex::new(None),
        }
    }

    /// Return a live client, connecting first if needed.
    ///
    /// # Errors
    ///
    /// Returns `SearchError::ConnectionError` if the engine cannot be reached
    /// or does not answer the liveness probe.
    pub async fn get(&self) -> Result<Arc<dyn SearchEngineClient>, SearchError> {
        let cached = self.client.lock().await.clone();

        if let Some(client) = cached {
            match client.health_check().await {
                Ok(true) => return Ok(client),
                Ok(false) => warn!("Search engine failed liveness probe, reconnecting"),
                Err(e) => warn!(error = %e, "Search engine unreachable, reconnecting"),
            }
            let mut slot = self.client.lock().await;
            if slot.as_ref().is_some_and(|current| Arc::ptr_eq(current, &client)) {
                *slot = None;
            }
        }

        let client = self.connector.connect().await?;
        match client.health_check().await {
            Ok(true) => {
                info!("Connected to search engine");
                *self.client.lock().await = Some(Arc::clone(&client));
                Ok(client)
            }
            Ok(false) => Err(SearchError::connection(
                "search engine did not answer the liveness probe",
            )),
            Err(e) => Err(SearchError::connection(e.to_string())),
        }
    }
}
