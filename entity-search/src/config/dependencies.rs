//! Dependency initialization and wiring for the entity search service.

use std::sync::Arc;
use tracing::info;

use crate::config::Settings;
use crate::server::AppState;
use crate::ServiceError;
use entity_search_pipeline::{
    IndexingStatusHandle, IndexingWorker, LoaderConfig, SparqlClient,
};
use entity_search_repository::{EntitySearchClient, OpenSearchConnector, SearchConnection};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// Shared state handed to every request handler.
    pub state: AppState,
}

impl Dependencies {
    /// Initialize all dependencies from settings.
    ///
    /// Nothing here talks to the network: the search engine connection is
    /// established on first use, so the service starts even when OpenSearch
    /// is down.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(ServiceError)` - If a client cannot be built
    pub fn new(settings: &Settings) -> Result<Self, ServiceError> {
        info!(
            opensearch_url = %settings.search.url,
            index = %settings.search.index_name,
            sparql_endpoint = %settings.sparql_endpoint,
            "Initializing dependencies"
        );

        let connection = Arc::new(SearchConnection::new(Box::new(OpenSearchConnector::new(
            settings.search.clone(),
        ))));

        let search = Arc::new(EntitySearchClient::new(
            Arc::clone(&connection),
            settings.page_size,
        ));

        let sparql = SparqlClient::new(settings.sparql_endpoint.clone())?;

        let worker = IndexingWorker::new(
            Arc::new(sparql),
            settings.limits,
            LoaderConfig::default(),
            IndexingStatusHandle::new(),
        );

        info!("Dependencies initialized");

        Ok(Self {
            state: AppState::new(
                search,
                connection,
                worker,
                settings.search.index_name.clone(),
            ),
        })
    }
}
