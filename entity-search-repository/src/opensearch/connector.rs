use std::sync::Arc;

use async_trait::async_trait;

use crate::config::SearchIndexConfig;
use crate::connection::Connector;
use crate::errors::SearchError;
use crate::interfaces::SearchEngineClient;
use crate::opensearch::{IndexConfig, OpenSearchClient};

/// Builds `OpenSearchClient`s from the search index configuration.
#[derive(Debug, Clone)]
pub struct OpenSearchConnector {
    config: SearchIndexConfig,
}

impl OpenSearchConnector {
    pub fn new(config: SearchIndexConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl Connector for OpenSearchConnector {
    async fn connect(&self) -> Result<Arc<dyn SearchEngineClient>, SearchError> {
        let client = OpenSearchClient::new(
            &self.config.url,
            IndexConfig::new(self.config.index_name.clone()),
            self.config.request_timeout,
        )?;
        Ok(Arc::new(client))
    }
}
