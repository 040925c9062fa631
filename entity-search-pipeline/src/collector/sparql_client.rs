//! SPARQL endpoint client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tracing::{info, instrument};

use crate::collector::{Binding, BindingSource, EntitySource};
use crate::errors::PipelineError;

/// Public Wikidata query service.
pub const DEFAULT_SPARQL_ENDPOINT: &str = "https://query.wikidata.org/sparql";

const SPARQL_RESULTS_JSON: &str = "application/sparql-results+json";
const USER_AGENT: &str = concat!("entity-search/", env!("CARGO_PKG_VERSION"), " (reqwest)");

/// Large source queries can take minutes on the public endpoint.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(240);

#[derive(Debug, Deserialize)]
struct SparqlResponse {
    results: SparqlResults,
}

#[derive(Debug, Deserialize)]
struct SparqlResults {
    bindings: Vec<Binding>,
}

/// HTTP client for a SPARQL endpoint returning JSON result sets.
pub struct SparqlClient {
    client: reqwest::Client,
    endpoint: String,
}

impl SparqlClient {
    /// Create a client for the given endpoint.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::CollectionError` if the HTTP client cannot be built.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, PipelineError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Run a query and return its `results.bindings` rows.
    pub async fn run_query(&self, query: &str) -> Result<Vec<Binding>, PipelineError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("query", query)])
            .header(ACCEPT, SPARQL_RESULTS_JSON)
            .send()
            .await?
            .error_for_status()?;

        let body: SparqlResponse = response.json().await?;
        Ok(body.results.bindings)
    }
}

#[async_trait]
impl BindingSource for SparqlClient {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn fetch(
        &self,
        source: EntitySource,
        limit: usize,
    ) -> Result<Vec<Binding>, PipelineError> {
        info!(source = source.label(), limit, "Fetching entities");
        let rows = self.run_query(&source.query(limit)).await?;
        info!(source = source.label(), rows = rows.len(), "Fetched entities");
        Ok(rows)
    }
}
