//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchEngineClient`
//! using the OpenSearch Rust client.

use std::time::Duration;

use async_trait::async_trait;
use opensearch::{
    http::request::JsonBody,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesDeleteParts, IndicesExistsParts, IndicesRefreshParts},
    BulkParts, OpenSearch, SearchParts,
};
use serde_json::{json, Value};
use tracing::{debug, error, info, warn};
use url::Url;

use crate::errors::SearchError;
use crate::interfaces::SearchEngineClient;
use crate::opensearch::index_config::{get_index_settings, IndexConfig};
use crate::types::{BulkIndexSummary, SearchResponse};
use entity_search_query::ComposedSearch;
use entity_search_shared::{EntityDocument, SearchHit};

/// Number of per-document bulk errors kept in a summary.
const MAX_REPORTED_ERRORS: usize = 5;

/// OpenSearch client implementation.
///
/// Documents are keyed by their entity URI, so re-indexing the same entity
/// overwrites the previous version.
///
/// # Example
///
/// ```ignore
/// use entity_search_repository::opensearch::{IndexConfig, OpenSearchClient};
///
/// let config = IndexConfig::new("wikidata_advanced_index");
/// let client = OpenSearchClient::new("http://localhost:9200", config, timeout)?;
///
/// client.recreate_index().await?;
/// let summary = client.bulk_index(&documents).await?;
/// client.refresh().await?;
/// ```
pub struct OpenSearchClient {
    client: OpenSearch,
    index_config: IndexConfig,
}

impl OpenSearchClient {
    /// Create a new OpenSearch client for the specified URL.
    ///
    /// No request is sent here; reachability is checked by `health_check`.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    /// * `index_config` - The index configuration
    /// * `timeout` - Timeout applied to every request
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClient)` - A new client instance
    /// * `Err(SearchError)` - If the URL is invalid or transport setup fails
    pub fn new(
        url: &str,
        index_config: IndexConfig,
        timeout: Duration,
    ) -> Result<Self, SearchError> {
        let parsed_url = Url::parse(url).map_err(|e| SearchError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .timeout(timeout)
            .build()
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(
            url = %url,
            index = %index_config.name,
            "Created OpenSearch client"
        );

        Ok(Self {
            client,
            index_config,
        })
    }

    /// Parse a single search hit from the OpenSearch response.
    ///
    /// Returns `None` if the hit has no id or its source does not
    /// deserialize into an entity document.
    fn parse_hit(hit: &Value) -> Option<SearchHit> {
        let id = hit.get("_id")?.as_str()?.to_string();
        let score = hit.get("_score").and_then(Value::as_f64).unwrap_or(0.0);
        let source = hit.get("_source")?;

        match serde_json::from_value::<EntityDocument>(source.clone()) {
            Ok(document) => Some(SearchHit {
                id,
                score,
                document,
            }),
            Err(e) => {
                warn!(id = %id, error = %e, "Skipping hit with unreadable source");
                None
            }
        }
    }

    /// Read `hits.total` which is an object on OpenSearch 2.x and a bare
    /// number on older engines.
    fn parse_total(body: &Value) -> u64 {
        let total = &body["hits"]["total"];
        total
            .get("value")
            .and_then(Value::as_u64)
            .or_else(|| total.as_u64())
            .unwrap_or(0)
    }

    /// Summarize the `items` array of a bulk response.
    fn parse_bulk_response(body: &Value, submitted: usize) -> BulkIndexSummary {
        let items = body["items"].as_array().map(Vec::as_slice).unwrap_or(&[]);

        let mut summary = BulkIndexSummary {
            total: submitted,
            ..Default::default()
        };

        for item in items {
            let result = &item["index"];
            match result.get("error") {
                Some(err) if !err.is_null() => {
                    summary.failed += 1;
                    if summary.errors.len() < MAX_REPORTED_ERRORS {
                        let id = result["_id"].as_str().unwrap_or("<unknown>");
                        let reason = err["reason"].as_str().unwrap_or("unknown reason");
                        summary.errors.push(format!("{}: {}", id, reason));
                    }
                }
                _ => summary.succeeded += 1,
            }
        }

        summary
    }

    async fn error_body(response: opensearch::http::response::Response) -> String {
        response.text().await.unwrap_or_default()
    }
}

#[async_trait]
impl SearchEngineClient for OpenSearchClient {
    async fn health_check(&self) -> Result<bool, SearchError> {
        let response = self
            .client
            .ping()
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        Ok(response.status_code().is_success())
    }

    async fn index_exists(&self) -> Result<bool, SearchError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[self.index_config.name.as_str()]))
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let status = response.status_code();
        match status.as_u16() {
            200 => Ok(true),
            404 => Ok(false),
            _ => Err(SearchError::query(format!(
                "Index existence check failed with status {}",
                status
            ))),
        }
    }

    /// Drop the entity index if present, then create it.
    ///
    /// A 404 on delete is fine: the index may not exist yet.
    async fn recreate_index(&self) -> Result<(), SearchError> {
        let index = self.index_config.name.as_str();

        let response = self
            .client
            .indices()
            .delete(IndicesDeleteParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchError::index_creation(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() && status.as_u16() != 404 {
            let error_body = Self::error_body(response).await;
            error!(status = %status, body = %error_body, "Index delete failed");
            return Err(SearchError::index_creation(format!(
                "Delete failed with status {}: {}",
                status, error_body
            )));
        }

        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(get_index_settings())
            .send()
            .await
            .map_err(|e| SearchError::index_creation(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = Self::error_body(response).await;
            error!(status = %status, body = %error_body, "Index create failed");
            return Err(SearchError::index_creation(format!(
                "Create failed with status {}: {}",
                status, error_body
            )));
        }

        info!(index = %index, "Recreated entity index");
        Ok(())
    }

    async fn bulk_index(
        &self,
        documents: &[EntityDocument],
    ) -> Result<BulkIndexSummary, SearchError> {
        if documents.is_empty() {
            return Ok(BulkIndexSummary::default());
        }

        let mut body: Vec<JsonBody<Value>> = Vec::with_capacity(documents.len() * 2);
        for document in documents {
            let source = serde_json::to_value(document)
                .map_err(|e| SearchError::serialization(e.to_string()))?;
            body.push(json!({ "index": { "_id": document.uri } }).into());
            body.push(source.into());
        }

        let response = self
            .client
            .bulk(BulkParts::Index(&self.index_config.name))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchError::bulk_index(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = Self::error_body(response).await;
            error!(status = %status, body = %error_body, "Bulk request failed");
            return Err(SearchError::bulk_index(format!(
                "Bulk request failed with status {}: {}",
                status, error_body
            )));
        }

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        let summary = Self::parse_bulk_response(&response_body, documents.len());
        debug!(
            submitted = summary.total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Bulk request completed"
        );
        Ok(summary)
    }

    async fn refresh(&self) -> Result<(), SearchError> {
        let response = self
            .client
            .indices()
            .refresh(IndicesRefreshParts::Index(&[self.index_config.name.as_str()]))
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            return Err(SearchError::query(format!(
                "Refresh failed with status {}",
                status
            )));
        }
        Ok(())
    }

    async fn search(&self, search: &ComposedSearch) -> Result<SearchResponse, SearchError> {
        let response = self
            .client
            .search(SearchParts::Index(&[self.index_config.name.as_str()]))
            .from(search.from as i64)
            .size(search.size as i64)
            .body(search.body())
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = Self::error_body(response).await;
            error!(status = %status, body = %error_body, "Search request failed");
            return Err(SearchError::query(format!(
                "Search failed with status {}: {}",
                status, error_body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        let hits = body["hits"]["hits"]
            .as_array()
            .map(|hits| hits.iter().filter_map(Self::parse_hit).collect())
            .unwrap_or_default();

        Ok(SearchResponse {
            hits,
            total: Self::parse_total(&body),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entity_search_shared::EntityType;

    #[test]
    fn test_parse_hit() {
        let hit = json!({
            "_id": "http://www.wikidata.org/entity/Q44578",
            "_score": 7.25,
            "_source": {
                "uri": "http://www.wikidata.org/entity/Q44578",
                "name": "Titanic",
                "description": "film américain de James Cameron",
                "type": "film",
                "details": {
                    "director": "James Cameron",
                    "release_date": "1997-11-01",
                    "genre": "film dramatique"
                }
            }
        });

        let result = OpenSearchClient::parse_hit(&hit).unwrap();

        assert_eq!(result.id, "http://www.wikidata.org/entity/Q44578");
        assert_eq!(result.score, 7.25);
        assert_eq!(result.document.name, "Titanic");
        assert_eq!(result.document.entity_type(), EntityType::Movie);
    }

    #[test]
    fn test_parse_hit_minimal() {
        let hit = json!({
            "_id": "http://www.wikidata.org/entity/Q142",
            "_score": 1.0,
            "_source": {
                "uri": "http://www.wikidata.org/entity/Q142",
                "name": "France",
                "type": "pays",
                "details": {}
            }
        });

        let result = OpenSearchClient::parse_hit(&hit).unwrap();

        assert_eq!(result.document.entity_type(), EntityType::Country);
        assert!(result.document.description.is_none());
        assert!(result.document.image.is_none());
    }

    #[test]
    fn test_parse_hit_invalid() {
        let missing_id = json!({
            "_score": 1.0,
            "_source": { "uri": "x", "name": "x", "type": "pays", "details": {} }
        });
        assert!(OpenSearchClient::parse_hit(&missing_id).is_none());

        let unknown_type = json!({
            "_id": "x",
            "_score": 1.0,
            "_source": { "uri": "x", "name": "x", "type": "planète", "details": {} }
        });
        assert!(OpenSearchClient::parse_hit(&unknown_type).is_none());
    }

    #[test]
    fn test_parse_total() {
        assert_eq!(
            OpenSearchClient::parse_total(&json!({ "hits": { "total": { "value": 42, "relation": "eq" } } })),
            42
        );
        assert_eq!(OpenSearchClient::parse_total(&json!({ "hits": { "total": 7 } })), 7);
        assert_eq!(OpenSearchClient::parse_total(&json!({})), 0);
    }

    #[test]
    fn test_parse_bulk_response_counts_item_errors() {
        let body = json!({
            "errors": true,
            "items": [
                { "index": { "_id": "a", "status": 201 } },
                { "index": { "_id": "b", "status": 400, "error": { "type": "mapper_parsing_exception", "reason": "failed to parse field [details.birth_date]" } } },
                { "index": { "_id": "c", "status": 200 } }
            ]
        });

        let summary = OpenSearchClient::parse_bulk_response(&body, 3);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.errors.len(), 1);
        assert!(summary.errors[0].starts_with("b: failed to parse"));
    }

    #[test]
    fn test_new_rejects_invalid_url() {
        let result = OpenSearchClient::new(
            "not a url",
            IndexConfig::new("entities"),
            Duration::from_secs(1),
        );
        assert!(matches!(result, Err(SearchError::ConnectionError(_))));
    }
}
