//! HTTP surface of the entity search service.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET, POST | `/` | Search (`query`, `page`) |
//! | GET | `/index` | Indexing status page |
//! | POST | `/start-indexing` | Start a background indexing run |
//! | GET | `/check-status` | Current indexing status |
//! | GET | `/health` | Service liveness |

mod handlers;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use entity_search_pipeline::IndexingWorker;
use entity_search_repository::{EntitySearchClient, SearchConnection};

pub use handlers::{Notice, NoticeLevel, SearchResults, SearchView, StartResponse};

/// Shared application state for the HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    search: Arc<EntitySearchClient>,
    connection: Arc<SearchConnection>,
    worker: IndexingWorker,
    index_name: Arc<str>,
}

impl AppState {
    pub fn new(
        search: Arc<EntitySearchClient>,
        connection: Arc<SearchConnection>,
        worker: IndexingWorker,
        index_name: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            search,
            connection,
            worker,
            index_name: index_name.into(),
        }
    }
}

/// Build the router with all routes and the request tracing layer.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::search_get).post(handlers::search_post))
        .route("/index", get(handlers::indexing_page))
        .route("/start-indexing", post(handlers::start_indexing))
        .route("/check-status", get(handlers::check_status))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use entity_search_pipeline::collector::{Binding, BindingSource, BindingValue, EntitySource};
    use entity_search_pipeline::{IndexingStatusHandle, LoaderConfig, PipelineError, SourceLimits};
    use entity_search_query::ComposedSearch;
    use entity_search_repository::{
        BulkIndexSummary, Connector, SearchEngineClient, SearchError, SearchResponse,
    };
    use entity_search_shared::{EntityDetails, EntityDocument, MovieDetails, SearchHit};
    use serde_json::Value;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::time::Duration;
    use tower::ServiceExt;

    struct MockEngine {
        index_exists: bool,
        response: SearchResponse,
        last_search: Mutex<Option<ComposedSearch>>,
    }

    #[async_trait]
    impl SearchEngineClient for MockEngine {
        async fn health_check(&self) -> Result<bool, SearchError> {
            Ok(true)
        }

        async fn index_exists(&self) -> Result<bool, SearchError> {
            Ok(self.index_exists)
        }

        async fn recreate_index(&self) -> Result<(), SearchError> {
            Ok(())
        }

        async fn bulk_index(
            &self,
            documents: &[EntityDocument],
        ) -> Result<BulkIndexSummary, SearchError> {
            Ok(BulkIndexSummary {
                total: documents.len(),
                succeeded: documents.len(),
                ..Default::default()
            })
        }

        async fn refresh(&self) -> Result<(), SearchError> {
            Ok(())
        }

        async fn search(&self, search: &ComposedSearch) -> Result<SearchResponse, SearchError> {
            *self.last_search.lock().unwrap() = Some(search.clone());
            Ok(self.response.clone())
        }
    }

    /// `None` simulates an unreachable engine.
    struct MockConnector(Option<Arc<MockEngine>>);

    #[async_trait]
    impl Connector for MockConnector {
        async fn connect(&self) -> Result<Arc<dyn SearchEngineClient>, SearchError> {
            match &self.0 {
                Some(engine) => Ok(engine.clone()),
                None => Err(SearchError::connection("connection refused")),
            }
        }
    }

    struct OneMovie;

    #[async_trait]
    impl BindingSource for OneMovie {
        async fn fetch(
            &self,
            source: EntitySource,
            _limit: usize,
        ) -> Result<Vec<Binding>, PipelineError> {
            if source != EntitySource::Movies {
                return Ok(Vec::new());
            }
            let mut row = HashMap::new();
            for (key, value) in [
                ("item", "http://www.wikidata.org/entity/Q25188"),
                ("itemLabel", "Avatar"),
            ] {
                row.insert(key.to_string(), BindingValue { value: value.to_string() });
            }
            Ok(vec![row])
        }
    }

    fn avatar_hit() -> SearchHit {
        SearchHit {
            id: "http://www.wikidata.org/entity/Q25188".to_string(),
            score: 3.5,
            document: EntityDocument::new(
                "http://www.wikidata.org/entity/Q25188",
                "Avatar",
                EntityDetails::Movie(MovieDetails {
                    director: Some("James Cameron".to_string()),
                    ..Default::default()
                }),
            ),
        }
    }

    fn state(engine: Option<Arc<MockEngine>>) -> AppState {
        let connection = Arc::new(SearchConnection::new(Box::new(MockConnector(engine))));
        let search = Arc::new(EntitySearchClient::new(Arc::clone(&connection), 10));
        let worker = IndexingWorker::new(
            Arc::new(OneMovie),
            SourceLimits::default(),
            LoaderConfig::default(),
            IndexingStatusHandle::new(),
        );
        AppState::new(search, connection, worker, "wikidata_advanced_index")
    }

    fn engine(index_exists: bool, response: SearchResponse) -> Arc<MockEngine> {
        Arc::new(MockEngine {
            index_exists,
            response,
            last_search: Mutex::new(None),
        })
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_search_returns_page() {
        let engine = engine(
            true,
            SearchResponse {
                hits: vec![avatar_hit()],
                total: 21,
            },
        );
        let app = router(state(Some(engine.clone())));

        let (status, body) = send(
            app,
            get("/?query=films%20r%C3%A9alis%C3%A9s%20par%20James%20Cameron&page=2"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["query"], "films réalisés par James Cameron");
        assert_eq!(body["page"], 2);
        assert_eq!(body["totalPages"], 3);
        assert_eq!(body["results"]["total"], 21);
        assert_eq!(body["results"]["hits"][0]["document"]["name"], "Avatar");
        assert_eq!(body["notices"], serde_json::json!([]));

        let composed = engine.last_search.lock().unwrap().clone().unwrap();
        assert_eq!(composed.from, 10);
        assert_eq!(composed.size, 10);
    }

    #[tokio::test]
    async fn test_search_via_form_post() {
        let engine = engine(true, SearchResponse::default());
        let app = router(state(Some(engine)));

        let request = Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("query=pays"))
            .unwrap();
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["query"], "pays");
        assert_eq!(body["page"], 1);
        assert_eq!(body["results"]["total"], 0);
        assert_eq!(body["totalPages"], 0);
    }

    #[tokio::test]
    async fn test_empty_query_has_no_results() {
        let app = router(state(Some(engine(true, SearchResponse::default()))));

        let (_, body) = send(app, get("/")).await;

        assert_eq!(body["query"], "");
        assert!(body["results"].is_null());
        assert_eq!(body["notices"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_missing_index_warns() {
        let app = router(state(Some(engine(false, SearchResponse::default()))));

        let (status, body) = send(app, get("/?query=pays")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["notices"][0]["level"], "warning");
        assert!(body["notices"][0]["message"]
            .as_str()
            .unwrap()
            .contains("wikidata_advanced_index"));
        assert_eq!(body["results"]["total"], 0);
    }

    #[tokio::test]
    async fn test_connection_failure_is_reported_without_details() {
        let app = router(state(None));

        let (status, body) = send(app, get("/?query=pays")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["notices"][0]["level"], "error");
        assert!(!body["notices"][0]["message"]
            .as_str()
            .unwrap()
            .contains("connection refused"));
        assert!(body["results"].is_null());
    }

    #[tokio::test]
    async fn test_start_indexing_without_engine_fails() {
        let app = router(state(None));

        let request = Request::builder()
            .method("POST")
            .uri("/start-indexing")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app, request).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], "error");
    }

    #[tokio::test]
    async fn test_start_indexing_then_poll_status() {
        let state = state(Some(engine(true, SearchResponse::default())));
        let app = router(state.clone());

        let request = Request::builder()
            .method("POST")
            .uri("/start-indexing")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app.clone(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "started");

        let body = tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let (_, body) = send(app.clone(), get("/check-status")).await;
                if body["isComplete"] == true {
                    return body;
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .unwrap();

        assert_eq!(body["isRunning"], false);
        assert_eq!(body["finalCount"], 1);
    }

    #[tokio::test]
    async fn test_check_status_initial() {
        let app = router(state(None));

        let (status, body) = send(app, get("/check-status")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["isRunning"], false);
        assert_eq!(body["isComplete"], false);
        assert_eq!(body["message"], "No indexing run since startup.");
    }

    #[tokio::test]
    async fn test_indexing_page_is_html() {
        let app = router(state(None));

        let response = app.oneshot(get("/index")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let page = String::from_utf8(body.to_vec()).unwrap();
        assert!(page.contains(r#"<html lang="en">"#));
        assert!(page.contains("/check-status"));
    }

    #[tokio::test]
    async fn test_health() {
        let app = router(state(None));

        let (status, body) = send(app, get("/health")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }
}
