//! Request handlers.

use axum::extract::{Form, Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info, warn};

use crate::server::AppState;
use entity_search_pipeline::{IndexingStatus, StartOutcome};
use entity_search_repository::{NoResultReason, SearchOutcome};
use entity_search_shared::SearchHit;

const INDEXING_PAGE: &str = include_str!("../../assets/indexing_status.html");

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    query: Option<String>,
    page: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchForm {
    query: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Warning,
    Error,
}

/// Advisory message shown above the results.
#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SearchResults {
    pub hits: Vec<SearchHit>,
    pub total: u64,
}

/// Body of the search endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchView {
    pub query: String,
    pub page: usize,
    pub total_pages: u64,
    /// `None` when no search was run.
    pub results: Option<SearchResults>,
    pub notices: Vec<Notice>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StartResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// `GET /?query=...&page=...`
pub async fn search_get(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<SearchView> {
    let query = params.query.unwrap_or_default();
    Json(run_search(&state, &query, params.page.unwrap_or(1)).await)
}

/// `POST /` with a form-encoded `query`; `page` stays in the query string.
pub async fn search_post(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
    Form(form): Form<SearchForm>,
) -> Json<SearchView> {
    let query = form.query.or(params.query).unwrap_or_default();
    Json(run_search(&state, &query, params.page.unwrap_or(1)).await)
}

async fn run_search(state: &AppState, query: &str, page: usize) -> SearchView {
    let query = query.trim();
    let page = page.max(1);
    let mut view = SearchView {
        query: query.to_string(),
        page,
        total_pages: 0,
        results: None,
        notices: Vec::new(),
    };

    match state.search.search(query, page).await {
        Ok(SearchOutcome::Page(result)) => {
            view.total_pages = result.total_pages;
            view.results = Some(SearchResults {
                hits: result.hits,
                total: result.total,
            });
        }
        Ok(SearchOutcome::NoResult(NoResultReason::EmptyQuery)) => {}
        Ok(SearchOutcome::NoResult(NoResultReason::IndexMissing)) => {
            view.results = Some(SearchResults {
                hits: Vec::new(),
                total: 0,
            });
            view.notices.push(Notice {
                level: NoticeLevel::Warning,
                message: format!(
                    "The index '{}' does not exist. Please run indexing first.",
                    state.index_name
                ),
            });
        }
        Err(e) if e.is_connection() => {
            warn!(error = %e, "Search engine unreachable");
            view.notices.push(Notice {
                level: NoticeLevel::Error,
                message: "Unable to connect to the search engine. Check that the service is running."
                    .to_string(),
            });
        }
        Err(e) => {
            error!(error = %e, query = %query, "Search failed");
            view.notices.push(Notice {
                level: NoticeLevel::Error,
                message: "The search could not be completed.".to_string(),
            });
        }
    }

    view
}

/// `GET /index`
pub async fn indexing_page() -> Html<&'static str> {
    Html(INDEXING_PAGE)
}

/// `POST /start-indexing`
pub async fn start_indexing(State(state): State<AppState>) -> Response {
    if state.worker.status().is_running().await {
        return Json(already_running()).into_response();
    }

    let client = match state.connection.get().await {
        Ok(client) => client,
        Err(e) => {
            warn!(error = %e, "Cannot start indexing without a search engine connection");
            let body = StartResponse {
                status: "error",
                message: "Unable to connect to the search engine.",
            };
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
        }
    };

    match state.worker.start(client).await {
        StartOutcome::Started => {
            info!("Indexing run started");
            Json(StartResponse {
                status: "started",
                message: "Indexing has started.",
            })
            .into_response()
        }
        StartOutcome::AlreadyRunning => Json(already_running()).into_response(),
    }
}

fn already_running() -> StartResponse {
    StartResponse {
        status: "already_running",
        message: "An indexing run is already in progress.",
    }
}

/// `GET /check-status`
pub async fn check_status(State(state): State<AppState>) -> Json<IndexingStatus> {
    Json(state.worker.status().snapshot().await)
}

/// `GET /health`
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
