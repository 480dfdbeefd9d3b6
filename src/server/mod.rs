//! HTTP Search Endpoint
//!
//! ## Endpoints
//! - `GET /items/search?q=<query>` - ranked items as a JSON array
//! - `GET /health` - Health check
//!
//! Searches are CPU-bound and run on the blocking pool under a timeout.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Json, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::core::error::SearchError;
use crate::core::search::ProductSearch;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub search: Arc<ProductSearch>,
    pub search_timeout: Duration,
}

impl AppState {
    pub fn new(search: Arc<ProductSearch>, search_timeout: Duration) -> Self {
        Self {
            search,
            search_timeout,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/items/search", get(search_items))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(state: AppState, addr: &str) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Search endpoint listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    log::info!("Shutdown signal received");
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn search_items(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Response {
    let search = Arc::clone(&state.search);
    let query = params.q;
    let task = tokio::task::spawn_blocking(move || search.search(&query));

    match tokio::time::timeout(state.search_timeout, task).await {
        Ok(Ok(Ok(items))) => Json(items).into_response(),
        Ok(Ok(Err(e))) => search_error_response(e),
        Ok(Err(join_error)) => {
            log::error!("Search task failed: {}", join_error);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "search task failed".to_string(),
            )
        }
        Err(_) => {
            log::warn!("Search timed out after {:?}", state.search_timeout);
            error_response(
                StatusCode::GATEWAY_TIMEOUT,
                "timeout_error",
                format!("search timed out after {:?}", state.search_timeout),
            )
        }
    }
}

/// Convert SearchError to HTTP error response
fn search_error_response(error: SearchError) -> Response {
    if error.is_dependency_unavailable() {
        log::error!("Search unavailable: {}", error);
        return error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "service_unavailable",
            error.to_string(),
        );
    }
    log::error!("Search failed: {}", error);
    error_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal_error",
        error.to_string(),
    )
}

fn error_response(status: StatusCode, error_type: &str, message: String) -> Response {
    (
        status,
        Json(serde_json::json!({
            "error": {
                "message": message,
                "type": error_type
            }
        })),
    )
        .into_response()
}
