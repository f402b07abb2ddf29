//! HTTP router and handlers

use std::sync::Arc;
use std::time::Duration;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::{
    catch_panic::CatchPanicLayer, compression::CompressionLayer, cors::CorsLayer,
    limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use tracing::{debug, error};

use crate::Error;
use crate::assistant::Assistant;
use crate::insertion::{InsertionMode, InsertionResult, StrategyKind};

/// Shared application state
pub struct AppState {
    /// Analysis and insertion operations
    pub assistant: Arc<Assistant>,
}

/// Limits applied to every request
#[derive(Debug, Clone, Copy)]
pub struct RouterLimits {
    /// Request timeout
    pub request_timeout: Duration,
    /// Maximum request body size (bytes)
    pub max_body_size: usize,
}

impl Default for RouterLimits {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(60),
            max_body_size: 1024 * 1024,
        }
    }
}

/// Create the router
pub fn create_router(state: Arc<AppState>, limits: RouterLimits) -> Router {
    #[allow(deprecated)]
    let timeout = TimeoutLayer::new(limits.request_timeout);

    Router::new()
        .route("/health", get(health_handler))
        .route("/analyze", post(analyze_handler))
        .route("/insert-keyword", post(insert_keyword_handler))
        .layer(RequestBodyLimitLayer::new(limits.max_body_size))
        .layer(timeout)
        .layer(CatchPanicLayer::new())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// `{"error": ...}` body with the error's status code; server errors add `details`
fn error_response(e: &Error) -> Response {
    let status = e.status_code();
    if status.is_server_error() {
        error!(error = %e, "Request failed");
        let body = json!({ "error": "Request failed", "details": e.to_string() });
        return (status, Json(body)).into_response();
    }
    debug!(error = %e, "Request rejected");
    (status, Json(json!({ "error": e.to_string() }))).into_response()
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let assistant = &state.assistant;
    Json(json!({
        "status": "Backend is running",
        "version": env!("CARGO_PKG_VERSION"),
        "textrazorKeySet": assistant.has_extractor(),
        "geminiKeySet": assistant.has_generator(),
        "similarityCache": assistant.inserter().cache().stats(),
    }))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AnalyzeRequest {
    text: String,
}

/// Analyze handler (POST /analyze)
async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Response {
    let text = body.map(|Json(req)| req.text).unwrap_or_default();
    match state.assistant.analyze(&text).await {
        Ok(analysis) => (StatusCode::OK, Json(analysis)).into_response(),
        Err(e) => error_response(&e),
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct InsertRequest {
    text: String,
    keyword: String,
    mode: Option<InsertionMode>,
}

/// Insertion as reported to browser clients: offsets in UTF-16 code units
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InsertResponse {
    updated_text: String,
    inserted_at: usize,
    keyword_length: usize,
    strategy: StrategyKind,
}

impl From<InsertionResult> for InsertResponse {
    fn from(result: InsertionResult) -> Self {
        Self {
            inserted_at: result.utf16_inserted_at(),
            keyword_length: result.utf16_keyword_len(),
            strategy: result.strategy,
            updated_text: result.updated_text,
        }
    }
}

/// Keyword insertion handler (POST /insert-keyword)
async fn insert_keyword_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<InsertRequest>, JsonRejection>,
) -> Response {
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!(error = %rejection, "Malformed insert request");
            InsertRequest::default()
        }
    };

    match state
        .assistant
        .insert(&request.text, &request.keyword, request.mode)
        .await
    {
        Ok(result) => (StatusCode::OK, Json(InsertResponse::from(result))).into_response(),
        Err(e) => error_response(&e),
    }
}
