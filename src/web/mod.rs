// Web server: Axum host for the generic HTTP adapter.
//
// POST / takes the job request as its body and answers with the handler's
// status code and JSON payload. The body is read as raw bytes rather than
// through the Json extractor, so malformed input gets the standard errored
// envelope with a 500 instead of axum's own 4xx rejection.

use std::sync::Arc;

use anyhow::Result;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::adapters::http::handle_body;
use crate::handler::Handle;

/// Shared application state threaded through all Axum handlers.
#[derive(Clone)]
pub struct AppState {
    pub handler: Arc<dyn Handle>,
}

/// Start the Axum web server and block until it exits.
pub async fn run_server(handler: Arc<dyn Handle>, port: u16, bind: &str) -> Result<()> {
    let app = build_router(AppState { handler });

    let addr = format!("{bind}:{port}");
    info!("TrueSight adapter listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", post(run_job))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// POST /: run one moderation job.
async fn run_job(State(state): State<AppState>, body: Bytes) -> Response {
    let response = handle_body(state.handler.as_ref(), &body).await;
    let status =
        StatusCode::from_u16(response.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(response.payload)).into_response()
}

/// Health check: always returns 200 OK.
async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}
