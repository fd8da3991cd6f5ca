// Router tests for the HTTP host: driven in-process with tower's oneshot.

#![cfg(feature = "web")]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use truesight_adapter::handler::request::AdapterRequest;
use truesight_adapter::handler::response::{AdapterResponse, SuccessPayload};
use truesight_adapter::handler::Handle;
use truesight_adapter::moderation::traits::ModerationOutput;
use truesight_adapter::web::{build_router, AppState};

struct FixedHandler;

#[async_trait]
impl Handle for FixedHandler {
    async fn handle(&self, request: AdapterRequest) -> AdapterResponse {
        let job_run_id = request.job_run_id();
        match request.validate() {
            Ok(validated) => AdapterResponse::success(SuccessPayload::new(
                validated.job_run_id,
                ModerationOutput::default(),
                "0,0,0,0,0".to_string(),
            )),
            Err(e) => AdapterResponse::errored(job_run_id, &e),
        }
    }
}

fn router() -> axum::Router {
    build_router(AppState {
        handler: Arc::new(FixedHandler),
    })
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn post(body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

#[tokio::test]
async fn health_is_ok() {
    let response = router()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"status": "ok"}));
}

#[tokio::test]
async fn post_job_returns_payload() {
    let response = router()
        .oneshot(post(r#"{"id":"1","data":{"hash":"Qm123"}}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["jobRunID"], json!("1"));
    assert_eq!(body["data"]["result"], json!("0,0,0,0,0"));
}

#[tokio::test]
async fn invalid_job_is_500_with_envelope() {
    let response = router()
        .oneshot(post(r#"{"id":"1","data":{}}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], json!("Content hash required"));
}

#[tokio::test]
async fn malformed_json_is_500_not_4xx() {
    let response = router().oneshot(post("{")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["status"], json!("errored"));
}
