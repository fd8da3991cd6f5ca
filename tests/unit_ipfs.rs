// IPFS gateway client tests against a local gateway stand-in served with
// axum on an ephemeral port.

#![cfg(feature = "web")]

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;

use truesight_adapter::ipfs::client::GatewayFetcher;
use truesight_adapter::ipfs::ContentFetcher;

const IMAGE: &[u8] = b"\x89PNG\r\n\x1a\n fake image bytes";

/// Serve a gateway that knows one object and fails another. Everything
/// else is axum's default 404.
async fn spawn_gateway() -> String {
    let app = Router::new()
        .route("/ipfs/QmFound", get(|| async { IMAGE }))
        .route(
            "/ipfs/QmBroken",
            get(|| async { (StatusCode::BAD_GATEWAY, "<html>upstream timed out</html>") }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

fn fetcher(gateway: &str) -> GatewayFetcher {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    GatewayFetcher::with_client(client, gateway)
}

// ============================================================
// Responses
// ============================================================

#[tokio::test]
async fn success_returns_exact_bytes() {
    let gateway = spawn_gateway().await;
    let bytes = fetcher(&gateway).fetch("QmFound").await.unwrap();
    assert_eq!(bytes, IMAGE);
}

#[tokio::test]
async fn not_found_is_an_error_naming_status_and_hash() {
    let gateway = spawn_gateway().await;
    let err = fetcher(&gateway).fetch("QmMissing").await.unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("404"), "{message}");
    assert!(message.contains("QmMissing"), "{message}");
}

#[tokio::test]
async fn error_page_body_is_never_returned() {
    let gateway = spawn_gateway().await;
    let err = fetcher(&gateway).fetch("QmBroken").await.unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("502"), "{message}");
    assert!(!message.contains("upstream timed out"), "{message}");
}

#[tokio::test]
async fn trailing_slash_on_gateway_is_ignored() {
    let gateway = spawn_gateway().await;
    let bytes = fetcher(&format!("{gateway}/")).fetch("QmFound").await.unwrap();
    assert_eq!(bytes, IMAGE);
}

// ============================================================
// Transport
// ============================================================

#[tokio::test]
async fn unreachable_gateway_is_a_request_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = fetcher(&format!("http://{addr}"))
        .fetch("QmFound")
        .await
        .unwrap_err();
    assert!(
        err.to_string().contains("IPFS gateway request failed for QmFound"),
        "{err:#}"
    );
}
