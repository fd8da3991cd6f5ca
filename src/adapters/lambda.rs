// Function-runtime adapters.
//
// Legacy events carry the job request as the event itself and expect the
// bare payload back. Proxy events (API gateway style) carry it as a JSON
// string in `body`, optionally base64-encoded, and expect a status code plus
// a JSON string body.

use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{decode_request, dispatch};
use crate::error::AdapterError;
use crate::handler::request::AdapterRequest;
use crate::handler::Handle;

/// The parts of a proxy event this adapter reads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyEvent {
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

/// Proxy-integration response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    pub body: String,
    pub is_base64_encoded: bool,
}

/// Handle a legacy event. The status code is not part of this shape, only
/// the payload is returned.
pub async fn handle_event<H>(handler: &H, event: Value) -> Value
where
    H: Handle + ?Sized,
{
    handler.handle(AdapterRequest::from(event)).await.payload_json()
}

/// Handle a proxy event.
pub async fn handle_proxy_event<H>(handler: &H, event: ProxyEvent) -> ProxyResponse
where
    H: Handle + ?Sized,
{
    let response = dispatch(handler, proxy_request(&event)).await;
    ProxyResponse {
        status_code: response.status_code,
        body: response.payload_json().to_string(),
        is_base64_encoded: false,
    }
}

fn proxy_request(event: &ProxyEvent) -> Result<AdapterRequest, AdapterError> {
    let body = event
        .body
        .as_deref()
        .ok_or_else(|| AdapterError::InvalidRequest("event has no body".to_string()))?;

    if event.is_base64_encoded {
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(body)
            .map_err(|e| AdapterError::InvalidRequest(format!("body is not valid base64: {e}")))?;
        decode_request(&decoded)
    } else {
        decode_request(body.as_bytes())
    }
}
