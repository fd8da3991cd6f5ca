// Host adapters: translate one invocation convention into a Handle call and
// the AdapterResponse back into that host's response shape.
//
// None of them knows anything about moderation. A request body that cannot
// even be decoded is still answered with the standard errored envelope and
// status 500, so the oracle node always gets a payload it can parse.

pub mod http;
pub mod lambda;

use crate::error::AdapterError;
use crate::handler::request::AdapterRequest;
use crate::handler::response::AdapterResponse;
use crate::handler::{log_rejection, Handle};

/// Decode a JSON request body. Only bytes that are not JSON at all fail
/// here; field-level problems are left to validation.
pub fn decode_request(body: &[u8]) -> Result<AdapterRequest, AdapterError> {
    serde_json::from_slice(body).map_err(|e| AdapterError::InvalidRequest(e.to_string()))
}

/// Run a decoded request, or answer the decode failure.
async fn dispatch<H>(handler: &H, request: Result<AdapterRequest, AdapterError>) -> AdapterResponse
where
    H: Handle + ?Sized,
{
    match request {
        Ok(request) => handler.handle(request).await,
        Err(e) => {
            log_rejection(&AdapterRequest::default().job_run_id(), &e);
            AdapterResponse::errored(AdapterRequest::default().job_run_id(), &e)
        }
    }
}
