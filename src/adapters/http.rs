// Generic HTTP adapter: the request body is the job request, the response is
// the handler's status code with the payload as JSON.

use super::{decode_request, dispatch};
use crate::handler::response::AdapterResponse;
use crate::handler::Handle;

/// Handle a raw HTTP request body.
pub async fn handle_body<H>(handler: &H, body: &[u8]) -> AdapterResponse
where
    H: Handle + ?Sized,
{
    dispatch(handler, decode_request(body)).await
}
