// Function runtime entry points for the legacy and proxy event shapes.
//
// Each invocation is handed to the shared Handle. Adapter failures are
// already folded into the payload, so the runtime only ever sees Ok.

use std::sync::Arc;

use anyhow::Result;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;
use tracing::debug;

use crate::adapters::lambda::{handle_event, handle_proxy_event, ProxyEvent, ProxyResponse};
use crate::handler::Handle;

/// Serve legacy events: the event is the job request, the payload is the result.
pub async fn run_events(handler: Arc<dyn Handle>) -> Result<()> {
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let handler = handler.clone();
        async move {
            debug!(request_id = %event.context.request_id, "Received event");
            Ok::<Value, Error>(handle_event(handler.as_ref(), event.payload).await)
        }
    }))
    .await
    .map_err(|e| anyhow::anyhow!("Function runtime failed: {e}"))
}

/// Serve proxy events: the job request is the JSON body.
pub async fn run_proxy_events(handler: Arc<dyn Handle>) -> Result<()> {
    lambda_runtime::run(service_fn(move |event: LambdaEvent<ProxyEvent>| {
        let handler = handler.clone();
        async move {
            debug!(request_id = %event.context.request_id, "Received proxy event");
            Ok::<ProxyResponse, Error>(handle_proxy_event(handler.as_ref(), event.payload).await)
        }
    }))
    .await
    .map_err(|e| anyhow::anyhow!("Function runtime failed: {e}"))
}
