// Request handler: validate, fetch, classify, normalize, respond.
//
// One linear pipeline per request. The classification call cannot start
// until the whole image has been fetched. Every request produces exactly one
// AdapterResponse; nothing is retried and nothing outlives the request.

pub mod request;
pub mod response;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::error::AdapterError;
use crate::ipfs::client::GatewayFetcher;
use crate::ipfs::ContentFetcher;
use crate::moderation::normalize::normalize;
use crate::moderation::rekognition::RekognitionClient;
use crate::moderation::traits::ModerationClient;

use request::{AdapterRequest, ValidatedRequest};
use response::{AdapterResponse, SuccessPayload};

/// The contract every host adapter is written against.
#[async_trait]
pub trait Handle: Send + Sync {
    async fn handle(&self, request: AdapterRequest) -> AdapterResponse;
}

/// Log a request that is being answered with an error. Bad input logs at
/// warn, a downstream failure at error.
pub fn log_rejection(job_run_id: &Value, e: &AdapterError) {
    if e.is_input_error() {
        warn!(job_run_id = %job_run_id, error = %e, "Rejected request");
    } else {
        error!(job_run_id = %job_run_id, error = %e, "Moderation request failed");
    }
}

/// Validate a request, turning a rejection straight into its error response.
fn validate_logged(request: AdapterRequest) -> Result<ValidatedRequest, AdapterResponse> {
    let job_run_id = request.job_run_id();
    match request.validate() {
        Ok(validated) => {
            info!(job_run_id = %validated.job_run_id, hash = %validated.hash, "Handling moderation request");
            Ok(validated)
        }
        Err(e) => {
            log_rejection(&job_run_id, &e);
            Err(AdapterResponse::errored(job_run_id, &e))
        }
    }
}

/// Runs the pipeline against the given collaborators.
pub struct RequestHandler {
    fetcher: Arc<dyn ContentFetcher>,
    moderator: Arc<dyn ModerationClient>,
}

impl RequestHandler {
    pub fn new(fetcher: Arc<dyn ContentFetcher>, moderator: Arc<dyn ModerationClient>) -> Self {
        Self { fetcher, moderator }
    }

    /// Fetch, classify and normalize one validated request.
    pub async fn process(&self, request: ValidatedRequest) -> Result<SuccessPayload, AdapterError> {
        let image = self
            .fetcher
            .fetch(&request.hash)
            .await
            .map_err(AdapterError::Fetch)?;

        debug!(hash = %request.hash, bytes = image.len(), "Submitting image for moderation");

        let output = self
            .moderator
            .detect_moderation_labels(&image)
            .await
            .map_err(AdapterError::Moderation)?;

        let result = normalize(&output.moderation_labels).to_string();

        debug!(hash = %request.hash, result = %result, "Normalized moderation labels");

        Ok(SuccessPayload::new(request.job_run_id, output, result))
    }

    async fn process_logged(&self, request: ValidatedRequest) -> AdapterResponse {
        let job_run_id = request.job_run_id.clone();
        let result = self.process(request).await;
        if let Err(e) = &result {
            log_rejection(&job_run_id, e);
        }
        AdapterResponse::from_result(job_run_id, result)
    }
}

#[async_trait]
impl Handle for RequestHandler {
    async fn handle(&self, request: AdapterRequest) -> AdapterResponse {
        match validate_logged(request) {
            Ok(validated) => self.process_logged(validated).await,
            Err(rejected) => rejected,
        }
    }
}

/// Handler that reads its configuration from the environment on every call.
///
/// Validation happens before any client is built, so a bad request is
/// reported the same way whether or not the adapter is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvHandler;

impl EnvHandler {
    async fn build(config: &Config) -> anyhow::Result<RequestHandler> {
        let fetcher = GatewayFetcher::from_config(config)?;
        let moderator = RekognitionClient::from_config(config).await;
        Ok(RequestHandler::new(Arc::new(fetcher), Arc::new(moderator)))
    }
}

#[async_trait]
impl Handle for EnvHandler {
    async fn handle(&self, request: AdapterRequest) -> AdapterResponse {
        let validated = match validate_logged(request) {
            Ok(validated) => validated,
            Err(rejected) => return rejected,
        };
        let job_run_id = validated.job_run_id.clone();

        let config = Config::load();
        match Self::build(&config).await {
            Ok(handler) => handler.process_logged(validated).await,
            Err(e) => {
                let e = AdapterError::Fetch(e);
                log_rejection(&job_run_id, &e);
                AdapterResponse::errored(job_run_id, &e)
            }
        }
    }
}
