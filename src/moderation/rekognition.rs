// AWS Rekognition implementation of ModerationClient.
//
// DetectModerationLabels accepts the image inline as bytes (JPEG or PNG, up
// to 5 MB). Credentials come from Config when the key pair is set there,
// otherwise from the SDK's default provider chain.
//
// API docs: https://docs.aws.amazon.com/rekognition/latest/APIReference/API_DetectModerationLabels.html

use anyhow::Result;
use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_rekognition::config::Credentials;
use aws_sdk_rekognition::error::DisplayErrorContext;
use aws_sdk_rekognition::primitives::Blob;
use aws_sdk_rekognition::types::Image;
use tracing::debug;

use super::traits::{ModerationClient, ModerationLabel, ModerationOutput};
use crate::config::Config;

/// Rekognition-backed moderation client.
pub struct RekognitionClient {
    client: aws_sdk_rekognition::Client,
}

impl RekognitionClient {
    /// Build a client from the per-invocation configuration.
    pub async fn from_config(config: &Config) -> Self {
        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(region) = &config.aws_region {
            loader = loader.region(Region::new(region.clone()));
        }

        if let Some((access_key_id, secret_access_key)) = config.static_credentials() {
            loader = loader.credentials_provider(Credentials::new(
                access_key_id,
                secret_access_key,
                config.aws_session_token.clone(),
                None,
                "truesight-config",
            ));
        }

        let sdk_config = loader.load().await;
        Self {
            client: aws_sdk_rekognition::Client::new(&sdk_config),
        }
    }
}

#[async_trait]
impl ModerationClient for RekognitionClient {
    async fn detect_moderation_labels(&self, image: &[u8]) -> Result<ModerationOutput> {
        let response = self
            .client
            .detect_moderation_labels()
            .image(Image::builder().bytes(Blob::new(image)).build())
            .send()
            .await
            .map_err(|e| {
                anyhow::anyhow!(
                    "Rekognition DetectModerationLabels failed: {}",
                    DisplayErrorContext(&e)
                )
            })?;

        let moderation_labels: Vec<ModerationLabel> = response
            .moderation_labels()
            .iter()
            .map(|label| ModerationLabel {
                name: label.name().unwrap_or_default().to_string(),
                confidence: label.confidence().map(widen).unwrap_or(0.0),
                parent_name: label
                    .parent_name()
                    .filter(|parent| !parent.is_empty())
                    .map(str::to_string),
            })
            .collect();

        debug!(
            label_count = moderation_labels.len(),
            model_version = ?response.moderation_model_version(),
            "Rekognition returned moderation labels"
        );

        Ok(ModerationOutput {
            moderation_labels,
            moderation_model_version: response.moderation_model_version().map(str::to_string),
        })
    }
}

/// Widen an f32 confidence to f64 through its shortest decimal form, so that
/// 95.8 stays 95.8 in the echoed output instead of 95.80000305175781.
fn widen(value: f32) -> f64 {
    value.to_string().parse().unwrap_or(f64::from(value))
}
