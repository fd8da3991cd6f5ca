// Moderation client trait and the labels it returns.
//
// The output types serialize with the service's PascalCase field names because
// they are echoed verbatim inside the success envelope's `data` object.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A single moderation label detected in an image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModerationLabel {
    pub name: String,
    /// Confidence from 0.0 to 100.0
    pub confidence: f64,
    /// Top-level category for second-level labels (empty or absent for top-level ones)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_name: Option<String>,
}

impl ModerationLabel {
    pub fn new(name: impl Into<String>, confidence: f64) -> Self {
        Self {
            name: name.into(),
            confidence,
            parent_name: None,
        }
    }
}

/// Everything the moderation service reported for one image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ModerationOutput {
    #[serde(default)]
    pub moderation_labels: Vec<ModerationLabel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub moderation_model_version: Option<String>,
}

/// Trait for classifying image bytes. Async because every real provider is
/// a network call.
#[async_trait]
pub trait ModerationClient: Send + Sync {
    async fn detect_moderation_labels(&self, image: &[u8]) -> Result<ModerationOutput>;
}
