// HTTP client for an IPFS gateway.
//
// One GET per request, no retries, no timeout of its own. The host runtime's
// invocation timeout is the only bound. A non-2xx status is an error: gateways
// answer missing content with an HTML error page, which must never reach the
// moderation service as if it were an image.

use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::debug;

use super::ContentFetcher;
use crate::config::Config;

/// Client for a single IPFS HTTP gateway.
pub struct GatewayFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl GatewayFetcher {
    /// Create a fetcher for the given gateway.
    ///
    /// `gateway` is normally a bare host (`ipfs.io`), which is served over
    /// https. A value that already carries a scheme is used as-is.
    pub fn new(gateway: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("truesight-adapter/0.1 (image-moderation)")
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self::with_client(client, gateway))
    }

    /// Create a fetcher that sends through an existing client.
    pub fn with_client(client: reqwest::Client, gateway: &str) -> Self {
        Self {
            client,
            base_url: gateway_base_url(gateway),
        }
    }

    /// Create a fetcher from loaded configuration. Fails if no gateway is set.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.require_gateway()?)
    }

    /// The URL an object with this hash is served from.
    pub fn object_url(&self, hash: &str) -> String {
        format!("{}/ipfs/{}", self.base_url, hash)
    }
}

#[async_trait]
impl ContentFetcher for GatewayFetcher {
    async fn fetch(&self, hash: &str) -> Result<Vec<u8>> {
        let url = self.object_url(hash);

        debug!(url = %url, "Fetching content from IPFS gateway");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("IPFS gateway request failed for {hash}"))?;

        if !response.status().is_success() {
            let status = response.status();
            anyhow::bail!("IPFS gateway returned {status} for {hash}");
        }

        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read IPFS gateway response for {hash}"))?;

        debug!(hash = hash, bytes = bytes.len(), "Fetched content");

        Ok(bytes.to_vec())
    }
}

/// Normalize a configured gateway into a base URL without a trailing slash.
fn gateway_base_url(gateway: &str) -> String {
    let gateway = gateway.trim().trim_end_matches('/');
    if gateway.starts_with("https://") || gateway.starts_with("http://") {
        gateway.to_string()
    } else {
        format!("https://{gateway}")
    }
}
