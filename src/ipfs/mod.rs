// IPFS: content-addressed image retrieval through an HTTP gateway.
//
// The ContentFetcher trait is the seam the request handler depends on.
// GatewayFetcher implements it with a plain GET against
// `https://{gateway}/ipfs/{hash}`, buffering the whole body.

pub mod client;

use anyhow::Result;
use async_trait::async_trait;

/// Fetches the raw bytes of an immutable object by content hash.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch(&self, hash: &str) -> Result<Vec<u8>>;
}
