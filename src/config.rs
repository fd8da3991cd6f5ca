use std::env;

use anyhow::Result;

/// Configuration loaded from environment variables.
///
/// Read once per invocation and handed to the clients by value, so a
/// rotated credential is picked up on the next request. The .env file is
/// loaded at startup via dotenvy.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// AWS access key ID. When unset the AWS default credential chain is used.
    pub aws_access_key_id: Option<String>,
    pub aws_secret_access_key: Option<String>,
    /// Session token for temporary credentials (function runtimes set this).
    pub aws_session_token: Option<String>,
    pub aws_region: Option<String>,
    /// IPFS gateway host, e.g. `ipfs.io` or `https://gateway.pinata.cloud`.
    pub ipfs_gateway_url: Option<String>,
}

impl Config {
    /// Load configuration from the process environment.
    pub fn load() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        Self {
            aws_access_key_id: get("AWS_ACCESS_KEY_ID"),
            aws_secret_access_key: get("AWS_SECRET_ACCESS_KEY"),
            aws_session_token: get("AWS_SESSION_TOKEN"),
            aws_region: get("AWS_REGION"),
            ipfs_gateway_url: get("IPFS_GATEWAY_URL"),
        }
    }

    /// Static credentials, if both halves of the key pair are configured.
    pub fn static_credentials(&self) -> Option<(&str, &str)> {
        match (&self.aws_access_key_id, &self.aws_secret_access_key) {
            (Some(id), Some(secret)) => Some((id.as_str(), secret.as_str())),
            _ => None,
        }
    }

    /// Check that the IPFS gateway is configured.
    /// Call this before fetching any content.
    pub fn require_gateway(&self) -> Result<&str> {
        match self.ipfs_gateway_url.as_deref() {
            Some(gateway) => Ok(gateway),
            None => anyhow::bail!(
                "IPFS_GATEWAY_URL not set. Add it to your .env file or the function environment."
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn loads_all_variables() {
        let config = Config::from_lookup(lookup(&[
            ("AWS_ACCESS_KEY_ID", "AKIDEXAMPLE"),
            ("AWS_SECRET_ACCESS_KEY", "secret"),
            ("AWS_REGION", "us-east-1"),
            ("IPFS_GATEWAY_URL", "ipfs.io"),
        ]));
        assert_eq!(config.static_credentials(), Some(("AKIDEXAMPLE", "secret")));
        assert_eq!(config.aws_region.as_deref(), Some("us-east-1"));
        assert_eq!(config.require_gateway().unwrap(), "ipfs.io");
        assert!(config.aws_session_token.is_none());
    }

    #[test]
    fn empty_values_are_unset() {
        let config = Config::from_lookup(lookup(&[
            ("AWS_ACCESS_KEY_ID", ""),
            ("IPFS_GATEWAY_URL", "   "),
        ]));
        assert!(config.aws_access_key_id.is_none());
        assert!(config.require_gateway().is_err());
    }

    #[test]
    fn half_a_key_pair_is_not_static_credentials() {
        let config = Config::from_lookup(lookup(&[("AWS_ACCESS_KEY_ID", "AKIDEXAMPLE")]));
        assert!(config.static_credentials().is_none());
    }

    #[test]
    fn missing_gateway_error_names_the_variable() {
        let err = Config::default().require_gateway().unwrap_err();
        assert!(err.to_string().contains("IPFS_GATEWAY_URL"));
    }
}
