//! HTTPS probe transport

use crate::error::{AwsError, Result};
use async_trait::async_trait;
use bucketclaim_core::Fetcher;
use std::time::Duration;

/// Transport settings, applied once to the fetcher's own client
#[derive(Debug, Clone)]
pub struct TransportConfig {
    /// Skip certificate verification
    pub accept_invalid_certs: bool,

    /// Per-request timeout
    pub timeout: Option<Duration>,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            accept_invalid_certs: false,
            timeout: Some(Duration::from_secs(30)),
        }
    }
}

/// `Fetcher` backed by `reqwest`
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(config: &TransportConfig) -> Result<Self> {
        if config.accept_invalid_certs {
            tracing::warn!("Certificate verification is disabled for probe requests");
        }

        let mut builder =
            reqwest::Client::builder().danger_accept_invalid_certs(config.accept_invalid_certs);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }

    async fn get(&self, url: &str) -> Result<Vec<u8>> {
        let request_error = |source| AwsError::Request {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().await.map_err(request_error)?;
        tracing::debug!("GET {} -> {}", url, response.status());

        let body = response.bytes().await.map_err(request_error)?;
        Ok(body.to_vec())
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    /// Any status code is a successful fetch; only transport errors fail.
    async fn fetch(&self, url: &str) -> bucketclaim_core::Result<Vec<u8>> {
        Ok(self.get(url).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bucketclaim_core::ClaimError;

    #[test]
    fn test_build_with_insecure_transport() {
        let config = TransportConfig {
            accept_invalid_certs: true,
            timeout: None,
        };
        assert!(HttpFetcher::new(&config).is_ok());
    }

    #[tokio::test]
    async fn test_fetch_without_host_is_fetch_error() {
        let fetcher = HttpFetcher::new(&TransportConfig::default()).unwrap();
        let err = fetcher.fetch("https://").await.unwrap_err();

        assert!(matches!(err, ClaimError::Fetch(ref msg) if msg.contains("https://")));
        assert!(!err.is_fatal());
    }
}
