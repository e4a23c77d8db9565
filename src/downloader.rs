//! HTTP source fetching.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::error::{GaspmError, Result};

/// Capability to fetch a URL's body as text.
///
/// Package descriptors and the CDN client go through this seam rather than
/// holding an HTTP client directly, so callers (and tests) can substitute
/// the transport.
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    /// Plain GET; returns the response body as text.
    async fn fetch_text(&self, url: &str) -> Result<String>;
}

/// reqwest-backed fetcher.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a new fetcher.
    pub fn new(timeout_secs: u64, insecure: bool) -> Result<Self> {
        let mut builder = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(30))
            .user_agent(format!("gaspm/{}", env!("CARGO_PKG_VERSION")));

        if insecure {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl SourceFetcher for HttpFetcher {
    async fn fetch_text(&self, url: &str) -> Result<String> {
        debug!("Fetching {}", url);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(GaspmError::RemoteApi {
                status: response.status().as_u16(),
                message: format!("GET {} failed", url),
            });
        }

        Ok(response.text().await?)
    }
}
