//! Bundled HTTP transport over `reqwest`.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use url::Url;

use preroll_contracts::{MediaResponse, MediaTransport, TransportError};

/// HTTP-based streaming transport with connection pooling.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport with the default per-request timeout.
    pub fn new() -> Self {
        Self::with_timeout(Duration::from_secs(30))
    }

    /// Create with a custom per-request timeout.
    ///
    /// This deadline covers the whole request including the body read; pair
    /// it with the loader's stall timeout rather than replacing it.
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(10)
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }

    /// Wrap an existing client, keeping whatever pooling and TLS setup the
    /// host already configured.
    pub fn from_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport").finish_non_exhaustive()
    }
}

#[async_trait]
impl MediaTransport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<MediaResponse, TransportError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let total_len = response.content_length();
        let body = response
            .bytes_stream()
            .map(|chunk| {
                chunk
                    .map(|bytes| bytes.to_vec())
                    .map_err(|e| TransportError::Body(e.to_string()))
            })
            .boxed();

        Ok(MediaResponse { total_len, body })
    }
}
