//! Streaming network client contract.

use std::fmt;

use async_trait::async_trait;
use futures::stream::BoxStream;
use thiserror::Error;
use url::Url;

/// Errors produced while issuing a request or reading its body.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Request(String),

    #[error("unexpected status {status} fetching {url}")]
    Status { status: u16, url: String },

    #[error("body read failed: {0}")]
    Body(String),
}

/// Incrementally readable response body.
pub type ByteStream = BoxStream<'static, Result<Vec<u8>, TransportError>>;

/// One in-flight GET response: declared length plus a chunk stream.
pub struct MediaResponse {
    /// Total byte size declared by the response, when present. Absent totals
    /// suppress percentage reporting but not the transfer itself.
    pub total_len: Option<u64>,
    /// Body chunks in arrival order.
    pub body: ByteStream,
}

impl fmt::Debug for MediaResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaResponse")
            .field("total_len", &self.total_len)
            .field("body", &"<stream>")
            .finish()
    }
}

/// Issues plain HTTP GETs and exposes response bodies incrementally.
///
/// Transport implementations own connection pooling, TLS, and per-request
/// timeouts; the loader layers its own stall deadline on top.
#[async_trait]
pub trait MediaTransport: Send + Sync {
    async fn get(&self, url: &Url) -> Result<MediaResponse, TransportError>;
}
