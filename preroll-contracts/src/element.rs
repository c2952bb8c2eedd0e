//! Abstraction over a playable media target.

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

use preroll_model::ElementId;

/// Errors surfaced by a media element implementation.
#[derive(Debug, Error)]
pub enum ElementError {
    /// Assigning a source to the element failed (bad data, decode error).
    #[error("failed to attach source: {0}")]
    Attach(String),

    /// Playback start was refused by host policy (e.g. autoplay
    /// restrictions). Non-fatal: the loader marks the element ready anyway,
    /// since playback cannot be forced.
    #[error("playback rejected by host policy: {0}")]
    PlaybackRejected(String),

    /// Playback initiation failed for any other reason.
    #[error("playback failed: {0}")]
    Playback(String),
}

impl ElementError {
    /// Whether this error is a policy rejection rather than a real failure.
    pub fn is_policy_rejection(&self) -> bool {
        matches!(self, ElementError::PlaybackRejected(_))
    }
}

/// A playable media target owned by the host.
///
/// The loader never inspects host UI state through this trait; it only reads
/// locators and assigns results. Implementations must be cheap to clone
/// behind an `Arc` and safe to call from spawned tasks.
#[async_trait]
pub trait MediaElement: Send + Sync {
    /// Stable identity used for registration dedupe.
    fn id(&self) -> ElementId;

    /// The deferred source locator, if the element has anything to fetch.
    ///
    /// `None` means there is no fetchable resource; the loader marks such
    /// elements loaded immediately and never retries them.
    fn deferred_source(&self) -> Option<Url>;

    /// Preview/poster locator shown while the real resource loads.
    fn poster(&self) -> Option<Url>;

    /// Assign a fully buffered local resource assembled from streamed bytes.
    async fn attach_buffered(&self, data: Vec<u8>) -> Result<(), ElementError>;

    /// Assign the remote locator directly, letting the element stream
    /// natively. Used by the fallback path and the `Direct` load strategy.
    async fn attach_remote(&self, url: &Url) -> Result<(), ElementError>;

    /// Request playback. Resolves once the element signals ready-to-play,
    /// or fails with [`ElementError::PlaybackRejected`] when host policy
    /// refuses to start.
    async fn begin_playback(&self) -> Result<(), ElementError>;
}
