//! Streamed fetch-and-attach execution for one dispatched item.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use tracing::{debug, warn};
use url::Url;

use preroll_contracts::{MediaElement, MediaTransport, PresentationHooks};
use preroll_model::{ItemSnapshot, TransferProgress};

use crate::config::LoadStrategy;
use crate::error::{LoaderError, Result};

/// Terminal result of one fetch-and-play operation.
///
/// Every variant converges on the loaded state; none of them is an error the
/// caller can act on. The carried [`LoaderError`]s exist for observability.
#[derive(Debug)]
pub enum FetchOutcome {
    /// Full body streamed, assembled, and attached; playback requested.
    Streamed,
    /// `Direct` strategy: remote locator assigned without a transfer.
    Direct,
    /// The buffered path failed and the remote locator was assigned
    /// directly. Recoverable, not terminal.
    Fallback(LoaderError),
    /// No fetchable source; the element is pinned loaded without a transfer.
    MissingSource,
}

/// Executes one download for a dispatched item: streams bytes with progress
/// reporting, assembles a playable resource, and falls back to direct-URL
/// assignment on failure.
pub struct StreamingFetcher {
    transport: Arc<dyn MediaTransport>,
    hooks: Arc<dyn PresentationHooks>,
    strategy: LoadStrategy,
    stall_timeout: Option<Duration>,
    cleanup_grace: Duration,
}

impl fmt::Debug for StreamingFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StreamingFetcher")
            .field("strategy", &self.strategy)
            .field("stall_timeout", &self.stall_timeout)
            .field("cleanup_grace", &self.cleanup_grace)
            .finish()
    }
}

impl StreamingFetcher {
    pub fn new(
        transport: Arc<dyn MediaTransport>,
        hooks: Arc<dyn PresentationHooks>,
        strategy: LoadStrategy,
        stall_timeout: Option<Duration>,
        cleanup_grace: Duration,
    ) -> Self {
        Self {
            transport,
            hooks,
            strategy,
            stall_timeout,
            cleanup_grace,
        }
    }

    /// Run the full fetch-and-play pipeline for one item.
    ///
    /// Infallible by construction: every failure is folded into the returned
    /// outcome so the caller's completion step always runs.
    pub async fn run(
        &self,
        item: &ItemSnapshot,
        element: &Arc<dyn MediaElement>,
    ) -> FetchOutcome {
        let Some(source) = item.source.clone() else {
            debug!(element = %item.id, "no deferred source, pinning loaded");
            return FetchOutcome::MissingSource;
        };

        if self.strategy == LoadStrategy::Direct {
            return self.attach_direct(item, element, &source).await;
        }

        let attempt = self.stream_and_attach(item, element, &source);
        let result = match self.stall_timeout {
            Some(limit) => match tokio::time::timeout(limit, attempt).await {
                Ok(result) => result,
                Err(_) => Err(LoaderError::Stalled(limit)),
            },
            None => attempt.await,
        };

        match result {
            Ok(()) => {
                self.hooks.on_success(item);
                self.schedule_cleanup(item);
                FetchOutcome::Streamed
            }
            Err(error) => {
                warn!(element = %item.id, %error, "buffered load failed, falling back to remote source");
                if let Err(attach) = element.attach_remote(&source).await {
                    // The element rejected even the raw locator; it still
                    // ends loaded, there is simply nothing more we can do.
                    warn!(element = %item.id, error = %attach, "fallback attach failed");
                }
                self.hooks.on_fallback(item);
                FetchOutcome::Fallback(error)
            }
        }
    }

    /// `Direct` strategy: hand the element its remote locator and ask it to
    /// play; the element streams natively.
    async fn attach_direct(
        &self,
        item: &ItemSnapshot,
        element: &Arc<dyn MediaElement>,
        source: &Url,
    ) -> FetchOutcome {
        match element.attach_remote(source).await {
            Ok(()) => {
                self.request_playback(item, element).await;
                self.hooks.on_success(item);
                self.schedule_cleanup(item);
                FetchOutcome::Direct
            }
            Err(error) => {
                warn!(element = %item.id, %error, "direct attach failed");
                self.hooks.on_fallback(item);
                FetchOutcome::Fallback(error.into())
            }
        }
    }

    /// The buffered path: stream the body, report progress, assemble the
    /// bytes, attach, and request playback.
    async fn stream_and_attach(
        &self,
        item: &ItemSnapshot,
        element: &Arc<dyn MediaElement>,
        source: &Url,
    ) -> Result<()> {
        let response = self.transport.get(source).await?;
        let mut progress = TransferProgress::new(response.total_len);
        let mut body = response.body;

        let mut data = Vec::new();

        while let Some(chunk) = body.next().await {
            let chunk = chunk?;
            progress.advance(chunk.len());
            data.extend_from_slice(&chunk);

            // Percentages only exist when the response declared a total.
            if let Some(percent) = progress.percent() {
                self.hooks.on_progress(item, percent);
            }
        }

        debug!(
            element = %item.id,
            bytes = progress.downloaded,
            "transfer complete, attaching buffered resource"
        );
        element.attach_buffered(data).await?;
        self.request_playback_checked(item, element).await?;
        Ok(())
    }

    /// Playback request where a policy rejection is tolerated but real
    /// failures bubble into the fallback path.
    async fn request_playback_checked(
        &self,
        item: &ItemSnapshot,
        element: &Arc<dyn MediaElement>,
    ) -> Result<()> {
        match element.begin_playback().await {
            Ok(()) => Ok(()),
            Err(rejection) if rejection.is_policy_rejection() => {
                // Playback cannot be forced; the element is ready anyway.
                debug!(element = %item.id, %rejection, "playback rejected by policy");
                Ok(())
            }
            Err(error) => Err(error.into()),
        }
    }

    /// Best-effort playback request for paths where failure changes nothing.
    async fn request_playback(
        &self,
        item: &ItemSnapshot,
        element: &Arc<dyn MediaElement>,
    ) {
        if let Err(error) = element.begin_playback().await {
            debug!(element = %item.id, %error, "playback did not start");
        }
    }

    /// Fire-and-forget removal of transient progress UI after a grace
    /// period; deliberately not synchronized with further scheduling.
    fn schedule_cleanup(&self, item: &ItemSnapshot) {
        let hooks = Arc::clone(&self.hooks);
        let item = item.clone();
        let grace = self.cleanup_grace;
        tokio::spawn(async move {
            tokio::time::sleep(grace).await;
            hooks.on_cleanup(&item);
        });
    }
}
