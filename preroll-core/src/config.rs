use std::time::Duration;

use serde::{Deserialize, Serialize};

use preroll_model::Margin;

/// How a dispatched item's bytes reach the playable element.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Default, Serialize, Deserialize)]
pub enum LoadStrategy {
    /// Stream the whole resource, assemble it locally, then assign it.
    /// Trades startup latency for uninterrupted playback.
    #[default]
    Buffered,
    /// Assign the remote locator immediately and let the element stream
    /// natively. No transfer is issued by the loader.
    Direct,
}

/// Global knobs that tune loader behaviour.
///
/// All fields carry defaults so hosts can progressively adopt new knobs
/// without supplying a full configuration payload.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Maximum logically in-flight fetch-and-play operations. Default 1:
    /// strict serialization so transfers never compete for bandwidth and
    /// stutter playback. Some deployments raise this to 2 for limited
    /// parallelism.
    pub concurrency_cap: usize,
    /// Pre-entry band around the viewport so items are detected before they
    /// are fully visible.
    pub prefetch_margin: Margin,
    /// Minimum fraction of an element that must intersect the expanded
    /// viewport to count as visible.
    pub min_visible_fraction: f32,
    /// Buffered-blob assembly vs direct locator assignment.
    pub strategy: LoadStrategy,
    /// Optional deadline on a whole transfer; firing it routes into the
    /// fallback path so the completion step always runs.
    pub stall_timeout: Option<Duration>,
    /// Grace period before the fire-and-forget cleanup hook runs after a
    /// successful load.
    pub cleanup_grace: Duration,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            concurrency_cap: 1,
            prefetch_margin: Margin::vertical(200.0),
            min_visible_fraction: 0.1,
            strategy: LoadStrategy::default(),
            stall_timeout: None,
            cleanup_grace: Duration::from_secs(1),
        }
    }
}

impl LoaderConfig {
    /// Cap clamped to at least one slot; a zero cap would deadlock the queue.
    pub fn effective_cap(&self) -> usize {
        self.concurrency_cap.max(1)
    }
}
