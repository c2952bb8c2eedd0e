//! Hook points into the host's presentation layer.

use preroll_model::ItemSnapshot;

/// Visual side effects delegated to the host.
///
/// The loader invokes these at well-defined lifecycle points and never
/// constructs or styles UI itself. Implementations should return quickly;
/// hooks are called outside the scheduler lock but on the loader's task.
pub trait PresentationHooks: Send + Sync {
    /// A newly registered element entered the queue: show its loading state
    /// (spinner, poster overlay).
    fn on_loading_start(&self, item: &ItemSnapshot);

    /// Transfer progress for an item whose response declared a total size.
    /// Values are monotonically non-decreasing within one transfer.
    fn on_progress(&self, item: &ItemSnapshot, percent: u8);

    /// The streamed resource was assigned and the element is ready: clear
    /// the loading state, set the playing state.
    fn on_success(&self, item: &ItemSnapshot);

    /// The buffered path failed and the remote locator was assigned
    /// directly. Recoverable: the element still plays.
    fn on_fallback(&self, item: &ItemSnapshot);

    /// Grace-period cleanup after success: remove transient progress UI.
    /// Fire-and-forget, not synchronized with further scheduling.
    fn on_cleanup(&self, item: &ItemSnapshot);
}

/// Hook implementation that does nothing; useful for headless hosts and
/// tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHooks;

impl PresentationHooks for NoopHooks {
    fn on_loading_start(&self, _item: &ItemSnapshot) {}
    fn on_progress(&self, _item: &ItemSnapshot, _percent: u8) {}
    fn on_success(&self, _item: &ItemSnapshot) {}
    fn on_fallback(&self, _item: &ItemSnapshot) {}
    fn on_cleanup(&self, _item: &ItemSnapshot) {}
}
