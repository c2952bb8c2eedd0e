//! The loader facade: the only public entry point into the scheduler.
//!
//! Replaces the process-wide shared instance of earlier revisions with an
//! explicitly constructed object whose lifetime the host owns; collaborators
//! receive it by injection instead of reaching for a global.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, trace};

use preroll_contracts::{MediaElement, MediaTransport, PresentationHooks};
use preroll_model::{ElementId, ItemSnapshot, LoadItem, Rect};

use crate::config::LoaderConfig;
use crate::fetcher::{FetchOutcome, StreamingFetcher};
use crate::scheduler::DispatchQueue;
use crate::visibility::VisibilityTracker;

/// Counters exposed for observability and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoaderStats {
    /// Items waiting in the queue.
    pub pending: usize,
    /// Logically in-flight fetch-and-play operations.
    pub active: usize,
    /// Elements pinned in their terminal loaded state.
    pub loaded: usize,
}

/// Work handed from the dispatch routine to a spawned fetch task.
type Dispatch = (ItemSnapshot, Arc<dyn MediaElement>);

/// Adaptive media loader: registration, viewport-driven prioritization,
/// capped dispatch, and streamed fetch-and-play execution.
///
/// Cheap to clone; clones share the same scheduler state.
#[derive(Clone)]
pub struct MediaLoader {
    inner: Arc<LoaderInner>,
}

struct LoaderInner {
    hooks: Arc<dyn PresentationHooks>,
    fetcher: StreamingFetcher,
    state: Mutex<CoreState>,
}

/// Everything the dispatch routine mutates, behind one lock.
///
/// The pending queue and the in-flight count are only ever touched while
/// holding this lock, so the dispatch routine is never reentered while
/// already executing, on multi-threaded runtimes included.
struct CoreState {
    tracker: VisibilityTracker,
    queue: DispatchQueue,
    elements: HashMap<ElementId, Arc<dyn MediaElement>>,
}

impl CoreState {
    /// Pop every item the queue allows to start, stop observing each
    /// (exactly once, at dispatch time), and pair it with its element.
    fn drain_dispatchable(&mut self) -> Vec<Dispatch> {
        self.queue
            .take_dispatchable()
            .into_iter()
            .filter_map(|item| {
                self.tracker.unobserve(item.id);
                let element = self.elements.get(&item.id)?.clone();
                let snapshot =
                    item.snapshot(element.deferred_source(), element.poster());
                Some((snapshot, element))
            })
            .collect()
    }
}

impl MediaLoader {
    pub fn new(
        config: LoaderConfig,
        transport: Arc<dyn MediaTransport>,
        hooks: Arc<dyn PresentationHooks>,
    ) -> Self {
        let fetcher = StreamingFetcher::new(
            transport,
            Arc::clone(&hooks),
            config.strategy,
            config.stall_timeout,
            config.cleanup_grace,
        );
        let state = CoreState {
            tracker: VisibilityTracker::new(
                config.prefetch_margin,
                config.min_visible_fraction,
            ),
            queue: DispatchQueue::new(config.effective_cap()),
            elements: HashMap::new(),
        };
        Self {
            inner: Arc::new(LoaderInner {
                hooks,
                fetcher,
                state: Mutex::new(state),
            }),
        }
    }

    /// Register a deferred media target.
    ///
    /// Idempotent: an element that is already queued, in flight, or loaded
    /// is left untouched. Never returns an error to the caller; failures
    /// during the eventual fetch route into the fallback path instead.
    pub async fn register(
        &self,
        element: Arc<dyn MediaElement>,
        forced_priority: bool,
    ) {
        let id = element.id();
        let prepared = {
            let mut state = self.inner.state.lock().await;
            if state.queue.is_tracked(id) {
                trace!(element = %id, "register ignored, element already tracked");
                None
            } else {
                let item = LoadItem::new(id, forced_priority);
                let snapshot = item
                    .snapshot(element.deferred_source(), element.poster());
                state.elements.insert(id, Arc::clone(&element));
                state.tracker.observe(id);
                state.queue.enqueue(item);
                state.queue.rescore();
                Some((snapshot, state.drain_dispatchable()))
            }
        };
        let Some((snapshot, dispatches)) = prepared else {
            return;
        };

        debug!(element = %id, forced_priority, "registered media target");
        self.inner.hooks.on_loading_start(&snapshot);
        self.spawn_all(dispatches);
    }

    /// Register a batch of targets without priority hints, in order.
    pub async fn register_many<I>(&self, elements: I)
    where
        I: IntoIterator<Item = Arc<dyn MediaElement>>,
    {
        for element in elements {
            self.register(element, false).await;
        }
    }

    /// Feed a new viewport rectangle (scroll/resize). Each resulting
    /// enter/leave transition is handled independently: signal update,
    /// rescore, dispatch decision.
    pub async fn update_viewport(&self, viewport: Rect) {
        let dispatches = {
            let mut state = self.inner.state.lock().await;
            let transitions = state.tracker.update_viewport(viewport);
            let mut dispatches = Vec::new();
            for transition in transitions {
                if state.queue.set_visibility(transition.id, transition.entered) {
                    state.queue.rescore();
                    dispatches.extend(state.drain_dispatchable());
                }
            }
            dispatches
        };
        self.spawn_all(dispatches);
    }

    /// Place or move one element in host layout coordinates.
    pub async fn update_bounds(&self, id: ElementId, bounds: Rect) {
        let dispatches = {
            let mut state = self.inner.state.lock().await;
            let mut dispatches = Vec::new();
            if let Some(transition) = state.tracker.update_bounds(id, bounds)
                && state
                    .queue
                    .set_visibility(transition.id, transition.entered)
            {
                state.queue.rescore();
                dispatches = state.drain_dispatchable();
            }
            dispatches
        };
        self.spawn_all(dispatches);
    }

    /// Change the explicit priority hint on a still-pending element, e.g.
    /// when carousel navigation makes a different slide active.
    pub async fn set_forced_priority(&self, id: ElementId, forced: bool) {
        let dispatches = {
            let mut state = self.inner.state.lock().await;
            if state.queue.set_forced_priority(id, forced) {
                state.queue.rescore();
                state.drain_dispatchable()
            } else {
                Vec::new()
            }
        };
        self.spawn_all(dispatches);
    }

    pub async fn stats(&self) -> LoaderStats {
        let state = self.inner.state.lock().await;
        LoaderStats {
            pending: state.queue.pending_len(),
            active: state.queue.active_count(),
            loaded: state.queue.terminal_count(),
        }
    }

    fn spawn_all(&self, dispatches: Vec<Dispatch>) {
        for (snapshot, element) in dispatches {
            spawn_fetch(Arc::clone(&self.inner), snapshot, element);
        }
    }
}

impl fmt::Debug for MediaLoader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("MediaLoader");
        debug.field("fetcher", &self.inner.fetcher);
        match self.inner.state.try_lock() {
            Ok(state) => {
                debug
                    .field("pending", &state.queue.pending_len())
                    .field("active", &state.queue.active_count())
                    .field("loaded", &state.queue.terminal_count());
            }
            Err(_) => {
                debug.field("state", &"<locked>");
            }
        }
        debug.finish()
    }
}

/// Run one dispatched item to its terminal state on a fresh task, then let
/// the completion step admit the next candidate.
fn spawn_fetch(
    inner: Arc<LoaderInner>,
    snapshot: ItemSnapshot,
    element: Arc<dyn MediaElement>,
) {
    tokio::spawn(async move {
        let outcome = inner.fetcher.run(&snapshot, &element).await;
        match &outcome {
            FetchOutcome::Streamed => {
                debug!(element = %snapshot.id, "streamed load complete")
            }
            FetchOutcome::Direct => {
                debug!(element = %snapshot.id, "direct source attached")
            }
            FetchOutcome::Fallback(error) => {
                debug!(element = %snapshot.id, %error, "load completed via fallback")
            }
            FetchOutcome::MissingSource => {
                trace!(element = %snapshot.id, "load completed without a source")
            }
        }
        finish(&inner, snapshot.id).await;
    });
}

/// Guaranteed completion step: free the slot, pin the element loaded, and
/// run the dispatch decision again so the next candidate can proceed.
async fn finish(inner: &Arc<LoaderInner>, id: ElementId) {
    let dispatches = {
        let mut state = inner.state.lock().await;
        state.queue.complete(id);
        state.elements.remove(&id);
        state.queue.rescore();
        state.drain_dispatchable()
    };
    for (snapshot, element) in dispatches {
        spawn_fetch(Arc::clone(inner), snapshot, element);
    }
}
