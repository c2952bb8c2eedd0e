//! Pending-queue bookkeeping and dispatch decisions.
//!
//! [`DispatchQueue`] is a synchronous state machine; the facade serializes
//! every mutation behind one lock, so the dispatch routine is never reentered
//! while already executing. Nothing here performs IO.

use std::cmp::Reverse;
use std::collections::HashSet;

use preroll_model::{ElementId, LoadItem, LoadState};

#[derive(Debug, Clone)]
struct QueuedItem {
    item: LoadItem,
    /// Registration order, the tie-breaker for equal scores. Kept outside
    /// the model record so flapping visibility can never scramble ties.
    seq: u64,
}

/// Priority queue of pending items plus the in-flight accounting that gates
/// dispatch.
///
/// Queue order is descending score, ties broken by registration order. An
/// element is tracked for the queue's whole lifetime: pending, in flight, or
/// terminal; re-registration of a tracked element is a no-op upstream.
#[derive(Debug)]
pub struct DispatchQueue {
    pending: Vec<QueuedItem>,
    active: HashSet<ElementId>,
    terminal: HashSet<ElementId>,
    cap: usize,
    next_seq: u64,
}

impl DispatchQueue {
    pub fn new(concurrency_cap: usize) -> Self {
        Self {
            pending: Vec::new(),
            active: HashSet::new(),
            terminal: HashSet::new(),
            cap: concurrency_cap.max(1),
            next_seq: 0,
        }
    }

    /// Whether the element is pending, in flight, or already terminal.
    pub fn is_tracked(&self, id: ElementId) -> bool {
        self.terminal.contains(&id)
            || self.active.contains(&id)
            || self.pending.iter().any(|queued| queued.item.id == id)
    }

    /// Add a new item to the pending set. Returns `false` when the element
    /// is already tracked (dedupe invariant).
    pub fn enqueue(&mut self, item: LoadItem) -> bool {
        if self.is_tracked(item.id) {
            return false;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending.push(QueuedItem { item, seq });
        true
    }

    /// Update the visibility signal on a pending item. Returns `true` when a
    /// pending item actually changed; in-flight and terminal elements are
    /// past the point where visibility matters.
    pub fn set_visibility(&mut self, id: ElementId, in_viewport: bool) -> bool {
        match self
            .pending
            .iter_mut()
            .find(|queued| queued.item.id == id)
        {
            Some(queued) if queued.item.in_viewport != in_viewport => {
                queued.item.in_viewport = in_viewport;
                true
            }
            _ => false,
        }
    }

    /// Update the forced-priority signal on a pending item.
    pub fn set_forced_priority(&mut self, id: ElementId, forced: bool) -> bool {
        match self
            .pending
            .iter_mut()
            .find(|queued| queued.item.id == id)
        {
            Some(queued) if queued.item.forced_priority != forced => {
                queued.item.forced_priority = forced;
                true
            }
            _ => false,
        }
    }

    /// Recompute every pending score and re-sort the queue.
    pub fn rescore(&mut self) {
        for queued in &mut self.pending {
            queued.item.rescore();
        }
        self.pending
            .sort_by_key(|queued| (Reverse(queued.item.score), queued.seq));
    }

    /// Pop every item that may start right now, marking each `Loading`.
    ///
    /// A zero-score head (off-screen, not forced) is only dispatched when
    /// nothing else is in flight: idle-time prefetch must never starve a
    /// foreground fetch.
    pub fn take_dispatchable(&mut self) -> Vec<LoadItem> {
        let mut dispatched = Vec::new();
        while self.active.len() < self.cap {
            let Some(head) = self.pending.first() else {
                break;
            };
            if head.item.score == 0 && !self.active.is_empty() {
                break;
            }
            let mut queued = self.pending.remove(0);
            queued.item.state = LoadState::Loading;
            self.active.insert(queued.item.id);
            dispatched.push(queued.item);
        }
        dispatched
    }

    /// Completion step for a dispatched element: frees its slot and pins it
    /// terminal so it is never retried.
    pub fn complete(&mut self, id: ElementId) {
        if self.active.remove(&id) {
            self.terminal.insert(id);
        }
    }

    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    pub fn terminal_count(&self) -> usize {
        self.terminal.len()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    #[cfg(test)]
    fn pending_ids(&self) -> Vec<ElementId> {
        self.pending.iter().map(|queued| queued.item.id).collect()
    }
}
