use url::Url;

use crate::ids::ElementId;

/// Score contribution of an explicit priority hint (e.g. the active slide).
pub const FORCED_PRIORITY_WEIGHT: u32 = 100;

/// Score contribution of viewport visibility.
pub const IN_VIEWPORT_WEIGHT: u32 = 50;

/// Deterministic priority score from the two boolean signals.
///
/// No decay, no history: the score is a pure function, so rescoring an
/// unchanged item is always a no-op.
pub const fn priority_score(forced_priority: bool, in_viewport: bool) -> u32 {
    let mut score = 0;
    if forced_priority {
        score += FORCED_PRIORITY_WEIGHT;
    }
    if in_viewport {
        score += IN_VIEWPORT_WEIGHT;
    }
    score
}

/// Scheduler-visible lifecycle states for a registered element.
///
/// `Loaded` is absorbing: success, missing source, and fallback all converge
/// there and nothing transitions out of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LoadState {
    Pending,
    Loading,
    Loaded,
}

impl LoadState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, LoadState::Loaded)
    }
}

/// One registered media target and the signals that drive its scheduling.
///
/// All scheduling-relevant state lives here; nothing is ever derived from the
/// presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadItem {
    pub id: ElementId,
    pub in_viewport: bool,
    pub forced_priority: bool,
    pub score: u32,
    pub state: LoadState,
}

impl LoadItem {
    pub fn new(id: ElementId, forced_priority: bool) -> Self {
        Self {
            id,
            in_viewport: false,
            forced_priority,
            score: priority_score(forced_priority, false),
            state: LoadState::Pending,
        }
    }

    /// Recompute and store the score from the current signals.
    pub fn rescore(&mut self) -> u32 {
        self.score = priority_score(self.forced_priority, self.in_viewport);
        self.score
    }

    /// Immutable copy handed to presentation hooks and the fetch stage.
    pub fn snapshot(
        &self,
        source: Option<Url>,
        poster: Option<Url>,
    ) -> ItemSnapshot {
        ItemSnapshot {
            id: self.id,
            in_viewport: self.in_viewport,
            forced_priority: self.forced_priority,
            score: self.score,
            state: self.state,
            source,
            poster,
        }
    }
}

/// Read-only view of a [`LoadItem`] at a point in time, enriched with the
/// element's locators so hooks never have to reach back into the scheduler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSnapshot {
    pub id: ElementId,
    pub in_viewport: bool,
    pub forced_priority: bool,
    pub score: u32,
    pub state: LoadState,
    pub source: Option<Url>,
    pub poster: Option<Url>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_is_weighted_sum_of_signals() {
        assert_eq!(priority_score(false, false), 0);
        assert_eq!(priority_score(false, true), 50);
        assert_eq!(priority_score(true, false), 100);
        assert_eq!(priority_score(true, true), 150);
    }

    #[test]
    fn forced_always_outranks_visibility_alone() {
        assert!(priority_score(true, false) > priority_score(false, true));
    }

    #[test]
    fn new_item_starts_pending_off_viewport() {
        let item = LoadItem::new(ElementId::new(), true);
        assert_eq!(item.state, LoadState::Pending);
        assert!(!item.in_viewport);
        assert_eq!(item.score, 100);
    }

    #[test]
    fn rescore_tracks_signal_changes() {
        let mut item = LoadItem::new(ElementId::new(), false);
        assert_eq!(item.score, 0);
        item.in_viewport = true;
        assert_eq!(item.rescore(), 50);
        item.forced_priority = true;
        assert_eq!(item.rescore(), 150);
    }

    #[test]
    fn loaded_is_terminal() {
        assert!(LoadState::Loaded.is_terminal());
        assert!(!LoadState::Pending.is_terminal());
        assert!(!LoadState::Loading.is_terminal());
    }
}
