//! Host-driven visibility tracking.
//!
//! The tracker never observes the host's layout directly; the host feeds it
//! element bounds and viewport rectangles (scroll/resize events) and the
//! tracker reports true enter/leave transitions against the margin-expanded
//! viewport.

use std::collections::HashMap;

use preroll_model::{ElementId, Margin, Rect};

/// One true enter/leave change for a tracked element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibilityTransition {
    pub id: ElementId,
    pub entered: bool,
}

#[derive(Debug, Clone, Copy, Default)]
struct Target {
    bounds: Option<Rect>,
    in_view: bool,
}

/// Tracks registered elements against the visible viewport plus a pre-fetch
/// margin.
///
/// Elements with no reported bounds are off-viewport until the host places
/// them. There is no ordering guarantee between simultaneous transitions;
/// callers handle each independently.
#[derive(Debug)]
pub struct VisibilityTracker {
    margin: Margin,
    min_visible_fraction: f32,
    viewport: Rect,
    targets: HashMap<ElementId, Target>,
}

impl VisibilityTracker {
    pub fn new(margin: Margin, min_visible_fraction: f32) -> Self {
        Self {
            margin,
            min_visible_fraction: min_visible_fraction.clamp(0.0, 1.0),
            viewport: Rect::default(),
            targets: HashMap::new(),
        }
    }

    /// Begin tracking an element. Bounds arrive later via
    /// [`update_bounds`](Self::update_bounds).
    pub fn observe(&mut self, id: ElementId) {
        self.targets.entry(id).or_default();
    }

    /// Stop tracking an element. Invoked exactly once, at dispatch time.
    pub fn unobserve(&mut self, id: ElementId) {
        self.targets.remove(&id);
    }

    pub fn is_observed(&self, id: ElementId) -> bool {
        self.targets.contains_key(&id)
    }

    pub fn observed_count(&self) -> usize {
        self.targets.len()
    }

    /// Place or move one element; reports a transition when its visibility
    /// actually changed.
    pub fn update_bounds(
        &mut self,
        id: ElementId,
        bounds: Rect,
    ) -> Option<VisibilityTransition> {
        let band = self.viewport.expand(self.margin);
        let threshold = self.min_visible_fraction;
        let target = self.targets.get_mut(&id)?;
        target.bounds = Some(bounds);
        let now_visible = bounds.covered_fraction(&band) >= threshold;
        if now_visible != target.in_view {
            target.in_view = now_visible;
            Some(VisibilityTransition {
                id,
                entered: now_visible,
            })
        } else {
            None
        }
    }

    /// Move the viewport (scroll/resize); reports every element whose
    /// visibility flipped.
    pub fn update_viewport(&mut self, viewport: Rect) -> Vec<VisibilityTransition> {
        self.viewport = viewport;
        let band = viewport.expand(self.margin);
        let threshold = self.min_visible_fraction;

        let mut transitions = Vec::new();
        for (id, target) in self.targets.iter_mut() {
            let now_visible = match target.bounds {
                Some(bounds) => bounds.covered_fraction(&band) >= threshold,
                None => false,
            };
            if now_visible != target.in_view {
                target.in_view = now_visible;
                transitions.push(VisibilityTransition {
                    id: *id,
                    entered: now_visible,
                });
            }
        }
        transitions
    }
}
