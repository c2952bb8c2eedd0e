//! Engine/host focused snapshot of the types surface.
//! Prefer importing from this module instead of individual tree nodes when
//! working in preroll-core or host integration layers.

pub use super::geometry::{Margin, Rect};
pub use super::ids::ElementId;
pub use super::item::{
    FORCED_PRIORITY_WEIGHT, IN_VIEWPORT_WEIGHT, ItemSnapshot, LoadItem,
    LoadState, priority_score,
};
pub use super::progress::TransferProgress;
