//! Errors surfaced while measuring items or (re)building the loop.

use thiserror::Error;

/// Caller configuration and measurement errors.
///
/// Out-of-range navigation indices are never errors; they wrap.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoopError {
    /// A loop over zero items has no defined geometry.
    #[error("cannot build a loop over an empty item set")]
    EmptyItems,

    /// An item reported a bounding box with no usable height. Defaulting the
    /// height to zero would corrupt every percentage computed from it, so
    /// this is surfaced instead.
    #[error("item {index} has no measurable height ({height})")]
    UnmeasurableItem { index: usize, height: f64 },

    /// The layout snapshot covers a different number of items than the loop.
    #[error("layout snapshot measures {measured} items, loop holds {expected}")]
    ItemCountMismatch { expected: usize, measured: usize },
}
