//! Infinite vertical loop scheduler.
//!
//! Given an ordered set of measured items, builds a perpetually wrapping
//! motion timeline, supports directional index navigation that always
//! travels the shortest circular path, tracks a current index that stays
//! consistent under in-flight motion, and recomputes cleanly when the
//! container is resized.

pub mod builder;
pub mod config;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod navigator;
pub mod offsets;
pub mod vertical_loop;

pub use config::{Center, LoopConfig, Repeat, Snap, REFERENCE_PIXELS_PER_SECOND};
pub use error::LoopError;
pub use geometry::Geometry;
pub use layout::{ContainerBounds, ItemBounds, LayoutSnapshot};
pub use navigator::NavigationState;
pub use vertical_loop::{ChangeObserver, VerticalLoop};

// The motion vocabulary travels with the loop API.
pub use gyre_motion::{Easing, MotionSpec, TweenHandle};

pub mod prelude {
    pub use crate::config::{Center, LoopConfig, Repeat, Snap};
    pub use crate::error::LoopError;
    pub use crate::layout::{ContainerBounds, ItemBounds, LayoutSnapshot};
    pub use crate::vertical_loop::{ChangeObserver, VerticalLoop};
    pub use gyre_motion::{Easing, MotionSpec, TweenHandle};
}
