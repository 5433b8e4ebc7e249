//! Tick-driven animation primitives for Gyre.
//!
//! This crate provides the timeline engine the loop scheduler animates with:
//! easing curves, tween specs, and a seekable [`Timeline`] over numeric
//! channels with a single shared play cursor.

pub mod clock;
pub mod easing;
pub mod timeline;

pub use clock::FrameClock;
pub use easing::Easing;
pub use timeline::{
    wrap_time, MotionSpec, Repeat, Segment, Tick, Timeline, TweenHandle,
};

pub mod prelude {
    pub use crate::clock::FrameClock;
    pub use crate::easing::Easing;
    pub use crate::timeline::{
        wrap_time, MotionSpec, Repeat, Segment, Tick, Timeline, TweenHandle,
    };
}
