//! Wall-clock frame delta helper.

use web_time::Instant;

/// Turns wall time into per-frame deltas for hosts without their own frame
/// pump. Call [`FrameClock::tick`] once per frame and feed the result to
/// [`crate::Timeline::tick`].
pub struct FrameClock {
    last: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Seconds elapsed since the previous call (or construction).
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f64();
        self.last = now;
        dt
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
