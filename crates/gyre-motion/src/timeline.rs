//! Seekable, tick-driven timeline over numeric channels.
//!
//! A [`Timeline`] holds linear interpolation segments keyed by channel and a
//! single play cursor. The cursor is advanced from an external frame clock
//! via [`Timeline::tick`]; navigation-style motions scrub the cursor itself
//! through [`Timeline::tween_to`]. Only one cursor tween can be in flight at
//! a time; scheduling a new one overwrites the old.
//!
//! Every read and write of the cursor is folded into `[0, duration)` by
//! [`wrap_time`], so continuous forward or reverse play never accumulates an
//! out-of-range time.

use crate::easing::Easing;

/// Fold a time value into `[0, duration)` with Euclidean modulo.
///
/// Negative times wrap backward (`wrap_time(-0.25, 1.0) == 0.75`). A
/// non-positive duration collapses to 0: an empty timeline has a single
/// valid cursor position.
#[inline]
pub fn wrap_time(t: f64, duration: f64) -> f64 {
    if duration <= 0.0 {
        return 0.0;
    }
    let wrapped = t.rem_euclid(duration);
    // rem_euclid can return `duration` itself when t is a tiny negative value
    if wrapped >= duration {
        0.0
    } else {
        wrapped
    }
}

/// How many full cycles the timeline plays before pausing itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repeat {
    /// Loop forever.
    Infinite,
    /// Stop after this many full cycles.
    Finite(u32),
}

impl Default for Repeat {
    fn default() -> Self {
        Repeat::Infinite
    }
}

/// Duration and easing for a cursor tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSpec {
    /// Duration in seconds.
    pub duration: f64,
    /// Easing function to apply.
    pub easing: Easing,
}

impl MotionSpec {
    /// Create a tween spec with duration and easing.
    pub fn tween(duration: f64, easing: Easing) -> Self {
        Self { duration, easing }
    }

    /// A zero-duration spec: the cursor jumps instead of animating.
    pub fn instant() -> Self {
        Self::tween(0.0, Easing::Linear)
    }
}

impl Default for MotionSpec {
    fn default() -> Self {
        Self::tween(0.3, Easing::FastOutSlowIn)
    }
}

/// Linear interpolation of one channel over `[start, start + duration)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    /// Channel this segment animates.
    pub channel: usize,
    /// Value at `start`.
    pub from: f64,
    /// Value at `start + duration`.
    pub to: f64,
    /// Placement on the timeline, seconds.
    pub start: f64,
    /// Length of the segment, seconds.
    pub duration: f64,
}

impl Segment {
    #[inline]
    fn end(&self) -> f64 {
        self.start + self.duration
    }

    #[inline]
    fn contains(&self, t: f64) -> bool {
        t >= self.start && t < self.end()
    }

    /// Interpolated value at `t`, clamped to the segment's span.
    fn value_at(&self, t: f64) -> f64 {
        if self.duration <= 0.0 {
            return self.to;
        }
        let fraction = ((t - self.start) / self.duration).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * fraction
    }
}

/// Identifies one scheduled cursor tween.
///
/// Handles are never reused; a handle for a completed or overwritten tween
/// is simply stale, and killing it is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TweenHandle(u64);

/// What happened during one [`Timeline::tick`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    /// The cursor changed position this tick.
    pub moved: bool,
    /// The move came from an in-flight cursor tween rather than free play.
    pub tweened: bool,
    /// A cursor tween ran to completion this tick.
    pub completed: Option<TweenHandle>,
}

struct CursorTween {
    id: u64,
    from: f64,
    to: f64,
    elapsed: f64,
    spec: MotionSpec,
}

/// Seekable timeline with a shared play cursor.
pub struct Timeline {
    segments: Vec<Segment>,
    duration: f64,
    time: f64,
    paused: bool,
    reversed: bool,
    repeat: Repeat,
    cycles_done: u32,
    tween: Option<CursorTween>,
    next_tween_id: u64,
}

impl Timeline {
    /// Create an empty timeline: no segments, cursor at 0, playing forward.
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
            duration: 0.0,
            time: 0.0,
            paused: false,
            reversed: false,
            repeat: Repeat::Infinite,
            cycles_done: 0,
            tween: None,
            next_tween_id: 0,
        }
    }

    /// Schedule a segment. The timeline's duration grows to cover it.
    pub fn add(&mut self, segment: Segment) {
        self.duration = self.duration.max(segment.end());
        self.segments.push(segment);
    }

    /// Remove all segments and reset the duration. The cursor collapses to 0
    /// until new segments are added; callers that rebuild restore progress
    /// afterwards.
    pub fn clear(&mut self) {
        self.segments.clear();
        self.duration = 0.0;
        self.time = 0.0;
        self.cycles_done = 0;
    }

    /// Total length of one cycle, seconds.
    #[inline]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Current cursor position, always within `[0, duration)`.
    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Jump the cursor to `t` (folded into range). Does not disturb an
    /// in-flight tween; use [`Timeline::kill_active`] first if that matters.
    pub fn seek(&mut self, t: f64) {
        self.time = wrap_time(t, self.duration);
    }

    /// Fractional position of the cursor within one cycle.
    pub fn progress(&self) -> f64 {
        if self.duration > 0.0 {
            self.time / self.duration
        } else {
            0.0
        }
    }

    /// Seek by fraction of a cycle.
    pub fn set_progress(&mut self, progress: f64) {
        self.seek(progress * self.duration);
    }

    /// Pause or resume free playback. An in-flight cursor tween keeps
    /// scrubbing regardless; it owns the cursor until it completes.
    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Set the free-play direction.
    pub fn set_reversed(&mut self, reversed: bool) {
        self.reversed = reversed;
    }

    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Configure how many cycles free play runs before pausing itself.
    pub fn set_repeat(&mut self, repeat: Repeat) {
        self.repeat = repeat;
        self.cycles_done = 0;
    }

    /// The channel's interpolated value at the current cursor position.
    pub fn value(&self, channel: usize) -> Option<f64> {
        self.value_at(channel, self.time)
    }

    /// The channel's interpolated value at time `t` (folded into range).
    ///
    /// A channel not covered at the folded time reports the value at the
    /// nearest segment boundary, so a fully tiled channel never reads as
    /// undefined even at the seam.
    pub fn value_at(&self, channel: usize, t: f64) -> Option<f64> {
        let t = wrap_time(t, self.duration);
        let mut nearest: Option<(f64, f64)> = None; // (distance, value)
        for segment in self.segments.iter().filter(|s| s.channel == channel) {
            if segment.contains(t) {
                return Some(segment.value_at(t));
            }
            let clamped = t.clamp(segment.start, segment.end());
            let distance = (t - clamped).abs();
            if nearest.map_or(true, |(best, _)| distance < best) {
                nearest = Some((distance, segment.value_at(clamped)));
            }
        }
        nearest.map(|(_, value)| value)
    }

    /// Scrub the cursor to `target_time` over `spec.duration` seconds.
    ///
    /// `target_time` may lie outside `[0, duration]`; intermediate and final
    /// writes fold through [`wrap_time`], so motion across the seam stays
    /// continuous. Any previously scheduled cursor tween is overwritten. A
    /// zero-duration spec seeks immediately and returns an already-stale
    /// handle.
    pub fn tween_to(&mut self, target_time: f64, spec: MotionSpec) -> TweenHandle {
        self.next_tween_id += 1;
        let id = self.next_tween_id;
        if self.tween.is_some() {
            log::debug!("overwriting in-flight cursor tween with motion {id}");
        }
        if spec.duration <= 0.0 {
            self.tween = None;
            self.seek(target_time);
            return TweenHandle(id);
        }
        self.tween = Some(CursorTween {
            id,
            from: self.time,
            to: target_time,
            elapsed: 0.0,
            spec,
        });
        TweenHandle(id)
    }

    /// Whether the given handle's tween is still in flight.
    pub fn is_active(&self, handle: TweenHandle) -> bool {
        self.tween.as_ref().map(|t| t.id) == Some(handle.0)
    }

    /// Whether any cursor tween is in flight.
    pub fn has_active_tween(&self) -> bool {
        self.tween.is_some()
    }

    /// Kill the given tween if it is still the active one. Stale handles and
    /// an idle cursor are no-ops. The cursor stays wherever it last wrote.
    pub fn kill(&mut self, handle: TweenHandle) {
        if self.is_active(handle) {
            self.tween = None;
        }
    }

    /// Kill whatever cursor tween is in flight, if any.
    pub fn kill_active(&mut self) {
        self.tween = None;
    }

    /// Advance the timeline by `dt` seconds of frame time.
    ///
    /// An in-flight cursor tween drives the cursor (even while paused);
    /// otherwise free play moves it by `dt` in the configured direction,
    /// honoring the repeat budget.
    pub fn tick(&mut self, dt: f64) -> Tick {
        let before = self.time;
        let mut completed = None;
        let mut tweened = false;

        if let Some(tween) = self.tween.as_mut() {
            tweened = true;
            tween.elapsed += dt.max(0.0);
            let fraction = (tween.elapsed / tween.spec.duration).min(1.0);
            let eased = tween.spec.easing.transform(fraction);
            let raw = tween.from + (tween.to - tween.from) * eased;
            self.time = wrap_time(raw, self.duration);
            if fraction >= 1.0 {
                completed = Some(TweenHandle(tween.id));
                self.tween = None;
            }
        } else if !self.paused && dt != 0.0 && self.duration > 0.0 {
            let delta = if self.reversed { -dt } else { dt };
            let raw = self.time + delta;
            if raw >= self.duration || raw < 0.0 {
                self.cycles_done = self.cycles_done.saturating_add(1);
                if let Repeat::Finite(limit) = self.repeat {
                    if self.cycles_done >= limit {
                        // Budget exhausted: park at the seam and stop.
                        self.time = 0.0;
                        self.paused = true;
                        return Tick {
                            moved: true,
                            tweened: false,
                            completed: None,
                        };
                    }
                }
            }
            self.time = wrap_time(raw, self.duration);
        }

        Tick {
            moved: self.time != before,
            tweened,
            completed,
        }
    }
}

impl Default for Timeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "tests/timeline_tests.rs"]
mod tests;
