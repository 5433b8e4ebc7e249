//! The loop controller: owns geometry, timeline, and navigation state.

use gyre_motion::{MotionSpec, Timeline, TweenHandle};

use crate::builder::populate_timeline;
use crate::config::{Center, LoopConfig};
use crate::error::LoopError;
use crate::geometry::{Geometry, ItemArray};
use crate::layout::LayoutSnapshot;
use crate::navigator::{self, NavigationState};
use crate::offsets::apply_center_offsets;

/// Observer invoked when continuous playback carries a new item into the
/// home slot. Fires at most once per distinct index transition.
pub trait ChangeObserver<T> {
    fn on_change(&mut self, item: &T, index: usize);
}

impl<T, F> ChangeObserver<T> for F
where
    F: FnMut(&T, usize),
{
    fn on_change(&mut self, item: &T, index: usize) {
        self(item, index)
    }
}

/// A perpetually wrapping vertical strip of items with directional index
/// navigation.
///
/// Construction measures the items, builds one cycle's worth of motion
/// segments, and (optionally) starts free playback. The host drives the loop
/// from its frame clock via [`VerticalLoop::tick`] and reads back per-item
/// positions with [`VerticalLoop::y_percent`].
///
/// All mutable state lives here rather than in shared captures: the single
/// play cursor is written only by navigation tweens, direct seeks, and the
/// resize restore step, and read by the index queries.
pub struct VerticalLoop<T> {
    items: Vec<T>,
    config: LoopConfig,
    geometry: Geometry,
    timeline: Timeline,
    /// Raw home-slot times as built; retained so a light refresh can redo
    /// the centering pass without rebuilding segments.
    labels: ItemArray,
    /// Centering-adjusted label times, one per item, within `[0, duration)`.
    times: ItemArray,
    time_offset: f64,
    nav: NavigationState,
    observer: Option<Box<dyn ChangeObserver<T>>>,
    container_extent: f64,
}

impl<T> VerticalLoop<T> {
    /// Build a loop over `items` measured by `snapshot`.
    ///
    /// Fails on an empty item set, an unmeasurable item, or a snapshot that
    /// doesn't cover every item; all are caller configuration errors.
    pub fn new(
        items: Vec<T>,
        snapshot: &LayoutSnapshot,
        config: LoopConfig,
    ) -> Result<Self, LoopError> {
        if items.len() != snapshot.items.len() {
            return Err(LoopError::ItemCountMismatch {
                expected: items.len(),
                measured: snapshot.items.len(),
            });
        }

        let geometry = Geometry::sample(snapshot, config.snap, None, config.trailing_padding())?;

        let mut timeline = Timeline::new();
        timeline.set_repeat(config.repeat);
        timeline.set_paused(config.paused);
        timeline.set_reversed(config.reversed);
        let labels = populate_timeline(
            &geometry,
            config.pixels_per_second(),
            config.snap,
            &mut timeline,
        );

        let mut looper = Self {
            items,
            config,
            geometry,
            timeline,
            labels,
            times: ItemArray::new(),
            time_offset: 0.0,
            nav: NavigationState::new(),
            observer: None,
            container_extent: snapshot.container.height,
        };
        looper.apply_offsets();

        let initial = looper.closest_index(true);
        looper.nav.last_notified = initial;
        Ok(looper)
    }

    /// Attach the change observer, replacing any previous one. Fires once
    /// immediately with the current item, then once per index transition
    /// driven by playback.
    pub fn set_observer(&mut self, observer: impl ChangeObserver<T> + 'static) {
        let mut observer = Box::new(observer);
        let index = self.nav.cur_index;
        self.nav.last_notified = index;
        observer.on_change(&self.items[index], index);
        self.observer = Some(observer);
    }

    /// Advance the loop by `dt` seconds of frame time and run the change
    /// notifier. Free playback (as opposed to a navigation tween) marks the
    /// committed index dirty.
    pub fn tick(&mut self, dt: f64) {
        let tick = self.timeline.tick(dt);
        if !tick.moved {
            return;
        }
        if !tick.tweened {
            self.nav.index_is_dirty = true;
        }
        let index = navigator::closest_index(
            &self.times,
            self.timeline.time(),
            self.timeline.duration(),
        );
        if index != self.nav.last_notified {
            self.nav.last_notified = index;
            if let Some(observer) = self.observer.as_mut() {
                observer.on_change(&self.items[index], index);
            }
        }
    }

    /// The current index. Reflects the destination of an in-progress
    /// navigation; recomputes from the cursor when free playback has moved
    /// it since the last commit. Never fails.
    pub fn current(&mut self) -> usize {
        if self.nav.index_is_dirty {
            self.closest_index(true)
        } else {
            self.nav.cur_index
        }
    }

    /// Animate to the next item.
    pub fn next(&mut self, spec: MotionSpec) -> TweenHandle {
        self.to_index(self.nav.cur_index as isize + 1, spec)
    }

    /// Animate to the previous item.
    pub fn previous(&mut self, spec: MotionSpec) -> TweenHandle {
        self.to_index(self.nav.cur_index as isize - 1, spec)
    }

    /// Animate to `index`, always traveling the shortest circular path.
    ///
    /// Out-of-range indices wrap. The committed index updates immediately
    /// (the in-flight motion's destination is the authoritative answer);
    /// scheduling a new motion overwrites any previous one. A zero-duration
    /// spec seeks instantly.
    pub fn to_index(&mut self, index: isize, spec: MotionSpec) -> TweenHandle {
        let len = self.items.len();
        let cur = self.nav.cur_index as isize;
        let index = navigator::shortest_target(index, self.nav.cur_index, len);
        let new_index = navigator::wrap_index(index, len);

        let duration = self.timeline.duration();
        let mut time = self.times[new_index];
        // Crossing the seam: keep the tween moving in the chosen direction
        // instead of snapping across it.
        if (time > self.timeline.time()) != (index > cur) && index != cur {
            time += duration * if index > cur { 1.0 } else { -1.0 };
        }

        self.nav.commit(new_index);
        self.timeline.tween_to(time, spec)
    }

    /// Index whose home time is circularly closest to the play cursor;
    /// `commit` stores it and clears the dirty flag. Does not notify.
    pub fn closest_index(&mut self, commit: bool) -> usize {
        let index = navigator::closest_index(
            &self.times,
            self.timeline.time(),
            self.timeline.duration(),
        );
        if commit {
            self.nav.commit(index);
        }
        index
    }

    /// Re-measure after a resize/reflow.
    ///
    /// A light refresh (`deep == false`) re-samples geometry and redoes only
    /// the centering pass. A deep refresh also rebuilds the motion segments,
    /// then restores playback: a paused loop parks on the committed index's
    /// home time, a playing loop resumes at its captured fractional
    /// progress, and an interrupted navigation (whose target time is stale
    /// after the rebuild) is killed and parked on the committed index so the
    /// index never desynchronizes from the visual position.
    pub fn refresh(&mut self, snapshot: &LayoutSnapshot, deep: bool) -> Result<(), LoopError> {
        if snapshot.items.len() != self.items.len() {
            return Err(LoopError::ItemCountMismatch {
                expected: self.items.len(),
                measured: snapshot.items.len(),
            });
        }

        // Snapshot playback state before touching any geometry; this keeps
        // the coordinator safe to re-enter from a frame callback.
        let progress = self.timeline.progress();
        let in_flight = self.timeline.has_active_tween();

        self.geometry = Geometry::sample(
            snapshot,
            self.config.snap,
            Some(&self.geometry),
            self.config.trailing_padding(),
        )?;
        self.container_extent = snapshot.container.height;

        if deep {
            self.labels = populate_timeline(
                &self.geometry,
                self.config.pixels_per_second(),
                self.config.snap,
                &mut self.timeline,
            );
        }
        self.apply_offsets();

        if deep {
            if in_flight {
                self.timeline.kill_active();
                self.timeline.seek(self.times[self.nav.cur_index]);
            } else if self.timeline.is_paused() {
                self.timeline.seek(self.times[self.nav.cur_index]);
            } else {
                self.timeline.set_progress(progress);
            }
            log::debug!(
                "deep refresh: duration {:.3}s, cursor restored to {:.3}s",
                self.timeline.duration(),
                self.timeline.time()
            );
        }
        Ok(())
    }

    /// Kill a previously returned motion. Stale handles are a no-op.
    pub fn kill(&mut self, handle: TweenHandle) {
        self.timeline.kill(handle);
    }

    /// Whether the given motion is still in flight.
    pub fn is_motion_active(&self, handle: TweenHandle) -> bool {
        self.timeline.is_active(handle)
    }

    /// Current offset of item `index` as a percentage of its own height.
    pub fn y_percent(&self, index: usize) -> Option<f64> {
        self.timeline.value(index)
    }

    /// Home-slot times, one per item, centering-adjusted.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Centering correction applied to the label times.
    pub fn time_offset(&self) -> f64 {
        self.time_offset
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Read-only view of the underlying timeline.
    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.timeline.set_paused(paused);
    }

    pub fn is_paused(&self) -> bool {
        self.timeline.is_paused()
    }

    pub fn set_reversed(&mut self, reversed: bool) {
        self.timeline.set_reversed(reversed);
    }

    pub fn is_reversed(&self) -> bool {
        self.timeline.is_reversed()
    }

    /// Tear down this subsystem's half of the environment wiring: kill any
    /// in-flight motion and drop the observer. The host removes its own
    /// resize listener.
    pub fn dispose(&mut self) {
        self.timeline.kill_active();
        self.observer = None;
    }

    fn apply_offsets(&mut self) {
        let extent = match self.config.center {
            Center::Start => None,
            Center::Container => Some(self.container_extent),
            Center::Within(extent) => Some(extent),
        };
        let (times, offset) = apply_center_offsets(
            &self.labels,
            &self.geometry,
            extent,
            self.timeline.duration(),
        );
        self.times = times;
        self.time_offset = offset;
    }
}

#[cfg(test)]
#[path = "tests/vertical_loop_tests.rs"]
mod tests;
