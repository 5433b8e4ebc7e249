use super::*;
use crate::config::{Center, LoopConfig};
use crate::error::LoopError;
use crate::layout::LayoutSnapshot;
use gyre_motion::Easing;

use std::cell::RefCell;
use std::rc::Rc;

const FRAME: f64 = 1.0 / 60.0;

/// Uniform loop: `count` items, 50px tall, no gaps, default speed. One item
/// of travel per half second, cycle duration `count * 0.5`.
fn stacked_loop(count: usize, paused: bool) -> VerticalLoop<usize> {
    let snapshot = LayoutSnapshot::stacked(count, 50.0, 0.0, 300.0);
    VerticalLoop::new(
        (0..count).collect(),
        &snapshot,
        LoopConfig::new().paused(paused),
    )
    .expect("valid loop")
}

#[test]
fn construction_fails_on_empty_items() {
    let snapshot = LayoutSnapshot::stacked(0, 50.0, 0.0, 300.0);
    let result = VerticalLoop::<usize>::new(Vec::new(), &snapshot, LoopConfig::new());
    assert_eq!(result.err(), Some(LoopError::EmptyItems));
}

#[test]
fn snapshot_item_count_must_match() {
    let snapshot = LayoutSnapshot::stacked(3, 50.0, 0.0, 300.0);
    let result = VerticalLoop::new(vec!["a", "b"], &snapshot, LoopConfig::new());
    assert_eq!(
        result.err(),
        Some(LoopError::ItemCountMismatch {
            expected: 2,
            measured: 3
        })
    );
}

#[test]
fn to_index_commits_for_all_lengths() {
    for len in [1usize, 2, 3, 5, 6, 9] {
        let mut looper = stacked_loop(len, true);
        for i in 0..len {
            looper.to_index(i as isize, MotionSpec::instant());
            assert_eq!(looper.closest_index(true), i, "len={len} i={i}");
        }
    }
}

#[test]
fn out_of_range_indices_wrap() {
    let mut looper = stacked_loop(4, true);
    looper.to_index(9, MotionSpec::instant());
    assert_eq!(looper.current(), 1);
    looper.to_index(-5, MotionSpec::instant());
    assert_eq!(looper.current(), 3);
}

#[test]
fn shortest_direction_travels_the_near_side() {
    // From 0 in a loop of 6, index 4 is reached backward via -2: one second
    // of travel (two items at 100px/s), not two.
    let mut looper = stacked_loop(6, true);
    let duration = looper.timeline().duration();
    let handle = looper.to_index(4, MotionSpec::tween(1.0, Easing::Linear));
    assert_eq!(looper.current(), 4, "destination commits immediately");

    looper.tick(0.25);
    assert!(
        looper.timeline().time() > duration / 2.0,
        "cursor should fold backward through the seam, got {}",
        looper.timeline().time()
    );

    while looper.is_motion_active(handle) {
        looper.tick(FRAME);
    }
    assert!((looper.timeline().time() - looper.times()[4]).abs() < 1e-9);
    assert_eq!(looper.closest_index(true), 4);
}

#[test]
fn next_then_previous_round_trips() {
    let mut looper = stacked_loop(4, true);
    let handle = looper.next(MotionSpec::tween(0.3, Easing::EaseInOut));
    while looper.is_motion_active(handle) {
        looper.tick(FRAME);
    }
    assert_eq!(looper.current(), 1);

    let handle = looper.previous(MotionSpec::tween(0.3, Easing::EaseInOut));
    while looper.is_motion_active(handle) {
        looper.tick(FRAME);
    }
    assert_eq!(looper.current(), 0);
    assert!((looper.timeline().time() - looper.times()[0]).abs() < 1e-9);
}

#[test]
fn previous_from_zero_wraps_backward() {
    let mut looper = stacked_loop(4, true);
    let handle = looper.previous(MotionSpec::tween(0.4, Easing::Linear));
    assert_eq!(looper.current(), 3);
    while looper.is_motion_active(handle) {
        looper.tick(FRAME);
    }
    assert!((looper.timeline().time() - looper.times()[3]).abs() < 1e-9);
    assert_eq!(looper.closest_index(true), 3);
}

#[test]
fn zero_duration_navigation_is_instant() {
    let mut looper = stacked_loop(5, true);
    let handle = looper.to_index(3, MotionSpec::instant());
    assert!(!looper.is_motion_active(handle));
    assert!((looper.timeline().time() - looper.times()[3]).abs() < 1e-9);
    assert_eq!(looper.current(), 3);
}

#[test]
fn killing_a_finished_motion_is_a_noop() {
    let mut looper = stacked_loop(3, true);
    let handle = looper.next(MotionSpec::tween(0.2, Easing::Linear));
    while looper.is_motion_active(handle) {
        looper.tick(FRAME);
    }
    looper.kill(handle);
    assert_eq!(looper.current(), 1);
}

#[test]
fn observer_fires_once_per_transition() {
    let mut looper = stacked_loop(4, false);
    let events: Rc<RefCell<Vec<usize>>> = Rc::default();
    let sink = Rc::clone(&events);
    looper.set_observer(move |item: &usize, index: usize| {
        assert_eq!(*item, index);
        sink.borrow_mut().push(index);
    });

    // Duration 2.0s, home times every 0.5s: one full cycle in 0.1s steps.
    for _ in 0..20 {
        looper.tick(0.1);
    }

    let events = events.borrow();
    assert_eq!(events.as_slice(), &[0, 1, 2, 3, 0]);
    for pair in events.windows(2) {
        assert_ne!(pair[0], pair[1], "observer fired twice for one index");
    }
}

#[test]
fn free_playback_marks_index_dirty() {
    let mut looper = stacked_loop(4, false);
    looper.tick(0.6); // nearest home time is now 0.5
    assert_eq!(looper.current(), 1);
    assert_eq!(looper.current(), 1, "recompute commits and stays stable");
}

#[test]
fn closest_index_is_periodic_over_whole_cycles() {
    let mut looper = stacked_loop(4, false);
    looper.tick(0.6);
    let before = looper.closest_index(false);
    for _ in 0..8 {
        looper.tick(0.25); // exactly one duration
    }
    assert_eq!(looper.closest_index(false), before);
    assert!((looper.timeline().time() - 0.6).abs() < 1e-9);
}

#[test]
fn resize_preserves_fractional_progress() {
    let mut looper = stacked_loop(4, false);
    looper.tick(0.737);
    let progress = looper.timeline().progress();

    let taller = LayoutSnapshot::stacked(4, 80.0, 0.0, 300.0);
    looper.refresh(&taller, true).expect("refresh succeeds");

    assert!((looper.timeline().duration() - 3.2).abs() < 1e-9);
    assert!(
        (looper.timeline().progress() - progress).abs() < 1e-9,
        "fractional progress must survive a deep refresh"
    );
}

#[test]
fn paused_deep_refresh_parks_on_committed_index() {
    let mut looper = stacked_loop(4, true);
    looper.to_index(2, MotionSpec::instant());

    let reflowed = LayoutSnapshot::stacked(4, 80.0, 10.0, 300.0);
    looper.refresh(&reflowed, true).expect("refresh succeeds");

    assert!((looper.timeline().time() - looper.times()[2]).abs() < 1e-9);
    assert_eq!(looper.closest_index(false), 2);
}

#[test]
fn refresh_during_active_seek_keeps_index_synchronized() {
    let mut looper = stacked_loop(6, false);
    let handle = looper.to_index(2, MotionSpec::tween(1.0, Easing::Linear));
    looper.tick(0.3);
    assert!(looper.is_motion_active(handle));

    let resized = LayoutSnapshot::stacked(6, 64.0, 0.0, 300.0);
    looper.refresh(&resized, true).expect("refresh succeeds");

    assert!(!looper.is_motion_active(handle), "stale motion must die");
    assert_eq!(looper.current(), 2);
    assert_eq!(looper.closest_index(false), 2);
    assert!((looper.timeline().time() - looper.times()[2]).abs() < 1e-9);
}

#[test]
fn light_refresh_recomputes_offsets_only() {
    let snapshot = LayoutSnapshot::stacked(4, 50.0, 0.0, 100.0);
    let mut looper = VerticalLoop::new(
        vec![0, 1, 2, 3],
        &snapshot,
        LoopConfig::new().paused(true).center(Center::Container),
    )
    .expect("valid loop");
    let duration = looper.timeline().duration();

    let shrunk = LayoutSnapshot::stacked(4, 50.0, 0.0, 60.0);
    looper.refresh(&shrunk, false).expect("refresh succeeds");

    assert_eq!(looper.timeline().duration(), duration, "segments untouched");
    assert!((looper.time_offset() - duration * (30.0 / 200.0)).abs() < 1e-9);
}

#[test]
fn centered_loop_keeps_navigation_consistent() {
    let snapshot = LayoutSnapshot::stacked(4, 50.0, 0.0, 100.0);
    let mut looper = VerticalLoop::new(
        vec![0, 1, 2, 3],
        &snapshot,
        LoopConfig::new().paused(true).center(Center::Container),
    )
    .expect("valid loop");

    // duration 2.0, extent 200: labels shift back by 0.5 and forward by an
    // item's half traversal (0.125).
    assert!((looper.time_offset() - 0.5).abs() < 1e-9);
    assert!((looper.times()[1] - 0.25).abs() < 1e-9);

    looper.to_index(2, MotionSpec::instant());
    assert_eq!(looper.closest_index(true), 2);
    assert!((looper.timeline().time() - 0.75).abs() < 1e-9);
}

#[test]
fn explicit_center_extent_matches_container_centering() {
    let within = VerticalLoop::new(
        vec![0, 1, 2, 3],
        &LayoutSnapshot::stacked(4, 50.0, 0.0, 300.0),
        LoopConfig::new().paused(true).center(Center::Within(100.0)),
    )
    .expect("valid loop");
    let container = VerticalLoop::new(
        vec![0, 1, 2, 3],
        &LayoutSnapshot::stacked(4, 50.0, 0.0, 100.0),
        LoopConfig::new().paused(true).center(Center::Container),
    )
    .expect("valid loop");
    assert_eq!(within.times(), container.times());
}

#[test]
fn reversed_playback_folds_below_zero() {
    let snapshot = LayoutSnapshot::stacked(4, 50.0, 0.0, 300.0);
    let mut looper = VerticalLoop::new(
        vec![0, 1, 2, 3],
        &snapshot,
        LoopConfig::new().reversed(true),
    )
    .expect("valid loop");

    looper.tick(0.3);
    assert!((looper.timeline().time() - 1.7).abs() < 1e-9);
    assert_eq!(looper.current(), 3);
}

#[test]
fn speed_scales_duration() {
    let snapshot = LayoutSnapshot::stacked(4, 50.0, 0.0, 300.0);
    let looper = VerticalLoop::new(
        vec![0, 1, 2, 3],
        &snapshot,
        LoopConfig::new().speed(2.0),
    )
    .expect("valid loop");
    assert!((looper.timeline().duration() - 1.0).abs() < 1e-9);
}

#[test]
fn trailing_padding_extends_the_cycle() {
    let snapshot = LayoutSnapshot::stacked(4, 50.0, 0.0, 300.0);
    let looper = VerticalLoop::new(
        vec![0, 1, 2, 3],
        &snapshot,
        LoopConfig::new().padding_bottom(50.0),
    )
    .expect("valid loop");
    assert!((looper.timeline().duration() - 2.5).abs() < 1e-9);
}

#[test]
fn y_percent_reports_item_positions() {
    let mut looper = stacked_loop(2, true);
    assert_eq!(looper.y_percent(0), Some(0.0));
    assert_eq!(looper.y_percent(1), Some(0.0));

    looper.to_index(1, MotionSpec::instant());
    // Item 1 has risen one item height into the home slot; item 0 sits at
    // the wrap boundary (one loop extent below its exit position).
    assert_eq!(looper.y_percent(1), Some(-100.0));
    assert_eq!(looper.y_percent(0), Some(100.0));
}

#[test]
fn dispose_silences_the_observer() {
    let mut looper = stacked_loop(4, false);
    let events: Rc<RefCell<Vec<usize>>> = Rc::default();
    let sink = Rc::clone(&events);
    looper.set_observer(move |_: &usize, index: usize| sink.borrow_mut().push(index));
    assert_eq!(events.borrow().len(), 1, "observer fires once on attach");

    looper.dispose();
    for _ in 0..10 {
        looper.tick(0.1);
    }
    assert_eq!(events.borrow().len(), 1);
}
