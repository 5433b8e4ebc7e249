//! Timeline construction: per-item geometry to a seamless cyclic schedule.

use gyre_motion::{Segment, Timeline};

use crate::config::Snap;
use crate::geometry::{Geometry, ItemArray};

/// Rebuild `timeline` from `geometry` and return the raw label times.
///
/// Each item gets two segments that together span exactly one cycle:
///
/// 1. forward travel from its current fractional position to the position
///    just past the wrap boundary (remaining distance / speed);
/// 2. re-entry: the item is relocated one full loop extent back (same
///    percentage units, no visible jump because it lands exactly as the
///    first segment reaches the boundary) and travels forward to its rest
///    position for the remainder of the cycle.
///
/// The returned label time per item marks when it occupies the home slot.
/// Label times grow monotonically with index (modulo wrap), and at any
/// wrapped cursor time every item has a well-defined position, so the strip
/// reads as an infinite repeat in either playback direction.
pub fn populate_timeline(
    geometry: &Geometry,
    pixels_per_second: f64,
    snap: Snap,
    timeline: &mut Timeline,
) -> ItemArray {
    timeline.clear();
    let mut labels = ItemArray::with_capacity(geometry.len());

    for i in 0..geometry.len() {
        let height = geometry.heights[i];
        let cur_y = geometry.y_percents[i] / 100.0 * height;
        let distance_to_start =
            geometry.tops[i] + cur_y - geometry.tops[0] + geometry.space_before[0];
        let distance_to_loop = distance_to_start + height;

        timeline.add(Segment {
            channel: i,
            from: geometry.y_percents[i],
            to: snap.apply((cur_y - distance_to_loop) / height * 100.0),
            start: 0.0,
            duration: distance_to_loop / pixels_per_second,
        });
        timeline.add(Segment {
            channel: i,
            from: snap.apply((cur_y - distance_to_loop + geometry.total_extent) / height * 100.0),
            to: geometry.y_percents[i],
            start: distance_to_loop / pixels_per_second,
            duration: (geometry.total_extent - distance_to_loop) / pixels_per_second,
        });

        labels.push(distance_to_start / pixels_per_second);
    }

    labels
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutSnapshot;

    fn build(count: usize, height: f64, gap: f64) -> (Geometry, Timeline, ItemArray) {
        let snapshot = LayoutSnapshot::stacked(count, height, gap, 300.0);
        let geometry = Geometry::sample(&snapshot, Snap::default(), None, 0.0).unwrap();
        let mut timeline = Timeline::new();
        let labels = populate_timeline(&geometry, 100.0, Snap::default(), &mut timeline);
        (geometry, timeline, labels)
    }

    #[test]
    fn duration_is_extent_over_speed() {
        let (geometry, timeline, _) = build(4, 50.0, 0.0);
        assert_eq!(geometry.total_extent, 200.0);
        assert!((timeline.duration() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn labels_increase_with_index() {
        let (_, _, labels) = build(5, 40.0, 10.0);
        assert_eq!(labels.len(), 5);
        for pair in labels.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(labels[0], 0.0);
    }

    #[test]
    fn every_item_is_defined_across_the_whole_cycle() {
        let (_, timeline, _) = build(3, 50.0, 5.0);
        let duration = timeline.duration();
        for channel in 0..3 {
            let mut t = 0.0;
            while t < duration {
                assert!(
                    timeline.value_at(channel, t).is_some(),
                    "channel {channel} undefined at t={t}"
                );
                t += duration / 64.0;
            }
        }
    }

    #[test]
    fn reentry_continues_where_forward_travel_ends() {
        // No visible jump at the wrap boundary: the value just before the
        // boundary and just after re-entry must line up (modulo one loop
        // extent expressed in the item's own percentage units).
        let (geometry, timeline, _) = build(3, 50.0, 0.0);
        let boundary = (geometry.tops[0] + geometry.heights[0]) / 100.0; // item 0
        let before = timeline.value_at(0, boundary - 1e-6).unwrap();
        let after = timeline.value_at(0, boundary + 1e-6).unwrap();
        let extent_percent = geometry.total_extent / geometry.heights[0] * 100.0;
        assert!(
            (after - before - extent_percent).abs() < 0.1,
            "before={before} after={after} extent%={extent_percent}"
        );
    }

    #[test]
    fn items_return_to_rest_at_cycle_end() {
        let (geometry, timeline, _) = build(4, 50.0, 8.0);
        let duration = timeline.duration();
        for channel in 0..4 {
            let value = timeline.value_at(channel, duration - 1e-9).unwrap();
            assert!(
                (value - geometry.y_percents[channel]).abs() < 0.1,
                "channel {channel} ended at {value}"
            );
        }
    }
}
