//! Label time adjustment for center-aligned loops.

use gyre_motion::wrap_time;

use crate::geometry::{Geometry, ItemArray};

/// Shift raw label times so the "current" item sits at the midpoint of
/// `center_extent` instead of the container's leading edge.
///
/// Every label moves back by the time it takes the strip to travel half the
/// centering extent, plus forward by half the item's own traversal time (so
/// the item's middle, not its leading edge, lands on the midpoint). Results
/// re-wrap into `[0, duration)`.
///
/// With no centering extent the labels pass through untouched and the
/// returned offset is zero.
pub fn apply_center_offsets(
    labels: &[f64],
    geometry: &Geometry,
    center_extent: Option<f64>,
    duration: f64,
) -> (ItemArray, f64) {
    let Some(extent) = center_extent else {
        return (ItemArray::from_slice(labels), 0.0);
    };

    let time_offset = duration * (extent / 2.0) / geometry.total_extent;
    let times = labels
        .iter()
        .enumerate()
        .map(|(i, &label)| {
            let half_item = duration * geometry.heights[i] / 2.0 / geometry.total_extent;
            wrap_time(label + half_item - time_offset, duration)
        })
        .collect();
    (times, time_offset)
}
