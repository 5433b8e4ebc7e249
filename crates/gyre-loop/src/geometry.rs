//! Geometry sampling: raw item boxes to resolution-independent percentages.

use smallvec::SmallVec;

use crate::config::Snap;
use crate::error::LoopError;
use crate::layout::LayoutSnapshot;

/// Per-item arrays type: loops are small (a handful of navigation entries),
/// so these normally live inline.
pub type ItemArray = SmallVec<[f64; 8]>;

/// Normalized measurements for every item, indexed by visual position.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    /// Laid-out leading edges, px (untranslated).
    pub tops: ItemArray,
    /// Rendered heights, px.
    pub heights: ItemArray,
    /// Current offset of each item as a fraction of its own height, in
    /// percent, quantized by the configured snap step.
    pub y_percents: ItemArray,
    /// Gap before each item: index 0 measures against the container's
    /// leading edge, later indices against the previous item's trailing
    /// edge.
    pub space_before: ItemArray,
    /// Total traversable distance for one full cycle, px.
    pub total_extent: f64,
}

impl Geometry {
    /// Measure a layout snapshot into normalized geometry.
    ///
    /// `prior` carries each item's committed percentage offset across a
    /// resample; on the first sample every item sits at its rest position.
    /// Refuses to proceed on an empty item set or an item without a usable
    /// height, since both would poison the percentage math downstream.
    pub fn sample(
        snapshot: &LayoutSnapshot,
        snap: Snap,
        prior: Option<&Geometry>,
        trailing_padding: f64,
    ) -> Result<Geometry, LoopError> {
        if snapshot.items.is_empty() {
            return Err(LoopError::EmptyItems);
        }

        let length = snapshot.items.len();
        let mut tops = ItemArray::with_capacity(length);
        let mut heights = ItemArray::with_capacity(length);
        let mut y_percents = ItemArray::with_capacity(length);
        let mut space_before = ItemArray::with_capacity(length);

        let mut previous_bottom = snapshot.container.top;
        for (i, item) in snapshot.items.iter().enumerate() {
            if !item.height.is_finite() || item.height <= 0.0 {
                return Err(LoopError::UnmeasurableItem {
                    index: i,
                    height: item.height,
                });
            }
            tops.push(item.top);
            heights.push(item.height);
            let carried = prior
                .and_then(|g| g.y_percents.get(i).copied())
                .unwrap_or(0.0);
            y_percents.push(snap.apply(carried));
            space_before.push(item.top - previous_bottom);
            previous_bottom = item.bottom();
        }

        let last = length - 1;
        let last_shift = y_percents[last] / 100.0 * heights[last];
        let total_extent = tops[last] + last_shift - tops[0]
            + space_before[0]
            + heights[last]
            + trailing_padding;

        log::debug!(
            "sampled {length} items, total extent {total_extent:.1}px (padding {trailing_padding:.1}px)"
        );

        Ok(Geometry {
            tops,
            heights,
            y_percents,
            space_before,
            total_extent,
        })
    }

    pub fn len(&self) -> usize {
        self.heights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heights.is_empty()
    }
}
