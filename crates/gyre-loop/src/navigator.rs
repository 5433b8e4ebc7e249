//! Index math over a wrapped timeline.

/// Last committed index plus the bookkeeping that keeps it honest while the
/// cursor moves underneath it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationState {
    /// Last committed index; authoritative while no motion is unresolved.
    pub cur_index: usize,
    /// The cursor moved under free playback since the last commit.
    pub index_is_dirty: bool,
    /// De-duplication for the change observer.
    pub last_notified: usize,
}

impl NavigationState {
    pub fn new() -> Self {
        Self {
            cur_index: 0,
            index_is_dirty: false,
            last_notified: 0,
        }
    }

    /// Store a freshly computed index and clear the dirty flag.
    pub fn commit(&mut self, index: usize) {
        self.cur_index = index;
        self.index_is_dirty = false;
    }
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new()
    }
}

/// Fold an index into `[0, len)`.
#[inline]
pub fn wrap_index(index: isize, len: usize) -> usize {
    debug_assert!(len > 0);
    index.rem_euclid(len as isize) as usize
}

/// Adjust `target` so the step from `cur` takes the shortest circular path.
///
/// When the raw step exceeds half the loop, travel the other way around by
/// shifting the target one whole loop; an exact half-loop tie keeps the raw
/// direction.
pub fn shortest_target(target: isize, cur: usize, len: usize) -> isize {
    let step = target - cur as isize;
    if step.abs() as f64 > len as f64 / 2.0 {
        target + if step > 0 { -(len as isize) } else { len as isize }
    } else {
        target
    }
}

/// Index whose label time is circularly closest to `time`.
///
/// Distance on a wrapped timeline is `min(|a-b|, duration - |a-b|)`; the
/// query time folds first, so the result is periodic in whole cycles. Ties
/// resolve to the lowest index.
pub fn closest_index(times: &[f64], time: f64, duration: f64) -> usize {
    let time = gyre_motion::wrap_time(time, duration);
    let mut closest = f64::INFINITY;
    let mut index = 0;
    for (i, &label) in times.iter().enumerate() {
        let mut d = (label - time).abs();
        if d > duration / 2.0 {
            d = duration - d;
        }
        if d < closest {
            closest = d;
            index = i;
        }
    }
    index
}
