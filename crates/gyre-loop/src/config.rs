//! Loop configuration.

pub use gyre_motion::Repeat;

/// Reference travel speed at `speed == 1.0`, px per second.
pub const REFERENCE_PIXELS_PER_SECOND: f64 = 100.0;

/// Quantization applied to item offsets expressed as percentages.
///
/// Layouts routinely shift otherwise-identical items by a fraction of a
/// pixel; snapping the derived percentages suppresses that jitter. The step
/// is tunable; the default of one whole percent is an empirical choice, not
/// a contract.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Snap {
    /// Pass values through unchanged.
    Disabled,
    /// Round to the nearest multiple of the step.
    Step(f64),
}

impl Snap {
    /// Quantize `value` according to the mode.
    pub fn apply(&self, value: f64) -> f64 {
        match *self {
            Snap::Disabled => value,
            Snap::Step(step) if step > 0.0 => (value / step).round() * step,
            Snap::Step(_) => value,
        }
    }
}

impl Default for Snap {
    fn default() -> Self {
        Snap::Step(1.0)
    }
}

/// Where the "current" item sits within the container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Center {
    /// The current item aligns with the container's leading edge.
    Start,
    /// The current item is centered within the measured container.
    Container,
    /// The current item is centered within an explicit extent, px.
    Within(f64),
}

impl Default for Center {
    fn default() -> Self {
        Center::Start
    }
}

/// Construction options for a [`crate::VerticalLoop`].
#[derive(Debug, Clone, PartialEq)]
pub struct LoopConfig {
    /// Cycle budget for free playback.
    pub repeat: Repeat,
    /// Start without free playback running.
    pub paused: bool,
    /// Speed multiplier over [`REFERENCE_PIXELS_PER_SECOND`].
    pub speed: f64,
    /// Offset quantization.
    pub snap: Snap,
    /// Virtual spacing appended after the last item, px.
    pub padding_bottom: f64,
    /// Alternate trailing padding name recognized for config parity with the
    /// horizontal variant; also appended to the loop extent, px.
    pub padding_right: f64,
    /// Start playing backward.
    pub reversed: bool,
    /// Alignment of the current item.
    pub center: Center,
}

impl LoopConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn paused(mut self, paused: bool) -> Self {
        self.paused = paused;
        self
    }

    pub fn speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }

    pub fn snap(mut self, snap: Snap) -> Self {
        self.snap = snap;
        self
    }

    pub fn padding_bottom(mut self, padding: f64) -> Self {
        self.padding_bottom = padding;
        self
    }

    pub fn padding_right(mut self, padding: f64) -> Self {
        self.padding_right = padding;
        self
    }

    pub fn reversed(mut self, reversed: bool) -> Self {
        self.reversed = reversed;
        self
    }

    pub fn center(mut self, center: Center) -> Self {
        self.center = center;
        self
    }

    /// Travel speed in px per second.
    pub fn pixels_per_second(&self) -> f64 {
        self.speed * REFERENCE_PIXELS_PER_SECOND
    }

    /// Total virtual spacing appended to the loop extent.
    pub fn trailing_padding(&self) -> f64 {
        self.padding_bottom + self.padding_right
    }
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            repeat: Repeat::Infinite,
            paused: false,
            speed: 1.0,
            snap: Snap::default(),
            padding_bottom: 0.0,
            padding_right: 0.0,
            reversed: false,
            center: Center::default(),
        }
    }
}
