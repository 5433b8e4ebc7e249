//! Measurement boundary between the loop and its host environment.
//!
//! The loop never touches the rendering environment directly; the host
//! measures its container and items and hands the result over as a
//! [`LayoutSnapshot`], both at construction and whenever a resize/reflow
//! invalidates the previous measurement.

/// An item's laid-out box, in container coordinates, before any loop
/// translation is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemBounds {
    /// Leading edge offset, px.
    pub top: f64,
    /// Rendered height, px.
    pub height: f64,
}

impl ItemBounds {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    /// Trailing edge offset, px.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// The scrolling container's box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContainerBounds {
    /// Leading edge offset, px.
    pub top: f64,
    /// Visible extent, px.
    pub height: f64,
}

impl ContainerBounds {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }
}

/// One measurement pass over the container and every item, in visual order.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSnapshot {
    pub container: ContainerBounds,
    pub items: Vec<ItemBounds>,
}

impl LayoutSnapshot {
    pub fn new(container: ContainerBounds, items: Vec<ItemBounds>) -> Self {
        Self { container, items }
    }

    /// Uniform vertical stack: `count` items of `height` px separated by
    /// `gap` px, starting at the container's leading edge.
    pub fn stacked(count: usize, height: f64, gap: f64, container_height: f64) -> Self {
        let items = (0..count)
            .map(|i| ItemBounds::new(i as f64 * (height + gap), height))
            .collect();
        Self {
            container: ContainerBounds::new(0.0, container_height),
            items,
        }
    }
}
