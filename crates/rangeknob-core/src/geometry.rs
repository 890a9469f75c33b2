#![forbid(unsafe_code)]

//! Pixel-space primitives.

/// An axis-aligned frame in control-local pixel coordinates.
///
/// The origin is the top-left corner of the control; `x` grows to the right
/// and `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Frame {
    #[inline]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square frame of side `size` centred on `(center_x, center_y)`.
    #[inline]
    pub fn centered_square(center_x: f64, center_y: f64, size: f64) -> Self {
        let half = size / 2.0;
        Self::new(center_x - half, center_y - half, size, size)
    }

    /// Horizontal bar spanning `[min(a, b), max(a, b)]`, vertically centred
    /// on `center_y` with the given thickness.
    #[inline]
    pub fn horizontal_span(a: f64, b: f64, center_y: f64, thickness: f64) -> Self {
        let left = a.min(b);
        Self::new(left, center_y - thickness / 2.0, (a - b).abs(), thickness)
    }

    /// Right edge.
    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub fn center_x(&self) -> f64 {
        self.x + self.width / 2.0
    }

    #[inline]
    pub fn center_y(&self) -> f64 {
        self.y + self.height / 2.0
    }

    /// Check if the frame has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Hit test. Left/top edges are inclusive, right/bottom exclusive.
    #[inline]
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}
