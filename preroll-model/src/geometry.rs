//! Viewport and element geometry used by the visibility tracker.

/// Axis-aligned rectangle in host layout coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn area(&self) -> f32 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Grow the rectangle outward by a margin on each axis.
    ///
    /// Used to build the pre-fetch band around the viewport so elements are
    /// detected before they are fully on screen.
    pub fn expand(&self, margin: Margin) -> Rect {
        Rect {
            x: self.x - margin.horizontal,
            y: self.y - margin.vertical,
            width: self.width + margin.horizontal * 2.0,
            height: self.height + margin.vertical * 2.0,
        }
    }

    /// Overlapping region of two rectangles; zero-sized when disjoint.
    pub fn intersection(&self, other: &Rect) -> Rect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        Rect {
            x,
            y,
            width: (right - x).max(0.0),
            height: (bottom - y).max(0.0),
        }
    }

    /// Fraction of `self` covered by `other`, in `0.0..=1.0`.
    ///
    /// A degenerate (zero-area) rectangle counts as fully covered when its
    /// origin lies inside `other`, so zero-sized placeholders still register
    /// as visible once scrolled into the viewport.
    pub fn covered_fraction(&self, other: &Rect) -> f32 {
        let area = self.area();
        if area <= f32::EPSILON {
            let inside = self.x >= other.x
                && self.x <= other.right()
                && self.y >= other.y
                && self.y <= other.bottom();
            return if inside { 1.0 } else { 0.0 };
        }
        (self.intersection(other).area() / area).clamp(0.0, 1.0)
    }
}

/// Symmetric expansion applied to the viewport before intersection tests.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Margin {
    pub horizontal: f32,
    pub vertical: f32,
}

impl Margin {
    pub const fn new(horizontal: f32, vertical: f32) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Vertical-only margin, the common case for scrolling pages.
    pub const fn vertical(px: f32) -> Self {
        Self {
            horizontal: 0.0,
            vertical: px,
        }
    }
}
