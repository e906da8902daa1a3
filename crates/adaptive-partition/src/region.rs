//! Axis-aligned intervals and rectangles

use serde::{Deserialize, Serialize};
use std::fmt;

/// A coordinate axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// The other axis
    pub fn other(self) -> Self {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

/// A closed-open interval `[min, max)`
///
/// Whether `max` itself belongs to the interval depends on context: the
/// last bin of a tiling is closed at the upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interval {
    /// Lower edge (inclusive)
    pub min: f64,
    /// Upper edge (exclusive, except for the last bin)
    pub max: f64,
}

impl Interval {
    /// Create a new interval
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Degenerate interval holding a single value
    pub(crate) fn point(x: f64) -> Self {
        Self { min: x, max: x }
    }

    /// Grow to include `x`
    pub(crate) fn include(&mut self, x: f64) {
        self.min = self.min.min(x);
        self.max = self.max.max(x);
    }

    /// Split at `cut` into `[min, cut)` and `[cut, max)`
    pub(crate) fn split(&self, cut: f64) -> (Self, Self) {
        (Self::new(self.min, cut), Self::new(cut, self.max))
    }

    /// Width of the interval
    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// Midpoint of the interval
    pub fn center(&self) -> f64 {
        self.min + self.width() / 2.0
    }

    /// Check if `x` lies in `[min, max)`
    pub fn contains(&self, x: f64) -> bool {
        x >= self.min && x < self.max
    }

    /// Check if `x` lies in `[min, max]`
    pub fn contains_closed(&self, x: f64) -> bool {
        x >= self.min && x <= self.max
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:.3}, {:.3})", self.min, self.max)
    }
}

/// An axis-aligned rectangle `[x_min, x_max) × [y_min, y_max)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Rect {
    /// Create a new rectangle
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Degenerate rectangle holding a single point
    pub(crate) fn point(x: f64, y: f64) -> Self {
        Self::new(x, x, y, y)
    }

    /// Grow to include `(x, y)`
    pub(crate) fn include(&mut self, x: f64, y: f64) {
        self.x_min = self.x_min.min(x);
        self.x_max = self.x_max.max(x);
        self.y_min = self.y_min.min(y);
        self.y_max = self.y_max.max(y);
    }

    /// Extent along one axis
    pub fn interval(&self, axis: Axis) -> Interval {
        match axis {
            Axis::X => Interval::new(self.x_min, self.x_max),
            Axis::Y => Interval::new(self.y_min, self.y_max),
        }
    }

    /// Split at `cut` along `axis`; the lower part keeps `[min, cut)`
    pub(crate) fn split(&self, axis: Axis, cut: f64) -> (Self, Self) {
        let mut lower = *self;
        let mut upper = *self;
        match axis {
            Axis::X => {
                lower.x_max = cut;
                upper.x_min = cut;
            }
            Axis::Y => {
                lower.y_max = cut;
                upper.y_min = cut;
            }
        }
        (lower, upper)
    }

    /// Width along x
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    /// Height along y
    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Area of the rectangle
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Center point
    pub fn center(&self) -> (f64, f64) {
        (
            self.x_min + self.width() / 2.0,
            self.y_min + self.height() / 2.0,
        )
    }

    /// Check if `(x, y)` lies in the half-open rectangle
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x_min && x < self.x_max && y >= self.y_min && y < self.y_max
    }

    /// Check if `(x, y)` lies in the closed rectangle
    pub fn contains_closed(&self, x: f64, y: f64) -> bool {
        x >= self.x_min && x <= self.x_max && y >= self.y_min && y <= self.y_max
    }

    /// Membership test for a tile of a tiling bounded by `outer`
    ///
    /// Tiles are half-open, except that edges lying on the upper edges of
    /// `outer` are closed so the outer rectangle is covered completely.
    pub fn contains_within(&self, x: f64, y: f64, outer: &Rect) -> bool {
        let in_x = x >= self.x_min && (x < self.x_max || (x == self.x_max && self.x_max == outer.x_max));
        let in_y = y >= self.y_min && (y < self.y_max || (y == self.y_max && self.y_max == outer.y_max));
        in_x && in_y
    }

    /// Check if the interiors of two rectangles intersect
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x_min < other.x_max
            && other.x_min < self.x_max
            && self.y_min < other.y_max
            && other.y_min < self.y_max
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.3}, {:.3}) x [{:.3}, {:.3})",
            self.x_min, self.x_max, self.y_min, self.y_max
        )
    }
}
