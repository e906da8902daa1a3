//! Bin value types
//!
//! Bins are read-only to callers. The engines and tilings of this crate fill
//! them through the crate-private `record`/`reset` pair; the engines then
//! `settle_weight` their structural bins to the occupancy each split admitted.

use crate::region::{Interval, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Observations that fell outside a tiling's bounds
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Overflow {
    /// Number of observations outside the bounds
    pub entries: usize,
    /// Their summed weight
    pub weight: f64,
}

impl Overflow {
    pub(crate) fn record(&mut self, weight: f64) {
        self.entries += 1;
        self.weight += weight;
    }
}

/// A single bin of a one-dimensional tiling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin1D {
    interval: Interval,
    entries: usize,
    weight: f64,
    observed: Option<Interval>,
}

impl Bin1D {
    /// An empty bin covering `interval`
    pub(crate) fn empty(interval: Interval) -> Self {
        Self {
            interval,
            entries: 0,
            weight: 0.0,
            observed: None,
        }
    }

    /// Add one observation
    pub(crate) fn record(&mut self, x: f64, weight: f64) {
        self.entries += 1;
        self.weight += weight;
        match self.observed.as_mut() {
            Some(observed) => observed.include(x),
            None => self.observed = Some(Interval::point(x)),
        }
    }

    /// Report `weight` as the bin's occupancy
    ///
    /// Summing the same observations in another order can differ in the last
    /// bits from the side weight a split was checked against.
    pub(crate) fn settle_weight(&mut self, weight: f64) {
        self.weight = weight;
    }

    /// Drop the contents, keeping the geometry
    pub(crate) fn reset(&mut self) {
        self.entries = 0;
        self.weight = 0.0;
        self.observed = None;
    }

    /// Lower edge
    pub fn min(&self) -> f64 {
        self.interval.min
    }

    /// Upper edge
    pub fn max(&self) -> f64 {
        self.interval.max
    }

    /// Bin boundaries
    pub fn interval(&self) -> Interval {
        self.interval
    }

    /// Number of observations assigned
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Accumulated weight (the bin's occupancy)
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Smallest and largest coordinate actually observed in the bin
    pub fn observed(&self) -> Option<Interval> {
        self.observed
    }

    /// Width of the bin
    pub fn width(&self) -> f64 {
        self.interval.width()
    }

    /// Center of the bin
    pub fn center(&self) -> f64 {
        self.interval.center()
    }
}

impl fmt::Display for Bin1D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: entries={}, weight={:.3}",
            self.interval, self.entries, self.weight
        )
    }
}

/// A single bin of a two-dimensional tiling
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin2D {
    rect: Rect,
    entries: usize,
    weight: f64,
    observed: Option<Rect>,
    x_median: Option<f64>,
    y_median: Option<f64>,
}

impl Bin2D {
    /// An empty bin covering `rect`
    pub(crate) fn empty(rect: Rect) -> Self {
        Self {
            rect,
            entries: 0,
            weight: 0.0,
            observed: None,
            x_median: None,
            y_median: None,
        }
    }

    /// Add one observation
    pub(crate) fn record(&mut self, x: f64, y: f64, weight: f64) {
        self.entries += 1;
        self.weight += weight;
        match self.observed.as_mut() {
            Some(observed) => observed.include(x, y),
            None => self.observed = Some(Rect::point(x, y)),
        }
    }

    /// Attach the per-axis weighted medians of the assigned points
    pub(crate) fn set_medians(&mut self, x_median: Option<f64>, y_median: Option<f64>) {
        self.x_median = x_median;
        self.y_median = y_median;
    }

    /// Report `weight` as the bin's occupancy
    ///
    /// Summing the same observations in another order can differ in the last
    /// bits from the side weight a split was checked against.
    pub(crate) fn settle_weight(&mut self, weight: f64) {
        self.weight = weight;
    }

    /// Drop the contents, keeping the geometry
    pub(crate) fn reset(&mut self) {
        self.entries = 0;
        self.weight = 0.0;
        self.observed = None;
        self.x_median = None;
        self.y_median = None;
    }

    /// Bin boundaries
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Number of observations assigned
    pub fn entries(&self) -> usize {
        self.entries
    }

    /// Accumulated weight (the bin's occupancy)
    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Bounding box of the observations actually seen in the bin
    ///
    /// Its edges are the bin's extremal points: `x_min` is the x coordinate
    /// of the leftmost observation, and so on.
    pub fn observed(&self) -> Option<Rect> {
        self.observed
    }

    /// Weighted median of the x coordinates assigned during construction
    ///
    /// `None` for bins of a tiling filled after construction.
    pub fn x_median(&self) -> Option<f64> {
        self.x_median
    }

    /// Weighted median of the y coordinates assigned during construction
    pub fn y_median(&self) -> Option<f64> {
        self.y_median
    }

    /// Area of the bin
    pub fn area(&self) -> f64 {
        self.rect.area()
    }
}

impl fmt::Display for Bin2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: entries={}, weight={:.3}",
            self.rect, self.entries, self.weight
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bin1d_record_and_reset() {
        let mut bin = Bin1D::empty(Interval::new(0.0, 4.0));
        bin.record(1.0, 0.5);
        bin.record(3.0, 1.5);

        assert_eq!(bin.entries(), 2);
        assert_eq!(bin.weight(), 2.0);
        assert_eq!(bin.observed(), Some(Interval::new(1.0, 3.0)));
        assert_eq!(bin.width(), 4.0);
        assert_eq!(bin.center(), 2.0);

        bin.reset();
        assert_eq!(bin.entries(), 0);
        assert_eq!(bin.observed(), None);
        assert_eq!(bin.interval(), Interval::new(0.0, 4.0));
    }

    #[test]
    fn test_bin2d_tracks_extremal_points() {
        let mut bin = Bin2D::empty(Rect::new(0.0, 10.0, 0.0, 10.0));
        bin.record(2.0, 7.0, 1.0);
        bin.record(5.0, 1.0, 1.0);
        bin.record(3.0, 4.0, 2.0);

        assert_eq!(bin.entries(), 3);
        assert_eq!(bin.weight(), 4.0);
        assert_eq!(bin.observed(), Some(Rect::new(2.0, 5.0, 1.0, 7.0)));
        assert_eq!(bin.x_median(), None);

        bin.set_medians(Some(3.0), Some(4.0));
        assert_eq!(bin.x_median(), Some(3.0));
        bin.reset();
        assert_eq!(bin.y_median(), None);
        assert_eq!(bin.area(), 100.0);
    }

    #[test]
    fn test_overflow_record() {
        let mut outside = Overflow::default();
        outside.record(0.5);
        outside.record(2.0);
        assert_eq!(outside, Overflow { entries: 2, weight: 2.5 });
    }
}
