//! Tilings: ordered lists of bins covering a bounding region
//!
//! A tiling is a plain value. Engines hand out clones, so a tiling can be
//! refilled, rendered or serialized without touching the engine that built
//! it.

use crate::bins::{Bin1D, Bin2D, Overflow};
use crate::region::{Interval, Rect};
use crate::traits::HistogramAdapter;
use adaptive_core::{Sample1D, Sample2D};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A tiling of an interval into contiguous bins ordered by `min`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tiling1D {
    bins: Vec<Bin1D>,
    bounds: Interval,
    outside: Overflow,
}

impl Tiling1D {
    pub(crate) fn new(bins: Vec<Bin1D>, bounds: Interval) -> Self {
        Self {
            bins,
            bounds,
            outside: Overflow::default(),
        }
    }

    pub(crate) fn record(&mut self, index: usize, x: f64, weight: f64) {
        self.bins[index].record(x, weight);
    }

    pub(crate) fn record_outside(&mut self, weight: f64) {
        self.outside.record(weight);
    }

    /// Get the bins
    pub fn bins(&self) -> &[Bin1D] {
        &self.bins
    }

    /// Take ownership of the bins
    pub fn into_bins(self) -> Vec<Bin1D> {
        self.bins
    }

    /// Get the number of bins
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Check if the tiling has no bins
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// The interval being tiled
    pub fn bounds(&self) -> Interval {
        self.bounds
    }

    /// Observations that fell outside the bounds
    pub fn outside(&self) -> Overflow {
        self.outside
    }

    /// Bin boundaries as intervals
    pub fn regions(&self) -> Vec<Interval> {
        self.bins.iter().map(Bin1D::interval).collect()
    }

    /// Bin edges (including rightmost edge)
    pub fn edges(&self) -> Vec<f64> {
        let mut edges: Vec<f64> = self.bins.iter().map(Bin1D::min).collect();
        if let Some(last) = self.bins.last() {
            edges.push(last.max());
        }
        edges
    }

    /// Total entries inside the bounds
    pub fn total_entries(&self) -> usize {
        self.bins.iter().map(Bin1D::entries).sum()
    }

    /// Total weight inside the bounds
    pub fn total_weight(&self) -> f64 {
        self.bins.iter().map(Bin1D::weight).sum()
    }

    /// Find which bin contains a given value
    ///
    /// Bins are `[min, max)`; the last bin also contains the upper bound.
    pub fn find_bin(&self, x: f64) -> Option<usize> {
        if !self.bounds.contains_closed(x) {
            return None;
        }
        let index = self.bins.partition_point(|bin| bin.min() <= x).checked_sub(1)?;
        let bin = &self.bins[index];
        let last = index + 1 == self.bins.len();
        if x < bin.max() || (last && x <= bin.max()) {
            Some(index)
        } else {
            None
        }
    }

    /// Drop all contents, keeping the geometry
    pub fn clear(&mut self) {
        self.bins.iter_mut().for_each(Bin1D::reset);
        self.outside = Overflow::default();
    }

    /// Add one observation, returning the bin it landed in
    pub fn fill(&mut self, x: f64, weight: f64) -> Option<usize> {
        match self.find_bin(x) {
            Some(index) => {
                self.record(index, x, weight);
                Some(index)
            }
            None => {
                self.record_outside(weight);
                None
            }
        }
    }

    /// Add every observation of a sample
    pub fn fill_sample(&mut self, sample: &Sample1D) {
        for (x, w) in sample.iter() {
            self.fill(x, w);
        }
    }

    /// A copy of this geometry holding only the given `(x, weight)` observations
    pub fn filled_with<I>(&self, observations: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut tiling = self.clone();
        tiling.clear();
        for (x, w) in observations {
            tiling.fill(x, w);
        }
        tiling
    }

    /// Hand the tiling to a histogram implementation
    pub fn to_histogram<H>(&self) -> H
    where
        H: HistogramAdapter<Region = Interval>,
    {
        let mut histogram = H::from_regions(self.regions());
        for (index, bin) in self.bins.iter().enumerate() {
            histogram.set_content(index, bin.entries(), bin.weight());
        }
        histogram
    }
}

impl fmt::Display for Tiling1D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tiling1D({} bins over [{:.3}, {:.3}], entries={})",
            self.len(),
            self.bounds.min,
            self.bounds.max,
            self.total_entries()
        )
    }
}

/// A tiling of a rectangle into pairwise disjoint rectangular bins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tiling2D {
    bins: Vec<Bin2D>,
    bounds: Rect,
    outside: Overflow,
}

impl Tiling2D {
    pub(crate) fn new(bins: Vec<Bin2D>, bounds: Rect) -> Self {
        Self {
            bins,
            bounds,
            outside: Overflow::default(),
        }
    }

    pub(crate) fn record(&mut self, index: usize, x: f64, y: f64, weight: f64) {
        self.bins[index].record(x, y, weight);
    }

    pub(crate) fn record_outside(&mut self, weight: f64) {
        self.outside.record(weight);
    }

    /// Get the bins
    pub fn bins(&self) -> &[Bin2D] {
        &self.bins
    }

    /// Take ownership of the bins
    pub fn into_bins(self) -> Vec<Bin2D> {
        self.bins
    }

    /// Get the number of bins
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Check if the tiling has no bins
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// The rectangle being tiled
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Observations that fell outside the bounds
    pub fn outside(&self) -> Overflow {
        self.outside
    }

    /// Bin boundaries as rectangles
    pub fn regions(&self) -> Vec<Rect> {
        self.bins.iter().map(Bin2D::rect).collect()
    }

    /// Total entries inside the bounds
    pub fn total_entries(&self) -> usize {
        self.bins.iter().map(Bin2D::entries).sum()
    }

    /// Total weight inside the bounds
    pub fn total_weight(&self) -> f64 {
        self.bins.iter().map(Bin2D::weight).sum()
    }

    /// Find which bin contains a given point
    ///
    /// Linear scan over the bins; partition engines answer the same query in
    /// logarithmic time through their split tree. A zero-width bin on the
    /// upper outer edge shares that edge with its neighbour, in which case
    /// the later bin wins, as in [`Tiling1D::find_bin`].
    pub fn find_bin(&self, x: f64, y: f64) -> Option<usize> {
        if !self.bounds.contains_closed(x, y) {
            return None;
        }
        self.bins
            .iter()
            .rposition(|bin| bin.rect().contains_within(x, y, &self.bounds))
    }

    /// Drop all contents, keeping the geometry
    pub fn clear(&mut self) {
        self.bins.iter_mut().for_each(Bin2D::reset);
        self.outside = Overflow::default();
    }

    /// Add one observation, returning the bin it landed in
    pub fn fill(&mut self, x: f64, y: f64, weight: f64) -> Option<usize> {
        match self.find_bin(x, y) {
            Some(index) => {
                self.record(index, x, y, weight);
                Some(index)
            }
            None => {
                self.record_outside(weight);
                None
            }
        }
    }

    /// Add every observation of a sample
    pub fn fill_sample(&mut self, sample: &Sample2D) {
        for (x, y, w) in sample.iter() {
            self.fill(x, y, w);
        }
    }

    /// A copy of this geometry holding only the given `(x, y, weight)` observations
    pub fn filled_with<I>(&self, observations: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64, f64)>,
    {
        let mut tiling = self.clone();
        tiling.clear();
        for (x, y, w) in observations {
            tiling.fill(x, y, w);
        }
        tiling
    }

    /// Hand the tiling to a histogram implementation
    pub fn to_histogram<H>(&self) -> H
    where
        H: HistogramAdapter<Region = Rect>,
    {
        let mut histogram = H::from_regions(self.regions());
        for (index, bin) in self.bins.iter().enumerate() {
            histogram.set_content(index, bin.entries(), bin.weight());
        }
        histogram
    }
}

impl fmt::Display for Tiling2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Tiling2D({} bins over {}, entries={})",
            self.len(),
            self.bounds,
            self.total_entries()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::region::Axis;

    fn three_bins() -> Tiling1D {
        let bins = vec![
            Bin1D::empty(Interval::new(0.0, 1.0)),
            Bin1D::empty(Interval::new(1.0, 2.5)),
            Bin1D::empty(Interval::new(2.5, 3.0)),
        ];
        Tiling1D::new(bins, Interval::new(0.0, 3.0))
    }

    #[test]
    fn test_tiling1d_lookup() {
        let tiling = three_bins();
        assert_eq!(tiling.len(), 3);
        assert_eq!(tiling.edges(), vec![0.0, 1.0, 2.5, 3.0]);
        assert_eq!(tiling.find_bin(0.0), Some(0));
        assert_eq!(tiling.find_bin(1.0), Some(1));
        assert_eq!(tiling.find_bin(2.4999), Some(1));
        assert_eq!(tiling.find_bin(3.0), Some(2)); // Last bin includes right edge
        assert_eq!(tiling.find_bin(-0.1), None);
        assert_eq!(tiling.find_bin(3.1), None);
    }

    #[test]
    fn test_tiling1d_fill_and_clear() {
        let mut tiling = three_bins();
        assert_eq!(tiling.fill(0.5, 2.0), Some(0));
        assert_eq!(tiling.fill(2.0, 1.0), Some(1));
        assert_eq!(tiling.fill(7.0, 0.5), None);

        assert_eq!(tiling.total_entries(), 2);
        assert_eq!(tiling.total_weight(), 3.0);
        assert_eq!(tiling.outside(), Overflow { entries: 1, weight: 0.5 });

        let refilled = tiling.filled_with(vec![(2.9, 1.0)]);
        assert_eq!(refilled.bins()[2].entries(), 1);
        assert_eq!(refilled.total_entries(), 1);
        assert_eq!(refilled.outside(), Overflow::default());
        // The source keeps its own contents
        assert_eq!(tiling.total_entries(), 2);

        tiling.clear();
        assert_eq!(tiling.total_entries(), 0);
        assert_eq!(tiling.regions(), three_bins().regions());
    }

    #[test]
    fn test_tiling2d_lookup_and_fill() {
        let bounds = Rect::new(0.0, 4.0, 0.0, 2.0);
        let (left, right) = bounds.split(Axis::X, 1.0);
        let (bottom, top) = right.split(Axis::Y, 1.0);
        let bins = vec![Bin2D::empty(left), Bin2D::empty(bottom), Bin2D::empty(top)];
        let mut tiling = Tiling2D::new(bins, bounds);

        assert_eq!(tiling.find_bin(0.5, 1.5), Some(0));
        assert_eq!(tiling.find_bin(1.0, 0.5), Some(1));
        assert_eq!(tiling.find_bin(4.0, 2.0), Some(2));
        assert_eq!(tiling.find_bin(4.1, 2.0), None);

        tiling.fill(3.0, 1.5, 2.0);
        tiling.fill(3.5, 1.2, 1.0);
        tiling.fill(-1.0, 0.0, 1.0);
        let top_bin = &tiling.bins()[2];
        assert_eq!(top_bin.entries(), 2);
        assert_eq!(top_bin.observed(), Some(Rect::new(3.0, 3.5, 1.2, 1.5)));
        assert_eq!(tiling.outside().entries, 1);
        assert_eq!(tiling.total_weight(), 3.0);
    }
}
