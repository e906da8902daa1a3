//! Core types for variable-width histogram representation

use adaptive_partition::{HistogramAdapter, Interval, Overflow};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single bin in a histogram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    /// Left edge of the bin (inclusive)
    pub left: f64,
    /// Right edge of the bin (exclusive, except for the last bin)
    pub right: f64,
    /// Number of values in this bin
    pub count: usize,
    /// Summed weight of the values in this bin
    pub weight: f64,
}

impl HistogramBin {
    /// Create a new histogram bin
    pub fn new(left: f64, right: f64, count: usize, weight: f64) -> Self {
        Self {
            left,
            right,
            count,
            weight,
        }
    }

    /// Get the center point of the bin
    pub fn center(&self) -> f64 {
        (self.left + self.right) / 2.0
    }

    /// Get the width of the bin
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Check if a value falls within this bin
    pub fn contains(&self, value: f64) -> bool {
        value >= self.left && value < self.right
    }

    /// Get the relative frequency (weight / total_weight)
    pub fn frequency(&self, total_weight: f64) -> f64 {
        if total_weight > 0.0 {
            self.weight / total_weight
        } else {
            0.0
        }
    }

    /// Get the density (weight / (total_weight * width))
    ///
    /// Zero-width bins report zero density.
    pub fn density(&self, total_weight: f64) -> f64 {
        let width = self.width();
        if width > 0.0 && total_weight > 0.0 {
            self.weight / (total_weight * width)
        } else {
            0.0
        }
    }
}

impl fmt::Display for HistogramBin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{:.3}, {:.3}): count={}, weight={:.3}",
            self.left, self.right, self.count, self.weight
        )
    }
}

/// A histogram with contiguous bins of varying width
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    /// The bins that make up the histogram
    bins: Vec<HistogramBin>,
    /// Total number of data points inside the bins
    total_count: usize,
    /// Total weight inside the bins
    total_weight: f64,
    /// Values that fell outside every bin
    outside: Overflow,
}

impl Histogram {
    /// Create a new histogram from contiguous bins ordered by `left`
    pub fn new(bins: Vec<HistogramBin>) -> Self {
        let total_count = bins.iter().map(|bin| bin.count).sum();
        let total_weight = bins.iter().map(|bin| bin.weight).sum();
        Self {
            bins,
            total_count,
            total_weight,
            outside: Overflow::default(),
        }
    }

    pub(crate) fn set_outside(&mut self, outside: Overflow) {
        self.outside = outside;
    }

    /// Get the bins
    pub fn bins(&self) -> &[HistogramBin] {
        &self.bins
    }

    /// Get the number of bins
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    /// Check if the histogram is empty
    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Get the total count of data points
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Get the total weight of data points
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Values that fell outside the histogram range
    pub fn outside(&self) -> Overflow {
        self.outside
    }

    /// Get the lower edge of the first bin
    pub fn min(&self) -> f64 {
        self.bins.first().map_or(0.0, |bin| bin.left)
    }

    /// Get the upper edge of the last bin
    pub fn max(&self) -> f64 {
        self.bins.last().map_or(0.0, |bin| bin.right)
    }

    /// Get the range of the histogram
    pub fn range(&self) -> f64 {
        self.max() - self.min()
    }

    /// Get the maximum density in the histogram
    pub fn max_density(&self) -> f64 {
        self.densities().into_iter().fold(0.0, f64::max)
    }

    /// Get the minimum density in the histogram
    pub fn min_density(&self) -> f64 {
        self.densities().into_iter().fold(f64::INFINITY, f64::min)
    }

    /// Get the maximum count in any bin
    pub fn max_count(&self) -> usize {
        self.bins.iter().map(|bin| bin.count).max().unwrap_or(0)
    }

    /// Find which bin contains a given value
    pub fn find_bin(&self, value: f64) -> Option<usize> {
        // Handle last bin specially (includes right boundary)
        let last = self.bins.len().checked_sub(1)?;
        if value == self.bins[last].right {
            return Some(last);
        }
        let index = self.bins.partition_point(|bin| bin.left <= value).checked_sub(1)?;
        self.bins[index].contains(value).then_some(index)
    }

    /// Add one value, returning the bin it landed in
    pub fn fill(&mut self, value: f64, weight: f64) -> Option<usize> {
        match self.find_bin(value) {
            Some(index) => {
                let bin = &mut self.bins[index];
                bin.count += 1;
                bin.weight += weight;
                self.total_count += 1;
                self.total_weight += weight;
                Some(index)
            }
            None => {
                self.outside.entries += 1;
                self.outside.weight += weight;
                None
            }
        }
    }

    /// Get counts as a vector
    pub fn counts(&self) -> Vec<usize> {
        self.bins.iter().map(|bin| bin.count).collect()
    }

    /// Get weights as a vector
    pub fn weights(&self) -> Vec<f64> {
        self.bins.iter().map(|bin| bin.weight).collect()
    }

    /// Get densities as a vector
    pub fn densities(&self) -> Vec<f64> {
        self.bins
            .iter()
            .map(|bin| bin.density(self.total_weight))
            .collect()
    }

    /// Get frequencies as a vector
    pub fn frequencies(&self) -> Vec<f64> {
        self.bins
            .iter()
            .map(|bin| bin.frequency(self.total_weight))
            .collect()
    }

    /// Get bin centers as a vector
    pub fn centers(&self) -> Vec<f64> {
        self.bins.iter().map(HistogramBin::center).collect()
    }

    /// Get bin edges (including rightmost edge)
    pub fn edges(&self) -> Vec<f64> {
        let Some(last) = self.bins.last() else {
            return vec![];
        };

        let mut edges = Vec::with_capacity(self.bins.len() + 1);
        edges.extend(self.bins.iter().map(|bin| bin.left));
        edges.push(last.right);
        edges
    }

    /// Create a normalized copy (total weight = 1)
    pub fn normalize(&self) -> Self {
        let mut normalized = self.clone();
        if self.total_weight > 0.0 {
            for bin in &mut normalized.bins {
                bin.weight /= self.total_weight;
            }
            normalized.outside.weight /= self.total_weight;
            normalized.total_weight = 1.0;
        }
        normalized
    }
}

impl HistogramAdapter for Histogram {
    type Region = Interval;
    type Point = f64;

    fn from_regions(regions: Vec<Interval>) -> Self {
        let bins = regions
            .into_iter()
            .map(|region| HistogramBin::new(region.min, region.max, 0, 0.0))
            .collect();
        Self::new(bins)
    }

    fn set_content(&mut self, index: usize, entries: usize, weight: f64) {
        let bin = &mut self.bins[index];
        self.total_count = self.total_count - bin.count + entries;
        self.total_weight += weight - bin.weight;
        bin.count = entries;
        bin.weight = weight;
    }

    fn fill(&mut self, point: f64, weight: f64) -> Option<usize> {
        Histogram::fill(self, point, weight)
    }
}

impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Histogram({} bins, n={}, range=[{:.3}, {:.3}])",
            self.len(),
            self.total_count,
            self.min(),
            self.max()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_histogram_bin() {
        let bin = HistogramBin::new(0.0, 2.0, 5, 5.0);
        assert_eq!(bin.center(), 1.0);
        assert_eq!(bin.width(), 2.0);
        assert!(bin.contains(0.5));
        assert!(!bin.contains(2.0)); // Right edge is exclusive
        assert_eq!(bin.frequency(10.0), 0.5);
        assert_eq!(bin.density(10.0), 0.25); // 5 / (10 * 2.0)
        assert_eq!(HistogramBin::new(1.0, 1.0, 3, 3.0).density(10.0), 0.0);
    }

    #[test]
    fn test_histogram() {
        let bins = vec![
            HistogramBin::new(0.0, 1.0, 2, 2.0),
            HistogramBin::new(1.0, 3.0, 5, 5.0),
            HistogramBin::new(3.0, 4.0, 3, 3.0),
        ];
        let hist = Histogram::new(bins);

        assert_eq!(hist.len(), 3);
        assert_eq!(hist.total_count(), 10);
        assert_eq!(hist.range(), 4.0);
        assert_eq!(hist.max_count(), 5);
        assert_eq!(hist.find_bin(1.5), Some(1));
        assert_eq!(hist.find_bin(4.0), Some(2)); // Last bin includes right edge
        assert_eq!(hist.find_bin(4.5), None);
        assert_eq!(hist.counts(), vec![2, 5, 3]);
        assert_eq!(hist.edges(), vec![0.0, 1.0, 3.0, 4.0]);
        assert_eq!(hist.densities(), vec![0.2, 0.25, 0.3]);
        assert_relative_eq!(hist.max_density(), 0.3);
        assert_relative_eq!(hist.min_density(), 0.2);
    }

    #[test]
    fn test_adapter_and_fill() {
        let regions = vec![Interval::new(0.0, 1.0), Interval::new(1.0, 4.0)];
        let mut hist = Histogram::from_regions(regions);
        hist.set_content(1, 6, 3.0);
        assert_eq!(hist.total_count(), 6);
        hist.set_content(1, 4, 2.0);
        assert_eq!(hist.total_count(), 4);
        assert_eq!(hist.total_weight(), 2.0);

        assert_eq!(HistogramAdapter::fill(&mut hist, 0.25, 2.0), Some(0));
        assert_eq!(hist.fill(-1.0, 1.5), None);
        assert_eq!(hist.weights(), vec![2.0, 2.0]);
        assert_eq!(hist.outside(), Overflow { entries: 1, weight: 1.5 });
    }

    #[test]
    fn test_normalize() {
        let hist = Histogram::new(vec![
            HistogramBin::new(0.0, 1.0, 1, 3.0),
            HistogramBin::new(1.0, 2.0, 1, 1.0),
        ]);
        let normalized = hist.normalize();
        assert_eq!(normalized.weights(), vec![0.75, 0.25]);
        assert_eq!(normalized.total_weight(), 1.0);
        // Densities are scale free
        assert_eq!(normalized.densities(), hist.densities());
        let area: f64 = normalized
            .bins()
            .iter()
            .map(|bin| bin.density(normalized.total_weight()) * bin.width())
            .sum();
        assert_relative_eq!(area, 1.0);
    }
}
