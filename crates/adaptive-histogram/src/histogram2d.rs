//! Two-dimensional histograms over rectangular cells

use adaptive_partition::{HistogramAdapter, Overflow, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single rectangular cell of a 2-D histogram
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramCell {
    /// Cell boundaries
    pub rect: Rect,
    /// Number of points in this cell
    pub count: usize,
    /// Summed weight of the points in this cell
    pub weight: f64,
}

impl HistogramCell {
    /// Create a new cell
    pub fn new(rect: Rect, count: usize, weight: f64) -> Self {
        Self {
            rect,
            count,
            weight,
        }
    }

    /// Area of the cell
    pub fn area(&self) -> f64 {
        self.rect.area()
    }

    /// Get the density (weight / (total_weight * area))
    pub fn density(&self, total_weight: f64) -> f64 {
        let area = self.area();
        if area > 0.0 && total_weight > 0.0 {
            self.weight / (total_weight * area)
        } else {
            0.0
        }
    }
}

impl fmt::Display for HistogramCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: count={}, weight={:.3}", self.rect, self.count, self.weight)
    }
}

/// A histogram whose cells tile a rectangle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram2D {
    cells: Vec<HistogramCell>,
    bounds: Rect,
    total_count: usize,
    total_weight: f64,
    outside: Overflow,
}

impl Histogram2D {
    /// Create a histogram from cells tiling their bounding box
    pub fn new(cells: Vec<HistogramCell>) -> Self {
        let bounds = cells
            .iter()
            .map(|cell| cell.rect)
            .reduce(|a, b| {
                Rect::new(
                    a.x_min.min(b.x_min),
                    a.x_max.max(b.x_max),
                    a.y_min.min(b.y_min),
                    a.y_max.max(b.y_max),
                )
            })
            .unwrap_or(Rect::new(0.0, 0.0, 0.0, 0.0));
        let total_count = cells.iter().map(|cell| cell.count).sum();
        let total_weight = cells.iter().map(|cell| cell.weight).sum();
        Self {
            cells,
            bounds,
            total_count,
            total_weight,
            outside: Overflow::default(),
        }
    }

    pub(crate) fn set_outside(&mut self, outside: Overflow) {
        self.outside = outside;
    }

    /// Get the cells
    pub fn cells(&self) -> &[HistogramCell] {
        &self.cells
    }

    /// Get the number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the histogram is empty
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Rectangle covered by the cells
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Get the total count of points
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    /// Get the total weight of points
    pub fn total_weight(&self) -> f64 {
        self.total_weight
    }

    /// Points that fell outside every cell
    pub fn outside(&self) -> Overflow {
        self.outside
    }

    /// Get counts as a vector
    pub fn counts(&self) -> Vec<usize> {
        self.cells.iter().map(|cell| cell.count).collect()
    }

    /// Get weights as a vector
    pub fn weights(&self) -> Vec<f64> {
        self.cells.iter().map(|cell| cell.weight).collect()
    }

    /// Get densities as a vector
    pub fn densities(&self) -> Vec<f64> {
        self.cells
            .iter()
            .map(|cell| cell.density(self.total_weight))
            .collect()
    }

    /// Get the maximum density in the histogram
    pub fn max_density(&self) -> f64 {
        self.densities().into_iter().fold(0.0, f64::max)
    }

    /// Find which cell contains a point
    ///
    /// Cells are half-open except along the upper edges of the bounds.
    pub fn find_cell(&self, x: f64, y: f64) -> Option<usize> {
        if !self.bounds.contains_closed(x, y) {
            return None;
        }
        self.cells
            .iter()
            .rposition(|cell| cell.rect.contains_within(x, y, &self.bounds))
    }

    /// Add one point, returning the cell it landed in
    pub fn fill(&mut self, x: f64, y: f64, weight: f64) -> Option<usize> {
        match self.find_cell(x, y) {
            Some(index) => {
                let cell = &mut self.cells[index];
                cell.count += 1;
                cell.weight += weight;
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

    /// Create a normalized copy (total weight = 1)
    pub fn normalize(&self) -> Self {
        let mut normalized = self.clone();
        if self.total_weight > 0.0 {
            for cell in &mut normalized.cells {
                cell.weight /= self.total_weight;
            }
            normalized.outside.weight /= self.total_weight;
            normalized.total_weight = 1.0;
        }
        normalized
    }
}

impl HistogramAdapter for Histogram2D {
    type Region = Rect;
    type Point = (f64, f64);

    fn from_regions(regions: Vec<Rect>) -> Self {
        Self::new(
            regions
                .into_iter()
                .map(|rect| HistogramCell::new(rect, 0, 0.0))
                .collect(),
        )
    }

    fn set_content(&mut self, index: usize, entries: usize, weight: f64) {
        let cell = &mut self.cells[index];
        self.total_count = self.total_count - cell.count + entries;
        self.total_weight += weight - cell.weight;
        cell.count = entries;
        cell.weight = weight;
    }

    fn fill(&mut self, (x, y): (f64, f64), weight: f64) -> Option<usize> {
        Histogram2D::fill(self, x, y, weight)
    }
}

impl fmt::Display for Histogram2D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Histogram2D({} cells, n={}, bounds={})",
            self.len(),
            self.total_count,
            self.bounds
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quadrants() -> Histogram2D {
        Histogram2D::from_regions(vec![
            Rect::new(0.0, 1.0, 0.0, 1.0),
            Rect::new(0.0, 1.0, 1.0, 2.0),
            Rect::new(1.0, 2.0, 0.0, 2.0),
        ])
    }

    #[test]
    fn test_bounds_from_cells() {
        let hist = quadrants();
        assert_eq!(hist.bounds(), Rect::new(0.0, 2.0, 0.0, 2.0));
        assert_eq!(hist.total_count(), 0);
        assert!(Histogram2D::new(vec![]).is_empty());
    }

    #[test]
    fn test_fill_and_densities() {
        let mut hist = quadrants();
        assert_eq!(hist.fill(0.5, 0.5, 1.0), Some(0));
        assert_eq!(hist.fill(0.5, 2.0, 1.0), Some(1)); // Upper edge is closed
        assert_eq!(HistogramAdapter::fill(&mut hist, (1.0, 1.0), 2.0), Some(2));
        assert_eq!(hist.fill(2.5, 1.0, 1.0), None);

        assert_eq!(hist.counts(), vec![1, 1, 1]);
        assert_eq!(hist.total_weight(), 4.0);
        assert_eq!(hist.outside().entries, 1);
        // Third cell has twice the area and twice the weight
        assert_eq!(hist.densities(), vec![0.25, 0.25, 0.25]);
        assert_relative_eq!(hist.normalize().total_weight(), 1.0);
    }

    #[test]
    fn test_set_content() {
        let mut hist = quadrants();
        hist.set_content(2, 10, 5.0);
        hist.set_content(0, 2, 1.0);
        assert_eq!(hist.total_count(), 12);
        assert_eq!(hist.total_weight(), 6.0);
        assert_relative_eq!(hist.max_density(), 5.0 / 12.0);
    }
}
