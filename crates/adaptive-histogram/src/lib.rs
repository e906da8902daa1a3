//! Variable-width histograms from adaptive partitions
//!
//! This crate turns the tilings of `adaptive-partition` into histograms you
//! can query and render. Bin widths follow the data, so every bin carries a
//! similar amount of weight and densities are comparably precise everywhere.
//!
//! # Key Features
//!
//! - **Occupancy-driven bins**: Each bin holds between `k` and `2k` weight
//! - **Weighted samples**: Densities use summed weights, not raw counts
//! - **One and two dimensions**: [`Histogram`] over intervals, [`Histogram2D`] over rectangles
//! - **Refilling**: Histograms accept further values through `fill`
//!
//! # Examples
//!
//! ## Basic Usage
//!
//! ```rust
//! use adaptive_histogram::{adaptive_histogram, AdaptiveBuilder, HistogramBuilder};
//!
//! let data: Vec<f64> = (0..200).map(|i| (i as f64 / 20.0).exp()).collect();
//! let histogram = adaptive_histogram(&data, 20.0).unwrap();
//!
//! println!("Histogram with {} bins", histogram.len());
//! for (bin, density) in histogram.bins().iter().zip(histogram.densities()) {
//!     println!("  [{:.1}, {:.1}): count={}, density={:.4}", bin.left, bin.right, bin.count, density);
//! }
//!
//! // The same thing through the builder, with a fixed range
//! let histogram = AdaptiveBuilder::new(20.0)
//!     .bounds(0.0, 25_000.0)
//!     .build(&data[..])
//!     .unwrap();
//! assert_eq!(histogram.total_count(), 200);
//! ```
//!
//! ## Two Dimensions
//!
//! ```rust
//! use adaptive_histogram::adaptive_histogram_2d;
//!
//! let x: Vec<f64> = (0..400).map(|i| (i % 20) as f64).collect();
//! let y: Vec<f64> = (0..400).map(|i| (i / 20) as f64).collect();
//! let histogram = adaptive_histogram_2d(&x, &y, 25.0).unwrap();
//!
//! assert_eq!(histogram.total_count(), 400);
//! assert!(histogram.cells().iter().all(|cell| cell.count >= 25));
//! ```

pub mod builders;
pub mod histogram2d;
pub mod traits;
pub mod types;

// Re-export main types and traits
pub use builders::{AdaptiveBuilder, AdaptiveBuilder2D};
pub use histogram2d::{Histogram2D, HistogramCell};
pub use traits::HistogramBuilder;
pub use types::{Histogram, HistogramBin};

pub use adaptive_partition::{Error, Result};

// Convenience functions
/// Create a variable-width histogram over the range of the data
pub fn adaptive_histogram(data: &[f64], min_occupancy: f64) -> Result<Histogram> {
    AdaptiveBuilder::new(min_occupancy).build(data)
}

/// Create a 2-D adaptive histogram over the bounding box of the points
pub fn adaptive_histogram_2d(x: &[f64], y: &[f64], min_occupancy: f64) -> Result<Histogram2D> {
    AdaptiveBuilder2D::new(min_occupancy).build_xy(x, y)
}
