//! Occupancy-driven adaptive histogram binning
//!
//! A facade over the workspace crates:
//!
//! - [`adaptive_core`]: validated samples, the error type and sorting utilities
//! - [`adaptive_partition`]: the 1-D and 2-D partition engines and their tilings
//! - [`adaptive_histogram`]: variable-width histograms built from those tilings
//!
//! # Example
//!
//! ```rust
//! use adaptive_binning::prelude::*;
//!
//! let x: Vec<f64> = (0..100).map(|i| (i % 10) as f64 + 0.5).collect();
//! let y: Vec<f64> = (0..100).map(|i| (i / 10) as f64 + 0.5).collect();
//! let sample = Sample2D::new(x, y).unwrap();
//!
//! let bounds = Rect::new(0.0, 10.0, 0.0, 10.0);
//! let engine = Partition2D::new(&sample, bounds, PartitionConfig::new(25.0)).unwrap();
//! let histogram: Histogram2D = engine.adjusted_filled().to_histogram();
//! assert_eq!(histogram.counts(), vec![25, 25, 25, 25]);
//! ```

pub use adaptive_core;
pub use adaptive_histogram;
pub use adaptive_partition;

/// The types most programs need
pub mod prelude {
    pub use adaptive_core::{Numeric, Sample1D, Sample2D};
    pub use adaptive_histogram::{
        adaptive_histogram, adaptive_histogram_2d, AdaptiveBuilder, AdaptiveBuilder2D, Histogram,
        Histogram2D, HistogramBuilder,
    };
    pub use adaptive_partition::{
        Error, HistogramAdapter, Interval, Partition1D, Partition2D, PartitionConfig, Rect,
        Result, Tiling1D, Tiling2D,
    };
}
