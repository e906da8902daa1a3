//! Occupancy-driven adaptive partitioning
//!
//! This crate divides an interval or a rectangle into bins whose widths follow
//! the data: dense regions get narrow bins, sparse regions wide ones. Every
//! bin ends up holding between `occupancy` and twice that weight, so each
//! bin's content has comparable statistical precision.
//!
//! # Key Features
//!
//! - **Deterministic median splits**: Heaviest bin first, cut at the weighted median
//! - **Three outputs per engine**: Structural, adjusted and adjusted-and-filled tilings
//! - **Weighted samples**: Occupancy is the summed weight, not the raw count
//! - **Refilling**: Adjusted tilings accept new samples or tuple streams
//! - **Histogram hand-off**: Any [`HistogramAdapter`] can be laid out from a tiling
//!
//! # Tilings
//!
//! The *structural* tiling places each cut on the first observation above
//! the median, which leaves every boundary touching a data point. The
//! *adjusted* tiling moves each cut halfway to the nearest observation on
//! the other side, so bin edges sit in the gaps between data. Refilling the
//! adjusted tiling with the construction sample reproduces the structural
//! counts.
//!
//! # Examples
//!
//! ## One dimension
//!
//! ```rust
//! use adaptive_core::Sample1D;
//! use adaptive_partition::{Partition1D, PartitionConfig};
//!
//! let data: Vec<f64> = (0..100).map(|i| (i as f64 / 10.0).powi(2)).collect();
//! let sample = Sample1D::new(data).unwrap();
//! let engine = Partition1D::from_data_range(&sample, PartitionConfig::new(10.0)).unwrap();
//!
//! let tiling = engine.structural_tiling();
//! for bin in tiling.bins() {
//!     assert!(bin.weight() >= 10.0 && bin.weight() < 20.0);
//! }
//! assert_eq!(tiling.total_entries(), 100);
//! ```
//!
//! ## Two dimensions
//!
//! ```rust
//! use adaptive_core::Sample2D;
//! use adaptive_partition::{Partition2D, PartitionConfig, Rect};
//!
//! let x = vec![0.1, 0.4, 0.5, 0.9, 0.2, 0.7, 0.3, 0.8];
//! let y = vec![0.2, 0.9, 0.4, 0.1, 0.6, 0.8, 0.3, 0.5];
//! let sample = Sample2D::new(x, y).unwrap();
//! let bounds = Rect::new(0.0, 1.0, 0.0, 1.0);
//! let engine = Partition2D::new(&sample, bounds, PartitionConfig::new(2.0)).unwrap();
//!
//! let adjusted = engine.adjusted_filled();
//! assert_eq!(adjusted.total_entries(), 8);
//! assert_eq!(engine.locate(0.1, 0.2), adjusted.find_bin(0.1, 0.2));
//! ```

mod bins;
pub mod config;
pub mod error;
mod partition1d;
mod partition2d;
mod region;
mod split;
mod tiling;
pub mod traits;

pub use bins::{Bin1D, Bin2D, Overflow};
pub use config::PartitionConfig;
pub use error::{Error, Result};
pub use partition1d::Partition1D;
pub use partition2d::Partition2D;
pub use region::{Axis, Interval, Rect};
pub use split::SplitRecord;
pub use tiling::{Tiling1D, Tiling2D};
pub use traits::HistogramAdapter;
