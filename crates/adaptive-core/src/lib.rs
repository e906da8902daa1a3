//! Core types for adaptive histogram binning
//!
//! This crate holds what every other adaptive-binning crate shares: the
//! error type, the validated [`Sample1D`] / [`Sample2D`] inputs, the
//! [`Numeric`] trait used to widen integer and `f32` columns, and a few
//! slice utilities (stable argsort, weighted median).
//!
//! # Example
//!
//! ```rust
//! use adaptive_core::{Sample2D, Result};
//!
//! fn load() -> Result<Sample2D> {
//!     let x = vec![0.5, 1.5, 2.5];
//!     let y = vec![1.0, 1.0, 4.0];
//!     let w = vec![1.0, 0.5, 2.0];
//!     Sample2D::weighted(x, y, w)
//! }
//!
//! let sample = load().unwrap();
//! assert_eq!(sample.len(), 3);
//! assert_eq!(sample.total_weight(), 3.5);
//! ```

pub mod error;
pub mod numeric;
pub mod sample;
pub mod utils;

// Re-export core types
pub use error::{Error, Result};
pub use numeric::Numeric;
pub use sample::{Sample1D, Sample2D};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
