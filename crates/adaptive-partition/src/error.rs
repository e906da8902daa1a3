//! Error types for partition construction

use crate::region::Rect;
use thiserror::Error;

/// Errors raised while constructing a partition engine
///
/// Every variant is a caller programming error detected before any splitting
/// happens. Sparse or degenerate samples are not errors; they produce a
/// single-bin tiling.
#[derive(Error, Debug)]
pub enum Error {
    /// Minimum occupancy is zero, negative or not finite
    #[error("Minimum occupancy {occupancy} must be finite and positive")]
    InvalidOccupancy { occupancy: f64 },

    /// A bin limit of zero was requested
    #[error("Bin limit must be at least 1")]
    InvalidBinLimit,

    /// 1-D bounds are inverted, empty or not finite
    #[error("Invalid bounds [{lower}, {upper}]: lower edge must lie strictly below upper edge")]
    InvalidBounds { lower: f64, upper: f64 },

    /// 2-D bounds have zero area or non-finite edges
    #[error("Invalid bounding rectangle {0}: edges must be finite with positive width and height")]
    InvalidRectangle(Rect),

    /// No observations were supplied
    #[error("Cannot partition an empty sample")]
    EmptySample,

    /// Sample, configuration or IO error from the core crate
    #[error("Core error: {0}")]
    Core(#[from] adaptive_core::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions
impl Error {
    /// Check that a pair of 1-D bounds is usable
    pub fn check_bounds(lower: f64, upper: f64) -> Result<()> {
        if !(lower.is_finite() && upper.is_finite()) || lower >= upper {
            return Err(Error::InvalidBounds { lower, upper });
        }
        Ok(())
    }

    /// Check that a bounding rectangle is usable
    pub fn check_rect(rect: &Rect) -> Result<()> {
        let finite = [rect.x_min, rect.x_max, rect.y_min, rect.y_max]
            .iter()
            .all(|v| v.is_finite());
        if !finite || rect.x_min >= rect.x_max || rect.y_min >= rect.y_max {
            return Err(Error::InvalidRectangle(*rect));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_bounds() {
        assert!(Error::check_bounds(0.0, 1.0).is_ok());
        assert!(matches!(Error::check_bounds(1.0, 0.0), Err(Error::InvalidBounds { .. })));
        assert!(Error::check_bounds(2.0, 2.0).is_err());
        assert!(Error::check_bounds(f64::NEG_INFINITY, 0.0).is_err());
    }

    #[test]
    fn test_check_rect() {
        assert!(Error::check_rect(&Rect::new(0.0, 1.0, 0.0, 1.0)).is_ok());
        let flat = Rect::new(0.0, 1.0, 3.0, 3.0);
        let err = Error::check_rect(&flat).unwrap_err();
        assert!(err.to_string().contains("positive width and height"));
    }

    #[test]
    fn test_core_error_wraps() {
        let err: Error = adaptive_core::Error::size_mismatch(3, 2, "weights").into();
        assert!(matches!(err, Error::Core(_)));
        assert!(err.to_string().starts_with("Core error"));
    }
}
