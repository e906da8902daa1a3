//! Partition configuration
//!
//! A configuration can be built in code with the consuming setters or
//! loaded from JSON:
//!
//! ```rust
//! use adaptive_partition::PartitionConfig;
//!
//! let config = PartitionConfig::new(25.0).max_bins(64);
//! assert_eq!(config.bin_limit(), Some(64));
//!
//! let loaded = PartitionConfig::from_json_str(r#"{ "min_occupancy": 25.0, "max_bins": 64 }"#).unwrap();
//! assert_eq!(loaded, config);
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Parameters of the occupancy-driven splitting policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartitionConfig {
    min_occupancy: f64,
    #[serde(default)]
    max_bins: Option<usize>,
}

impl PartitionConfig {
    /// Creates a configuration with the given minimum occupancy per bin.
    ///
    /// Occupancy is the weighted entry count, or the plain count for an
    /// unweighted sample.
    pub fn new(min_occupancy: f64) -> Self {
        Self {
            min_occupancy,
            max_bins: None,
        }
    }

    /// Sets the minimum occupancy.
    pub fn min_occupancy(mut self, min_occupancy: f64) -> Self {
        self.min_occupancy = min_occupancy;
        self
    }

    /// Caps the number of bins.
    ///
    /// Splitting always takes the heaviest pending bin first, so a capped
    /// run stops with the heaviest regions already divided.
    pub fn max_bins(mut self, max_bins: usize) -> Self {
        self.max_bins = Some(max_bins);
        self
    }

    /// Minimum occupancy per bin
    pub fn occupancy(&self) -> f64 {
        self.min_occupancy
    }

    /// Maximum number of bins, if capped
    pub fn bin_limit(&self) -> Option<usize> {
        self.max_bins
    }

    /// Occupancy at which a bin becomes eligible for splitting
    pub fn split_threshold(&self) -> f64 {
        2.0 * self.min_occupancy
    }

    /// Check that the configuration can drive a partition
    pub fn validate(&self) -> Result<()> {
        if !self.min_occupancy.is_finite() || self.min_occupancy <= 0.0 {
            return Err(Error::InvalidOccupancy {
                occupancy: self.min_occupancy,
            });
        }
        if self.max_bins == Some(0) {
            return Err(Error::InvalidBinLimit);
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(adaptive_core::Error::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(adaptive_core::Error::from)?;
        Self::from_json_str(&json)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self).map_err(adaptive_core::Error::from)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_pattern() {
        let config = PartitionConfig::new(1.0).min_occupancy(5.0).max_bins(8);
        assert_eq!(config.occupancy(), 5.0);
        assert_eq!(config.bin_limit(), Some(8));
        assert_eq!(config.split_threshold(), 10.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        assert!(matches!(
            PartitionConfig::new(0.0).validate(),
            Err(Error::InvalidOccupancy { .. })
        ));
        assert!(PartitionConfig::new(-1.0).validate().is_err());
        assert!(PartitionConfig::new(f64::NAN).validate().is_err());
        assert!(matches!(
            PartitionConfig::new(1.0).max_bins(0).validate(),
            Err(Error::InvalidBinLimit)
        ));
    }

    #[test]
    fn test_json_round_trip() {
        let config = PartitionConfig::new(2.5);
        let json = config.to_json().unwrap();
        assert_eq!(PartitionConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_json_defaults_and_errors() {
        let config = PartitionConfig::from_json_str(r#"{ "min_occupancy": 4 }"#).unwrap();
        assert_eq!(config.bin_limit(), None);

        let err = PartitionConfig::from_json_str(r#"{ "min_occupancy": -4 }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidOccupancy { .. }));

        let err = PartitionConfig::from_json_str(r#"{ "min_occupancy": 4, "bins": 3 }"#).unwrap_err();
        assert!(matches!(err, Error::Core(adaptive_core::Error::Json(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = PartitionConfig::from_json_file("/nonexistent/partition.json").unwrap_err();
        assert!(matches!(err, Error::Core(adaptive_core::Error::Io(_))));
    }
}
