//! Adaptive histogram builders
//!
//! Both builders run a partition engine over the sample and copy one of its
//! tilings into a histogram. By default that is the adjusted-and-filled
//! tiling, whose edges sit between observations rather than on them.

use crate::histogram2d::Histogram2D;
use crate::traits::HistogramBuilder;
use crate::types::Histogram;
use adaptive_core::{Numeric, Sample1D, Sample2D};
use adaptive_partition::{Partition1D, Partition2D, PartitionConfig, Rect, Result};
use tracing::debug;

/// Variable-width histogram builder
///
/// Bins hold at least `min_occupancy` weight and are split while they hold
/// twice that.
#[derive(Debug, Clone)]
pub struct AdaptiveBuilder {
    config: PartitionConfig,
    bounds: Option<(f64, f64)>,
    adjusted: bool,
}

impl AdaptiveBuilder {
    /// Create a new adaptive histogram builder
    pub fn new(min_occupancy: f64) -> Self {
        Self::with_config(PartitionConfig::new(min_occupancy))
    }

    /// Create a builder from a full partition configuration
    pub fn with_config(config: PartitionConfig) -> Self {
        Self {
            config,
            bounds: None,
            adjusted: true,
        }
    }

    /// Caps the number of bins
    pub fn max_bins(mut self, max_bins: usize) -> Self {
        self.config = self.config.max_bins(max_bins);
        self
    }

    /// Fixes the histogram range; by default it is the range of the data
    pub fn bounds(mut self, lower: f64, upper: f64) -> Self {
        self.bounds = Some((lower, upper));
        self
    }

    /// Chooses between adjusted edges (the default) and structural edges
    /// placed on observations
    pub fn adjusted(mut self, adjusted: bool) -> Self {
        self.adjusted = adjusted;
        self
    }

    /// Build the partition engine without converting it to a histogram
    pub fn partition(&self, sample: &Sample1D) -> Result<Partition1D> {
        match self.bounds {
            Some((lower, upper)) => Partition1D::new(sample, lower, upper, self.config.clone()),
            None => Partition1D::from_data_range(sample, self.config.clone()),
        }
    }
}

impl HistogramBuilder<Sample1D> for AdaptiveBuilder {
    type Output = Histogram;

    fn build(&self, sample: &Sample1D) -> Result<Histogram> {
        let engine = self.partition(sample)?;
        let tiling = if self.adjusted {
            engine.adjusted_filled()
        } else {
            engine.structural_tiling()
        };

        let mut histogram: Histogram = tiling.to_histogram();
        histogram.set_outside(tiling.outside());
        debug!(bins = histogram.len(), adjusted = self.adjusted, "built adaptive histogram");
        Ok(histogram)
    }

    fn target_occupancy(&self) -> Option<f64> {
        Some(self.config.occupancy())
    }

    fn supports_weighted_samples(&self) -> bool {
        true
    }
}

impl<T: Numeric> HistogramBuilder<[T]> for AdaptiveBuilder {
    type Output = Histogram;

    fn build(&self, sample: &[T]) -> Result<Histogram> {
        HistogramBuilder::<Sample1D>::build(self, &Sample1D::from_numeric(sample)?)
    }

    fn target_occupancy(&self) -> Option<f64> {
        Some(self.config.occupancy())
    }
}

/// Two-dimensional adaptive histogram builder
#[derive(Debug, Clone)]
pub struct AdaptiveBuilder2D {
    config: PartitionConfig,
    bounds: Option<Rect>,
    adjusted: bool,
}

impl AdaptiveBuilder2D {
    /// Create a new 2-D adaptive histogram builder
    pub fn new(min_occupancy: f64) -> Self {
        Self::with_config(PartitionConfig::new(min_occupancy))
    }

    /// Create a builder from a full partition configuration
    pub fn with_config(config: PartitionConfig) -> Self {
        Self {
            config,
            bounds: None,
            adjusted: true,
        }
    }

    /// Caps the number of cells
    pub fn max_bins(mut self, max_bins: usize) -> Self {
        self.config = self.config.max_bins(max_bins);
        self
    }

    /// Fixes the histogram rectangle; by default it is the bounding box of the data
    pub fn bounds(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Chooses between adjusted edges (the default) and structural edges
    pub fn adjusted(mut self, adjusted: bool) -> Self {
        self.adjusted = adjusted;
        self
    }

    /// Build the partition engine without converting it to a histogram
    pub fn partition(&self, sample: &Sample2D) -> Result<Partition2D> {
        match self.bounds {
            Some(bounds) => Partition2D::new(sample, bounds, self.config.clone()),
            None => Partition2D::from_data_range(sample, self.config.clone()),
        }
    }

    /// Build from separate coordinate columns
    pub fn build_xy<X: Numeric, Y: Numeric>(&self, x: &[X], y: &[Y]) -> Result<Histogram2D> {
        self.build(&Sample2D::from_numeric(x, y)?)
    }
}

impl HistogramBuilder<Sample2D> for AdaptiveBuilder2D {
    type Output = Histogram2D;

    fn build(&self, sample: &Sample2D) -> Result<Histogram2D> {
        let engine = self.partition(sample)?;
        let tiling = if self.adjusted {
            engine.adjusted_filled()
        } else {
            engine.structural_tiling()
        };

        let mut histogram: Histogram2D = tiling.to_histogram();
        histogram.set_outside(tiling.outside());
        debug!(cells = histogram.len(), adjusted = self.adjusted, "built adaptive 2-D histogram");
        Ok(histogram)
    }

    fn target_occupancy(&self) -> Option<f64> {
        Some(self.config.occupancy())
    }

    fn supports_weighted_samples(&self) -> bool {
        true
    }
}
