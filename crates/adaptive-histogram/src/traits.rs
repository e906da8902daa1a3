//! Core traits for histogram building

use adaptive_partition::Result;

/// Trait for building histograms from sample data
///
/// `S` is the input: a slice of numbers, a `Sample1D` or a `Sample2D`.
pub trait HistogramBuilder<S: ?Sized> {
    /// The histogram type produced
    type Output;

    /// Build a histogram from the given sample
    fn build(&self, sample: &S) -> Result<Self::Output>;

    /// Get the minimum occupancy per bin (if the builder has one)
    fn target_occupancy(&self) -> Option<f64> {
        None
    }

    /// Check if this builder supports weighted samples
    fn supports_weighted_samples(&self) -> bool {
        false
    }
}
