//! Collaborator traits

/// A histogram that can be laid out from the regions of a tiling
///
/// Implementors receive the ordered list of regions once, then either the
/// per-bin contents computed by the partition or individual fills routed by
/// coordinate lookup.
pub trait HistogramAdapter: Sized {
    /// Region type of one bin (an interval or a rectangle)
    type Region;

    /// Coordinate type accepted by [`HistogramAdapter::fill`]
    type Point;

    /// Lay out an empty histogram with one bin per region, in order
    fn from_regions(regions: Vec<Self::Region>) -> Self;

    /// Overwrite the contents of bin `index`
    fn set_content(&mut self, index: usize, entries: usize, weight: f64);

    /// Find the bin containing `point` and add `weight` to it
    ///
    /// Returns the bin index, or `None` when no bin contains the point.
    fn fill(&mut self, point: Self::Point, weight: f64) -> Option<usize>;
}
