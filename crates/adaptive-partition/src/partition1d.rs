//! One-dimensional occupancy-driven partitioning
//!
//! Observations are sorted once. Every bin is a contiguous run of that
//! order, so splitting a bin never re-sorts anything: the weighted median is
//! found by walking the run, and the two children are its two halves.

use crate::bins::Bin1D;
use crate::config::PartitionConfig;
use crate::error::{Error, Result};
use crate::region::{Axis, Interval};
use crate::split::{adjusted_cut, median_cut, Cut, PendingQueue, Split, SplitRecord};
use crate::tiling::Tiling1D;
use adaptive_core::{utils::argsort, Sample1D};
use tracing::{debug, instrument, trace};

#[derive(Debug, Clone)]
struct Node {
    interval: Interval,
    adjusted: Interval,
    start: usize,
    end: usize,
    weight: f64,
    observed: Option<Interval>,
    split: Option<Split>,
}

/// Adaptive partition of an interval
///
/// Construction runs to completion inside [`Partition1D::new`]; afterwards
/// the engine is immutable and every query returns an independent copy.
///
/// # Example
///
/// ```rust
/// use adaptive_core::Sample1D;
/// use adaptive_partition::{Partition1D, PartitionConfig};
///
/// let sample = Sample1D::new((0..8).map(|i| i as f64).collect()).unwrap();
/// let engine = Partition1D::new(&sample, 0.0, 8.0, PartitionConfig::new(2.0)).unwrap();
///
/// let tiling = engine.structural_tiling();
/// assert_eq!(tiling.edges(), vec![0.0, 2.0, 4.0, 6.0, 8.0]);
/// assert!(tiling.bins().iter().all(|bin| bin.entries() == 2));
///
/// // Adjusted edges sit halfway between neighbouring observations
/// assert_eq!(engine.adjusted_tiling().edges(), vec![0.0, 1.5, 3.5, 5.5, 8.0]);
/// ```
#[derive(Debug, Clone)]
pub struct Partition1D {
    sample: Sample1D,
    config: PartitionConfig,
    bounds: Interval,
    /// In-range observation indices sorted by coordinate
    order: Vec<usize>,
    nodes: Vec<Node>,
    leaves: Vec<usize>,
    leaf_slot: Vec<Option<usize>>,
    split_log: Vec<usize>,
    structural: Tiling1D,
}

impl Partition1D {
    /// Partition `[lower, upper]` so that every bin holds at least
    /// `config.occupancy()` weight.
    ///
    /// Observations outside the bounds take no part in the partition and are
    /// reported through [`Tiling1D::outside`].
    #[instrument(
        skip_all,
        fields(entries = sample.len(), lower = lower, upper = upper, occupancy = config.occupancy())
    )]
    pub fn new(sample: &Sample1D, lower: f64, upper: f64, config: PartitionConfig) -> Result<Self> {
        config.validate()?;
        Error::check_bounds(lower, upper)?;
        if sample.is_empty() {
            return Err(Error::EmptySample);
        }

        let bounds = Interval::new(lower, upper);
        let order: Vec<usize> = argsort(sample.values())
            .into_iter()
            .filter(|&i| bounds.contains_closed(sample.value(i)))
            .collect();

        let mut engine = Self {
            sample: sample.clone(),
            config,
            bounds,
            order,
            nodes: Vec::new(),
            leaves: Vec::new(),
            leaf_slot: Vec::new(),
            split_log: Vec::new(),
            structural: Tiling1D::new(Vec::new(), bounds),
        };
        engine.construct();
        Ok(engine)
    }

    /// Partition the sample's own range `[min, max]`
    ///
    /// A sample whose observations share a single coordinate gets the range
    /// widened by 0.5 on each side.
    pub fn from_data_range(sample: &Sample1D, config: PartitionConfig) -> Result<Self> {
        let (lower, upper) = sample.range().ok_or(Error::EmptySample)?;
        if lower < upper {
            Self::new(sample, lower, upper, config)
        } else {
            Self::new(sample, lower - 0.5, upper + 0.5, config)
        }
    }

    fn construct(&mut self) {
        let total = self.order.iter().map(|&i| self.sample.weight(i)).sum();
        let root = self.push_node(self.bounds, 0, self.order.len(), total);
        if total < self.config.occupancy() {
            debug!(total, "total occupancy below target, emitting a single bin");
        }

        let threshold = self.config.split_threshold();
        let mut pending = PendingQueue::default();
        pending.push(root, total);
        let mut bins = 1;
        while let Some(id) = pending.pop() {
            if self.config.bin_limit().is_some_and(|limit| bins >= limit) {
                debug!(bins, "bin limit reached");
                break;
            }
            if self.nodes[id].weight < threshold {
                continue;
            }
            if let Some((left, right)) = self.split(id) {
                bins += 1;
                pending.push(left, self.nodes[left].weight);
                pending.push(right, self.nodes[right].weight);
            }
        }

        self.collect_leaves(root);
        self.adjust(root);
        self.structural = self.structural_from_leaves();

        let outside = self.sample.len() - self.order.len();
        if outside > 0 {
            debug!(outside, "observations outside bounds ignored");
        }
        debug!(bins = self.leaves.len(), splits = self.split_log.len(), "partition complete");
    }

    fn push_node(&mut self, interval: Interval, start: usize, end: usize, weight: f64) -> usize {
        let run = &self.order[start..end];
        let observed = match (run.first(), run.last()) {
            (Some(&first), Some(&last)) => {
                Some(Interval::new(self.sample.value(first), self.sample.value(last)))
            }
            _ => None,
        };
        self.nodes.push(Node {
            interval,
            adjusted: interval,
            start,
            end,
            weight,
            observed,
            split: None,
        });
        self.nodes.len() - 1
    }

    fn split(&mut self, id: usize) -> Option<(usize, usize)> {
        let Node {
            interval,
            start,
            end,
            weight,
            ..
        } = self.nodes[id];
        let values = self.sample.values();
        let Cut {
            at,
            lower: lower_weight,
            upper: upper_weight,
        } = median_cut(
            &self.order[start..end],
            |i| values[i],
            |i| self.sample.weight(i),
            weight,
            self.config.occupancy(),
        )?;

        let at = start + at;
        let cut = values[self.order[at]];
        let (lower, upper) = interval.split(cut);
        let left = self.push_node(lower, start, at, lower_weight);
        let right = self.push_node(upper, at, end, upper_weight);
        self.nodes[id].split = Some(Split {
            axis: Axis::X,
            cut,
            adjusted: cut,
            left,
            right,
        });
        self.split_log.push(id);
        trace!(
            node = id,
            cut,
            left_weight = self.nodes[left].weight,
            right_weight = self.nodes[right].weight,
            "split bin"
        );
        Some((left, right))
    }

    /// Depth-first, lower half first: leaves come out ascending by `min`.
    fn collect_leaves(&mut self, root: usize) {
        self.leaf_slot = vec![None; self.nodes.len()];
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            match self.nodes[id].split {
                Some(split) => {
                    stack.push(split.right);
                    stack.push(split.left);
                }
                None => {
                    self.leaf_slot[id] = Some(self.leaves.len());
                    self.leaves.push(id);
                }
            }
        }
    }

    /// Move every cut to the midpoint between the observations on either
    /// side of it, then push the corrected edges down the tree.
    fn adjust(&mut self, root: usize) {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(mut split) = self.nodes[id].split else {
                continue;
            };
            if let (Some(lower), Some(upper)) =
                (self.nodes[split.left].observed, self.nodes[split.right].observed)
            {
                split.adjusted = adjusted_cut(lower.max, upper.min);
            }
            let (lower, upper) = self.nodes[id].adjusted.split(split.adjusted);
            self.nodes[id].split = Some(split);
            self.nodes[split.left].adjusted = lower;
            self.nodes[split.right].adjusted = upper;
            stack.push(split.right);
            stack.push(split.left);
        }
    }

    fn structural_from_leaves(&self) -> Tiling1D {
        let bins = self
            .leaves
            .iter()
            .map(|&id| {
                let node = &self.nodes[id];
                let mut bin = Bin1D::empty(node.interval);
                for &i in &self.order[node.start..node.end] {
                    bin.record(self.sample.value(i), self.sample.weight(i));
                }
                bin.settle_weight(node.weight);
                bin
            })
            .collect();
        let mut tiling = Tiling1D::new(bins, self.bounds);
        for (x, w) in self.sample.iter() {
            if !self.bounds.contains_closed(x) {
                tiling.record_outside(w);
            }
        }
        tiling
    }

    /// The median-cut tiling, filled with the construction sample
    pub fn structural_tiling(&self) -> Tiling1D {
        self.structural.clone()
    }

    /// The boundary-corrected tiling, with empty bins
    pub fn adjusted_tiling(&self) -> Tiling1D {
        let bins = self
            .leaves
            .iter()
            .map(|&id| Bin1D::empty(self.nodes[id].adjusted))
            .collect();
        Tiling1D::new(bins, self.bounds)
    }

    /// The boundary-corrected tiling, filled by re-binning the construction sample
    pub fn adjusted_filled(&self) -> Tiling1D {
        self.fill_adjusted(self.sample.iter())
    }

    /// The boundary-corrected tiling, filled with a different sample
    pub fn adjusted_filled_with(&self, sample: &Sample1D) -> Tiling1D {
        self.fill_adjusted(sample.iter())
    }

    /// The boundary-corrected tiling, filled from a stream of `(x, weight)` tuples
    pub fn fill_adjusted<I>(&self, observations: I) -> Tiling1D
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        let mut tiling = self.adjusted_tiling();
        for (x, w) in observations {
            match self.locate(x) {
                Some(index) => tiling.record(index, x, w),
                None => tiling.record_outside(w),
            }
        }
        tiling
    }

    /// Index of the adjusted bin containing `x`
    ///
    /// Descends the split tree, so it costs one comparison per level.
    pub fn locate(&self, x: f64) -> Option<usize> {
        if !self.bounds.contains_closed(x) {
            return None;
        }
        let mut id = 0;
        while let Some(split) = self.nodes[id].split {
            id = if x < split.adjusted { split.left } else { split.right };
        }
        self.leaf_slot[id]
    }

    /// Indices (into the construction sample) of the observations in bin
    /// `index`, sorted by coordinate
    pub fn points_in(&self, index: usize) -> Option<&[usize]> {
        let node = &self.nodes[*self.leaves.get(index)?];
        Some(&self.order[node.start..node.end])
    }

    /// Splits in the order they were performed
    pub fn splits(&self) -> Vec<SplitRecord> {
        self.split_log
            .iter()
            .filter_map(|&id| self.nodes[id].split.map(|split| split.record()))
            .collect()
    }

    /// Number of bins
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// Always false: a constructed engine has at least one bin
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Longest path from the whole range to a bin
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(0, 0)];
        while let Some((id, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            if let Some(split) = self.nodes[id].split {
                stack.push((split.left, depth + 1));
                stack.push((split.right, depth + 1));
            }
        }
        deepest
    }

    /// The partitioned interval
    pub fn bounds(&self) -> Interval {
        self.bounds
    }

    /// The configuration used for construction
    pub fn config(&self) -> &PartitionConfig {
        &self.config
    }

    /// The engine's copy of the construction sample
    pub fn sample(&self) -> &Sample1D {
        &self.sample
    }
}
