//! Two-dimensional occupancy-driven partitioning
//!
//! Each pending bin owns its observations twice: once ordered by x and once
//! ordered by y. Splitting along one axis cuts that order in two at the
//! weighted median and stably partitions the other order by membership, so
//! neither order is ever sorted again below the root.

use crate::bins::Bin2D;
use crate::config::PartitionConfig;
use crate::error::{Error, Result};
use crate::region::{Axis, Rect};
use crate::split::{adjusted_cut, median_cut, Cut, PendingQueue, Split, SplitRecord};
use crate::tiling::Tiling2D;
use adaptive_core::{
    utils::{argsort, weighted_median},
    Sample2D,
};
use tracing::{debug, instrument, trace};

/// Observation indices of one bin in both axis orders
#[derive(Debug, Clone, Default)]
struct Cell {
    by_x: Vec<usize>,
    by_y: Vec<usize>,
}

impl Cell {
    fn order(&self, axis: Axis) -> &[usize] {
        match axis {
            Axis::X => &self.by_x,
            Axis::Y => &self.by_y,
        }
    }

    /// Split into the first `k` observations along `axis` and the rest
    ///
    /// `marks` must be all `false` on entry and is left that way.
    fn split(self, axis: Axis, k: usize, marks: &mut [bool]) -> (Cell, Cell) {
        let (mut primary, secondary) = match axis {
            Axis::X => (self.by_x, self.by_y),
            Axis::Y => (self.by_y, self.by_x),
        };
        let upper = primary.split_off(k);
        let lower = primary;

        for &i in &lower {
            marks[i] = true;
        }
        let (secondary_lower, secondary_upper): (Vec<usize>, Vec<usize>) =
            secondary.into_iter().partition(|&i| marks[i]);
        for &i in &lower {
            marks[i] = false;
        }

        match axis {
            Axis::X => (
                Cell {
                    by_x: lower,
                    by_y: secondary_lower,
                },
                Cell {
                    by_x: upper,
                    by_y: secondary_upper,
                },
            ),
            Axis::Y => (
                Cell {
                    by_x: secondary_lower,
                    by_y: lower,
                },
                Cell {
                    by_x: secondary_upper,
                    by_y: upper,
                },
            ),
        }
    }
}

#[derive(Debug, Clone)]
struct Node {
    rect: Rect,
    adjusted: Rect,
    cell: Cell,
    weight: f64,
    observed: Option<Rect>,
    split: Option<Split>,
}

/// Adaptive partition of a rectangle
///
/// Bins are split along the axis where their observations spread furthest,
/// at the weighted median, until every bin holds between `occupancy` and
/// twice that weight. Construction finishes inside [`Partition2D::new`].
///
/// # Example
///
/// ```rust
/// use adaptive_core::Sample2D;
/// use adaptive_partition::{Partition2D, PartitionConfig, Rect};
///
/// let (mut x, mut y) = (Vec::new(), Vec::new());
/// for i in 0..10 {
///     for j in 0..10 {
///         x.push(i as f64 + 0.5);
///         y.push(j as f64 + 0.5);
///     }
/// }
/// let sample = Sample2D::new(x, y).unwrap();
/// let bounds = Rect::new(0.0, 10.0, 0.0, 10.0);
/// let engine = Partition2D::new(&sample, bounds, PartitionConfig::new(25.0)).unwrap();
///
/// let structural = engine.structural_tiling();
/// assert_eq!(structural.len(), 4);
/// assert!(structural.bins().iter().all(|bin| bin.entries() == 25));
///
/// // The first cut sits on the observation at x = 5.5; its adjusted edge
/// // moves halfway back towards the column at x = 4.5
/// let first = engine.splits()[0];
/// assert_eq!((first.cut, first.adjusted), (5.5, 5.0));
/// ```
#[derive(Debug, Clone)]
pub struct Partition2D {
    sample: Sample2D,
    config: PartitionConfig,
    bounds: Rect,
    nodes: Vec<Node>,
    leaves: Vec<usize>,
    leaf_slot: Vec<Option<usize>>,
    split_log: Vec<usize>,
    structural: Tiling2D,
}

impl Partition2D {
    /// Partition `bounds` so that every bin holds at least
    /// `config.occupancy()` weight.
    #[instrument(
        skip_all,
        fields(entries = sample.len(), bounds = %bounds, occupancy = config.occupancy())
    )]
    pub fn new(sample: &Sample2D, bounds: Rect, config: PartitionConfig) -> Result<Self> {
        config.validate()?;
        Error::check_rect(&bounds)?;
        if sample.is_empty() {
            return Err(Error::EmptySample);
        }

        let inside = |i: &usize| {
            let (x, y) = sample.point(*i);
            bounds.contains_closed(x, y)
        };
        let cell = Cell {
            by_x: argsort(sample.x()).into_iter().filter(inside).collect(),
            by_y: argsort(sample.y()).into_iter().filter(inside).collect(),
        };

        let mut engine = Self {
            sample: sample.clone(),
            config,
            bounds,
            nodes: Vec::new(),
            leaves: Vec::new(),
            leaf_slot: Vec::new(),
            split_log: Vec::new(),
            structural: Tiling2D::new(Vec::new(), bounds),
        };
        engine.construct(cell);
        Ok(engine)
    }

    /// Partition the bounding box of the sample
    ///
    /// An axis on which every observation shares one coordinate is widened
    /// by 0.5 on each side.
    pub fn from_data_range(sample: &Sample2D, config: PartitionConfig) -> Result<Self> {
        let (x_min, x_max) = sample.x_range().ok_or(Error::EmptySample)?;
        let (y_min, y_max) = sample.y_range().ok_or(Error::EmptySample)?;
        let pad = |min: f64, max: f64| if min < max { (min, max) } else { (min - 0.5, max + 0.5) };
        let (x_min, x_max) = pad(x_min, x_max);
        let (y_min, y_max) = pad(y_min, y_max);
        Self::new(sample, Rect::new(x_min, x_max, y_min, y_max), config)
    }

    fn construct(&mut self, cell: Cell) {
        let in_range = cell.by_x.len();
        let total = cell.by_x.iter().map(|&i| self.sample.weight(i)).sum();
        let root = self.push_node(self.bounds, cell, total);
        if total < self.config.occupancy() {
            debug!(total, "total occupancy below target, emitting a single bin");
        }

        let mut marks = vec![false; self.sample.len()];
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
            if let Some((left, right)) = self.split(id, &mut marks) {
                bins += 1;
                pending.push(left, self.nodes[left].weight);
                pending.push(right, self.nodes[right].weight);
            }
        }

        self.collect_leaves(root);
        self.adjust(root);
        self.structural = self.structural_from_leaves();

        let outside = self.sample.len() - in_range;
        if outside > 0 {
            debug!(outside, "observations outside bounds ignored");
        }
        debug!(bins = self.leaves.len(), splits = self.split_log.len(), "partition complete");
    }

    fn push_node(&mut self, rect: Rect, cell: Cell, weight: f64) -> usize {
        let observed = match (
            cell.by_x.first(),
            cell.by_x.last(),
            cell.by_y.first(),
            cell.by_y.last(),
        ) {
            (Some(&left), Some(&right), Some(&bottom), Some(&top)) => Some(Rect::new(
                self.sample.x()[left],
                self.sample.x()[right],
                self.sample.y()[bottom],
                self.sample.y()[top],
            )),
            _ => None,
        };
        self.nodes.push(Node {
            rect,
            adjusted: rect,
            cell,
            weight,
            observed,
            split: None,
        });
        self.nodes.len() - 1
    }

    fn coords(&self, axis: Axis) -> &[f64] {
        match axis {
            Axis::X => self.sample.x(),
            Axis::Y => self.sample.y(),
        }
    }

    /// Wider axis first, the other one if that cannot be cut
    fn choose_cut(&self, id: usize) -> Option<(Axis, Cut)> {
        let node = &self.nodes[id];
        let observed = node.observed?;
        let preferred = if observed.height() > observed.width() {
            Axis::Y
        } else {
            Axis::X
        };

        [preferred, preferred.other()].into_iter().find_map(|axis| {
            if observed.interval(axis).width() <= 0.0 {
                return None;
            }
            let coords = self.coords(axis);
            median_cut(
                node.cell.order(axis),
                |i| coords[i],
                |i| self.sample.weight(i),
                node.weight,
                self.config.occupancy(),
            )
            .map(|cut| (axis, cut))
        })
    }

    fn split(&mut self, id: usize, marks: &mut [bool]) -> Option<(usize, usize)> {
        let (axis, Cut { at, lower, upper }) = self.choose_cut(id)?;
        let cell = std::mem::take(&mut self.nodes[id].cell);
        let cut = self.coords(axis)[cell.order(axis)[at]];
        let (lower_rect, upper_rect) = self.nodes[id].rect.split(axis, cut);
        let (lower_cell, upper_cell) = cell.split(axis, at, marks);

        let left = self.push_node(lower_rect, lower_cell, lower);
        let right = self.push_node(upper_rect, upper_cell, upper);
        self.nodes[id].split = Some(Split {
            axis,
            cut,
            adjusted: cut,
            left,
            right,
        });
        self.split_log.push(id);
        trace!(
            node = id,
            ?axis,
            cut,
            left_weight = self.nodes[left].weight,
            right_weight = self.nodes[right].weight,
            "split bin"
        );
        Some((left, right))
    }

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

    /// Place every split line halfway between the observed extrema of its
    /// two sides, then carve the adjusted rectangles top-down.
    ///
    /// One line serves every bin pair that meets along it, so the adjusted
    /// bins still tile the bounds.
    fn adjust(&mut self, root: usize) {
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            let Some(mut split) = self.nodes[id].split else {
                continue;
            };
            if let (Some(lower), Some(upper)) =
                (self.nodes[split.left].observed, self.nodes[split.right].observed)
            {
                split.adjusted = adjusted_cut(
                    lower.interval(split.axis).max,
                    upper.interval(split.axis).min,
                );
            }
            let (lower, upper) = self.nodes[id].adjusted.split(split.axis, split.adjusted);
            self.nodes[id].split = Some(split);
            self.nodes[split.left].adjusted = lower;
            self.nodes[split.right].adjusted = upper;
            stack.push(split.right);
            stack.push(split.left);
        }
    }

    fn structural_from_leaves(&self) -> Tiling2D {
        let (xs, ys) = (self.sample.x(), self.sample.y());
        let bins = self
            .leaves
            .iter()
            .map(|&id| {
                let node = &self.nodes[id];
                let mut bin = Bin2D::empty(node.rect);
                for &i in &node.cell.by_x {
                    bin.record(xs[i], ys[i], self.sample.weight(i));
                }
                bin.settle_weight(node.weight);
                let weight = |i: usize| self.sample.weight(i);
                bin.set_medians(
                    weighted_median(node.cell.by_x.iter().map(|&i| (xs[i], weight(i)))),
                    weighted_median(node.cell.by_y.iter().map(|&i| (ys[i], weight(i)))),
                );
                bin
            })
            .collect();
        let mut tiling = Tiling2D::new(bins, self.bounds);
        for (x, y, w) in self.sample.iter() {
            if !self.bounds.contains_closed(x, y) {
                tiling.record_outside(w);
            }
        }
        tiling
    }

    /// The median-cut tiling, filled with the construction sample
    ///
    /// Bins carry the weighted medians of their observations along each axis.
    pub fn structural_tiling(&self) -> Tiling2D {
        self.structural.clone()
    }

    /// The boundary-corrected tiling, with empty bins
    pub fn adjusted_tiling(&self) -> Tiling2D {
        let bins = self
            .leaves
            .iter()
            .map(|&id| Bin2D::empty(self.nodes[id].adjusted))
            .collect();
        Tiling2D::new(bins, self.bounds)
    }

    /// The boundary-corrected tiling, filled by re-binning the construction sample
    pub fn adjusted_filled(&self) -> Tiling2D {
        self.fill_adjusted(self.sample.iter())
    }

    /// The boundary-corrected tiling, filled with a different sample
    pub fn adjusted_filled_with(&self, sample: &Sample2D) -> Tiling2D {
        self.fill_adjusted(sample.iter())
    }

    /// The boundary-corrected tiling, filled from `(x, y, weight)` tuples
    pub fn fill_adjusted<I>(&self, observations: I) -> Tiling2D
    where
        I: IntoIterator<Item = (f64, f64, f64)>,
    {
        let mut tiling = self.adjusted_tiling();
        for (x, y, w) in observations {
            match self.locate(x, y) {
                Some(index) => tiling.record(index, x, y, w),
                None => tiling.record_outside(w),
            }
        }
        tiling
    }

    /// Index of the adjusted bin containing `(x, y)`
    pub fn locate(&self, x: f64, y: f64) -> Option<usize> {
        if !self.bounds.contains_closed(x, y) {
            return None;
        }
        let mut id = 0;
        while let Some(split) = self.nodes[id].split {
            let coord = match split.axis {
                Axis::X => x,
                Axis::Y => y,
            };
            id = if coord < split.adjusted {
                split.left
            } else {
                split.right
            };
        }
        self.leaf_slot[id]
    }

    /// Indices (into the construction sample) of the observations in bin
    /// `index`, sorted by x
    pub fn points_in(&self, index: usize) -> Option<&[usize]> {
        let node = &self.nodes[*self.leaves.get(index)?];
        Some(&node.cell.by_x)
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

    /// Longest path from the bounding rectangle to a bin
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

    /// The partitioned rectangle
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// The configuration used for construction
    pub fn config(&self) -> &PartitionConfig {
        &self.config
    }

    /// The engine's copy of the construction sample
    pub fn sample(&self) -> &Sample2D {
        &self.sample
    }
}
