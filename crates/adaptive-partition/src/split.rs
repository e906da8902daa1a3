//! Splitting primitives shared by the 1-D and 2-D engines

use crate::region::Axis;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// A split recorded in an engine's arena
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Split {
    pub axis: Axis,
    pub cut: f64,
    pub adjusted: f64,
    pub left: usize,
    pub right: usize,
}

impl Split {
    pub(crate) fn record(&self) -> SplitRecord {
        SplitRecord {
            axis: self.axis,
            cut: self.cut,
            adjusted: self.adjusted,
        }
    }
}

/// One split performed during construction, in the order it happened
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplitRecord {
    /// Axis the bin was divided along
    pub axis: Axis,
    /// Structural cut: coordinate of the first observation on the upper side
    pub cut: f64,
    /// Adjusted cut: midpoint between the observed extrema on either side
    pub adjusted: f64,
}

/// Arena nodes waiting to be considered for a split, heaviest first
///
/// Equal weights pop in creation order.
#[derive(Debug, Default)]
pub(crate) struct PendingQueue {
    heap: BinaryHeap<(OrderedFloat<f64>, Reverse<usize>)>,
}

impl PendingQueue {
    pub(crate) fn push(&mut self, node: usize, weight: f64) {
        self.heap.push((OrderedFloat(weight), Reverse(node)));
    }

    pub(crate) fn pop(&mut self) -> Option<usize> {
        self.heap.pop().map(|(_, Reverse(node))| node)
    }
}

/// A weighted median cut of a slice of sorted indices
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Cut {
    /// Number of observations below the cut
    pub at: usize,
    /// Weight below the cut, summed in order
    pub lower: f64,
    /// Weight at or above the cut, `total - lower`
    pub upper: f64,
}

/// Weighted median cut of a slice of sorted indices
///
/// `order` lists observation indices sorted ascending by `coord` and `total`
/// is the weight they carry. The cut leaves at least `min_side` weight on
/// each side, the coordinates on either side of it differ, and the lower
/// side's weight is as close as possible to half the total. Ties go to the
/// lower cut. Returns `None` when no such cut exists, e.g. when every
/// observation shares one coordinate.
///
/// The side weights in the returned [`Cut`] are the values the `min_side`
/// test was applied to. Children must take them as their occupancy.
pub(crate) fn median_cut<C, W>(
    order: &[usize],
    coord: C,
    weight: W,
    total: f64,
    min_side: f64,
) -> Option<Cut>
where
    C: Fn(usize) -> f64,
    W: Fn(usize) -> f64,
{
    let half = total / 2.0;

    let mut lower = 0.0;
    let mut best: Option<(Cut, f64)> = None;
    for k in 1..order.len() {
        lower += weight(order[k - 1]);
        let upper = total - lower;
        if upper < min_side {
            break;
        }
        if lower < min_side || coord(order[k - 1]) >= coord(order[k]) {
            continue;
        }

        let distance = (lower - half).abs();
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((Cut { at: k, lower, upper }, distance));
        }
        if lower >= half {
            break;
        }
    }
    best.map(|(cut, _)| cut)
}

/// Boundary between two neighbouring groups of observations
///
/// Midpoint of the highest coordinate below the cut and the lowest one above
/// it, nudged so that the lower group stays strictly below the boundary and
/// the upper group at or above it.
pub(crate) fn adjusted_cut(lower_high: f64, upper_low: f64) -> f64 {
    let mid = (lower_high + (upper_low - lower_high) / 2.0).min(upper_low);
    if mid > lower_high {
        mid
    } else {
        upper_low
    }
}
