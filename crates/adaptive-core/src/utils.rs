//! Utility functions for working with data slices

use std::cmp::Ordering;

/// Indices that would sort `data` ascending
///
/// The sort is stable: equal values keep their array order, which is what
/// makes median ties deterministic downstream. Expects finite values, as
/// every validated sample holds.
///
/// # Examples
///
/// ```rust
/// use adaptive_core::utils::argsort;
///
/// let data = [2.0, 1.0, 2.0, 0.5];
/// assert_eq!(argsort(&data), vec![3, 1, 0, 2]);
/// ```
pub fn argsort(data: &[f64]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..data.len()).collect();
    order.sort_by(|&a, &b| data[a].partial_cmp(&data[b]).unwrap_or(Ordering::Equal));
    order
}

/// Weighted median of values visited in ascending order
///
/// Walks `(value, weight)` pairs, which must already be sorted by value, and
/// returns the first value at which the accumulated weight reaches half of
/// the total. Returns `None` when there are no pairs or the total weight is
/// zero.
///
/// # Examples
///
/// ```rust
/// use adaptive_core::utils::weighted_median;
///
/// let pairs = [(1.0, 1.0), (2.0, 1.0), (3.0, 4.0)];
/// assert_eq!(weighted_median(pairs.iter().copied()), Some(3.0));
/// ```
pub fn weighted_median<I>(pairs: I) -> Option<f64>
where
    I: IntoIterator<Item = (f64, f64)>,
    I::IntoIter: Clone,
{
    let pairs = pairs.into_iter();
    let total: f64 = pairs.clone().map(|(_, w)| w).sum();
    if total <= 0.0 {
        return None;
    }

    let half = total / 2.0;
    let mut accumulated = 0.0;
    let mut last = None;
    for (value, weight) in pairs {
        accumulated += weight;
        last = Some(value);
        if accumulated >= half {
            return Some(value);
        }
    }
    // Rounding can leave the running sum a hair short of `half`
    last
}

/// Sum of a weight slice, treating a missing slice as unit weights
pub fn total_weight(weights: Option<&[f64]>, len: usize) -> f64 {
    match weights {
        Some(w) => w.iter().sum(),
        None => len as f64,
    }
}
