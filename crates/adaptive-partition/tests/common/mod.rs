//! Shared utilities for partition integration tests

#![allow(dead_code)]

use adaptive_core::{Sample1D, Sample2D};
use adaptive_partition::{Rect, Tiling1D, Tiling2D};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub const EPSILON: f64 = 1e-9;

/// Seeded uniform sample on `[lower, upper)`
pub fn uniform_sample(n: usize, lower: f64, upper: f64, seed: u64) -> Sample1D {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let values = (0..n).map(|_| rng.gen_range(lower..upper)).collect();
    Sample1D::new(values).unwrap()
}

/// Seeded sample concentrated towards `lower`: the square of a uniform draw
pub fn skewed_sample(n: usize, lower: f64, upper: f64, seed: u64) -> Sample1D {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let values = (0..n)
        .map(|_| {
            let u: f64 = rng.gen();
            lower + (upper - lower) * u * u
        })
        .collect();
    Sample1D::new(values).unwrap()
}

/// Seeded weighted sample with weights in `[0.5, 2.0)`
pub fn weighted_sample(n: usize, lower: f64, upper: f64, seed: u64) -> Sample1D {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let values = (0..n).map(|_| rng.gen_range(lower..upper)).collect();
    let weights = (0..n).map(|_| rng.gen_range(0.5..2.0)).collect();
    Sample1D::weighted(values, weights).unwrap()
}

/// Seeded sample of two overlapping clusters inside `bounds`
pub fn clustered_sample_2d(n: usize, bounds: Rect, seed: u64) -> Sample2D {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let (cx, cy) = bounds.center();
    let mut x = Vec::with_capacity(n);
    let mut y = Vec::with_capacity(n);
    for i in 0..n {
        let (mx, my, spread) = if i % 3 == 0 {
            (cx, cy, 0.5)
        } else {
            (bounds.x_min + bounds.width() * 0.25, bounds.y_min + bounds.height() * 0.75, 0.15)
        };
        let dx: f64 = rng.gen_range(-1.0..1.0) * spread * bounds.width() / 2.0;
        let dy: f64 = rng.gen_range(-1.0..1.0) * spread * bounds.height() / 2.0;
        x.push((mx + dx).clamp(bounds.x_min, bounds.x_max));
        y.push((my + dy).clamp(bounds.y_min, bounds.y_max));
    }
    Sample2D::new(x, y).unwrap()
}

/// Regular `n x n` grid of cell centres on `[0, n]^2`
pub fn grid_sample(n: usize) -> Sample2D {
    let mut x = Vec::with_capacity(n * n);
    let mut y = Vec::with_capacity(n * n);
    for i in 0..n {
        for j in 0..n {
            x.push(i as f64 + 0.5);
            y.push(j as f64 + 0.5);
        }
    }
    Sample2D::new(x, y).unwrap()
}

/// Assert that 1-D bins are contiguous and span the bounds exactly
pub fn assert_contiguous(tiling: &Tiling1D) {
    let bins = tiling.bins();
    assert!(!bins.is_empty(), "tiling has no bins");
    assert_eq!(bins[0].min(), tiling.bounds().min, "first bin must start at the lower bound");
    assert_eq!(
        bins[bins.len() - 1].max(),
        tiling.bounds().max,
        "last bin must end at the upper bound"
    );
    for pair in bins.windows(2) {
        assert_eq!(pair[0].max(), pair[1].min(), "gap or overlap between {} and {}", pair[0], pair[1]);
        assert!(pair[0].min() <= pair[0].max());
    }
}

/// Assert that 2-D bins are pairwise disjoint and their areas add up to the
/// bounding rectangle
pub fn assert_tiles(tiling: &Tiling2D) {
    let bounds = tiling.bounds();
    let regions = tiling.regions();
    for (i, a) in regions.iter().enumerate() {
        assert!(a.x_min >= bounds.x_min && a.x_max <= bounds.x_max, "{a} leaves {bounds}");
        assert!(a.y_min >= bounds.y_min && a.y_max <= bounds.y_max, "{a} leaves {bounds}");
        assert!(a.x_min <= a.x_max && a.y_min <= a.y_max, "{a} is inverted");
        for b in &regions[i + 1..] {
            assert!(!a.overlaps(b), "{a} overlaps {b}");
        }
    }
    let area: f64 = regions.iter().map(Rect::area).sum();
    assert!(
        (area - bounds.area()).abs() <= EPSILON * bounds.area().max(1.0),
        "areas sum to {area}, bounds have {}",
        bounds.area()
    );
}
