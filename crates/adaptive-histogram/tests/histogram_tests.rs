//! End-to-end tests: samples through partitions into histograms

use adaptive_core::{Sample1D, Sample2D};
use adaptive_histogram::{
    adaptive_histogram, adaptive_histogram_2d, AdaptiveBuilder, AdaptiveBuilder2D, Histogram,
    Histogram2D, HistogramBuilder,
};
use adaptive_partition::{PartitionConfig, Rect};
use approx::assert_relative_eq;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_distr::Normal;

fn normal_data(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let normal = Normal::new(0.0, 1.0).unwrap();
    (0..n).map(|_| normal.sample(&mut rng)).collect()
}

#[test]
fn densities_integrate_to_one() {
    let histogram = adaptive_histogram(&normal_data(5_000, 1), 100.0).unwrap();
    let area: f64 = histogram
        .bins()
        .iter()
        .zip(histogram.densities())
        .map(|(bin, density)| bin.width() * density)
        .sum();
    assert_relative_eq!(area, 1.0, epsilon = 1e-9);
    assert_eq!(histogram.total_count(), 5_000);
}

#[test]
fn tails_get_wider_bins_than_centre() {
    let histogram = adaptive_histogram(&normal_data(5_000, 2), 100.0).unwrap();
    let widths: Vec<f64> = histogram.bins().iter().map(|bin| bin.width()).collect();
    let centre = histogram.find_bin(0.0).unwrap();
    assert!(widths[0] > widths[centre]);
    assert!(widths[widths.len() - 1] > widths[centre]);
    assert!(histogram.densities()[centre] > histogram.densities()[0]);
}

#[test]
fn weighted_sample_uses_weights() {
    // Two bins of equal weight: one heavy point versus four light ones
    let sample = Sample1D::weighted(vec![0.0, 1.0, 2.0, 3.0, 4.0], vec![4.0, 1.0, 1.0, 1.0, 1.0]).unwrap();
    let histogram = AdaptiveBuilder::new(4.0).build(&sample).unwrap();
    assert_eq!(histogram.counts(), vec![1, 4]);
    assert_eq!(histogram.weights(), vec![4.0, 4.0]);
    assert_eq!(histogram.frequencies(), vec![0.5, 0.5]);
    assert_eq!(histogram.edges(), vec![0.0, 0.5, 4.0]);
}

#[test]
fn config_reused_across_builders() {
    let config = PartitionConfig::new(50.0).max_bins(5);
    let histogram = AdaptiveBuilder::with_config(config.clone())
        .build(&normal_data(2_000, 3)[..])
        .unwrap();
    assert_eq!(histogram.len(), 5);

    let x = normal_data(2_000, 4);
    let y = normal_data(2_000, 5);
    let histogram = AdaptiveBuilder2D::with_config(config).build_xy(&x, &y).unwrap();
    assert_eq!(histogram.len(), 5);
}

#[test]
fn histogram_refill_matches_tiling_refill() {
    let sample = Sample1D::new(normal_data(1_000, 6)).unwrap();
    let engine = AdaptiveBuilder::new(50.0).partition(&sample).unwrap();

    let fresh = normal_data(1_000, 7);
    let tiling = engine.fill_adjusted(fresh.iter().map(|&v| (v, 1.0)));

    let mut histogram: Histogram = engine.adjusted_tiling().to_histogram();
    for &v in &fresh {
        histogram.fill(v, 1.0);
    }
    let expected: Vec<usize> = tiling.bins().iter().map(|bin| bin.entries()).collect();
    assert_eq!(histogram.counts(), expected);
    assert_eq!(histogram.outside().entries, tiling.outside().entries);
}

#[test]
fn two_dimensional_cells_cover_bounds() {
    let x = normal_data(3_000, 8);
    let y = normal_data(3_000, 9);
    let histogram = adaptive_histogram_2d(&x, &y, 60.0).unwrap();

    let area: f64 = histogram.cells().iter().map(|cell| cell.area()).sum();
    assert_relative_eq!(area, histogram.bounds().area(), max_relative = 1e-9);
    assert_eq!(histogram.total_count(), 3_000);
    assert!(histogram.cells().iter().all(|cell| cell.count >= 60));

    let integral: f64 = histogram
        .cells()
        .iter()
        .zip(histogram.densities())
        .map(|(cell, density)| cell.area() * density)
        .sum();
    assert_relative_eq!(integral, 1.0, epsilon = 1e-9);
}

#[test]
fn two_dimensional_fixed_bounds_report_outside() {
    let sample = Sample2D::new(normal_data(1_000, 10), normal_data(1_000, 11)).unwrap();
    let histogram: Histogram2D = AdaptiveBuilder2D::new(40.0)
        .bounds(Rect::new(-1.0, 1.0, -1.0, 1.0))
        .build(&sample)
        .unwrap();
    assert!(histogram.outside().entries > 0);
    assert_eq!(histogram.total_count() + histogram.outside().entries, 1_000);
    assert_eq!(histogram.bounds(), Rect::new(-1.0, 1.0, -1.0, 1.0));
}

#[test]
fn histograms_serialize() {
    let histogram = adaptive_histogram(&[1.0, 2.0, 3.0, 4.0], 2.0).unwrap();
    let json = serde_json::to_string(&histogram).unwrap();
    let back: Histogram = serde_json::from_str(&json).unwrap();
    assert_eq!(back, histogram);
}
