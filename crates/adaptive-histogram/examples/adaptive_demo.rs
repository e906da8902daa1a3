//! Demonstrates adaptive binning on skewed and bimodal data
//!
//! Run with `RUST_LOG=adaptive_partition=debug` to see the partition log.

use adaptive_core::{Sample1D, Sample2D};
use adaptive_histogram::{AdaptiveBuilder, AdaptiveBuilder2D, HistogramBuilder};
use adaptive_partition::{Partition1D, PartitionConfig};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Exp, Normal};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let exp = Exp::new(1.0)?;
    let skewed: Vec<f64> = (0..5_000).map(|_| exp.sample(&mut rng)).collect();

    // Example 1: Variable-width bins follow the density
    println!("=== Exponential data, 250 per bin ===");
    let histogram = AdaptiveBuilder::new(250.0).build(&skewed[..])?;
    println!("{}", histogram);
    for (bin, density) in histogram.bins().iter().zip(histogram.densities()) {
        println!(
            "  [{:.3}, {:.3}): width={:.3}, count={}, density={:.3}",
            bin.left,
            bin.right,
            bin.width(),
            bin.count,
            density
        );
    }

    // Example 2: Structural versus adjusted edges
    println!("\n=== Structural vs adjusted edges ===");
    let sample = Sample1D::new(skewed.iter().take(40).copied().collect())?;
    let config = PartitionConfig::from_json_str(r#"{ "min_occupancy": 8.0 }"#)?;
    let engine = Partition1D::from_data_range(&sample, config)?;
    for split in engine.splits() {
        println!("  cut {:.4} -> adjusted {:.4}", split.cut, split.adjusted);
    }

    // Example 3: Two clusters in the plane
    println!("\n=== Bimodal 2-D data, 200 per cell ===");
    let wide = Normal::new(0.0, 2.0)?;
    let narrow = Normal::new(3.0, 0.3)?;
    let (mut x, mut y) = (Vec::new(), Vec::new());
    for i in 0..4_000 {
        let dist = if i % 2 == 0 { wide } else { narrow };
        x.push(dist.sample(&mut rng));
        y.push(dist.sample(&mut rng));
    }
    let points = Sample2D::new(x, y)?;
    let histogram = AdaptiveBuilder2D::new(200.0).build(&points)?;
    println!("{}", histogram);
    let densities = histogram.densities();
    for (cell, density) in histogram.cells().iter().zip(&densities) {
        println!("  {} density={:.4}", cell, density);
    }

    // Example 4: Refill the same geometry with fresh data
    println!("\n=== Refilled with a new sample ===");
    let engine = AdaptiveBuilder2D::new(200.0).partition(&points)?;
    let fresh: Vec<(f64, f64, f64)> = (0..4_000)
        .map(|_| (wide.sample(&mut rng), wide.sample(&mut rng), 1.0))
        .collect();
    let refilled = engine.fill_adjusted(fresh);
    println!(
        "  {} of 4000 inside, {} outside the partitioned bounds",
        refilled.total_entries(),
        refilled.outside().entries
    );
    println!("\n{}", serde_json::to_string_pretty(&refilled.bins()[0])?);

    Ok(())
}
