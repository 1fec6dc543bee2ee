//! Sliding-Window Change Detection Example
//!
//! Slides a fixed window over a synthetic latency series with a regression
//! halfway through and prints each significant change as JSON.
//!
//! Run with: cargo run --example detect_window [-- path/to/detector.toml]
//! Set RUST_LOG=shiftpoint=debug to see per-window detection logs.

use anyhow::Result;
use shiftpoint::{ChangeDetector, ChangeOutcome, DetectorConfig};
use tracing_subscriber::EnvFilter;

const WINDOW_LEN: usize = 40;

/// Initialize tracing subscriber for debug output
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

/// p50 latency in ms: ~120ms, then ~135ms from sample 70 on
fn latency_series() -> Vec<f64> {
    (0..140)
        .map(|i| {
            let jitter = [0.0, 1.5, -1.0, 0.5, -1.5, 1.0, -0.5][i % 7];
            let base = if i < 70 { 120.0 } else { 135.0 };
            base + jitter
        })
        .collect()
}

fn main() -> Result<()> {
    init_tracing();

    let config = match std::env::args().nth(1) {
        Some(path) => DetectorConfig::from_file(path)?,
        None => DetectorConfig::default(),
    };
    println!("Detector config:\n{}", config.to_toml_string()?);

    let detector = ChangeDetector::new(config)?;
    let series = latency_series();

    let mut reported = 0;
    for start in 0..=(series.len() - WINDOW_LEN) {
        let window = &series[start..start + WINDOW_LEN];
        let cp = detector.check(window);

        if let ChangeOutcome::Significant { index, .. } = cp.outcome() {
            println!("window @{} -> change after sample {}", start, start + index);
            println!("{}", cp.to_json()?);
            reported += 1;
        }
    }

    println!("\n{} of {} windows reported a change", reported, series.len() - WINDOW_LEN + 1);
    Ok(())
}
