//! Fraud simulation: generate a synthetic sample and flag it.
//!
//! Run with: cargo run --example basic -p anomaly

use anomaly::{
    flag_transactions, generate_transactions, IsolationForestConfig, SyntheticConfig,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Transaction Anomaly Flagging ===\n");

    let mut rng = StdRng::seed_from_u64(42);
    let sample = generate_transactions(&SyntheticConfig::default(), &mut rng)?;
    println!("Generated {} transactions", sample.len());

    let report = flag_transactions(&sample, &IsolationForestConfig::default(), &mut rng)?;
    println!("Threshold: {:.4}", report.threshold());
    println!("Anomalies found: {}\n", report.anomaly_count());

    println!("{:>6} {:>14} {:>8}", "index", "amount", "score");
    for t in report.anomalies().iter() {
        println!("{:>6} {:>14.2} {:>8.4}", t.index, t.amount, t.score);
    }
    Ok(())
}
