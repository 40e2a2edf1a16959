//! Synthetic transaction sample generator.

use anomaly_api::{AnomalyError, Result, SyntheticConfig, TransactionSample};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// Draw a synthetic sample: `count` amounts from the normal distribution,
/// with the last `anomaly_count` positions overwritten by anomaly draws.
pub fn generate_transactions<R: Rng + ?Sized>(
    config: &SyntheticConfig,
    rng: &mut R,
) -> Result<TransactionSample> {
    config.validate()?;

    let normal = Normal::new(config.normal_mean, config.normal_std)
        .map_err(|e| AnomalyError::invalid_config("normal_std", e.to_string()))?;
    let outlier = Normal::new(config.anomaly_mean, config.anomaly_std)
        .map_err(|e| AnomalyError::invalid_config("anomaly_std", e.to_string()))?;

    let mut amounts: Vec<f64> = (0..config.count).map(|_| normal.sample(rng)).collect();
    let start = config.count - config.anomaly_count;
    for amount in &mut amounts[start..] {
        *amount = outlier.sample(rng);
    }

    Ok(TransactionSample::new(amounts))
}
