//! Top-level flagging operation: fit on a sample, then classify it.

use anomaly_api::{
    Estimator, FittedModel, FlagReport, IsolationForestConfig, Method, Result, TransactionSample,
    ZScoreConfig,
};
use rand::Rng;

use crate::isolation_forest::IsolationForest;
use crate::zscore::ZScoreEstimator;

/// Fit `estimator` on the sample and flag the same sample.
pub fn flag_with<E, R>(estimator: &E, sample: &TransactionSample, rng: &mut R) -> Result<FlagReport>
where
    E: Estimator,
    R: Rng + ?Sized,
{
    let model = estimator.fit(sample.amounts(), rng)?;
    let report = model.flag(sample.amounts())?;

    tracing::info!(
        method = estimator.name(),
        transactions = report.len(),
        anomalies = report.anomaly_count(),
        threshold = report.threshold(),
        "flagged transaction sample"
    );
    Ok(report)
}

/// Flag a sample with an isolation forest.
pub fn flag_transactions<R: Rng + ?Sized>(
    sample: &TransactionSample,
    config: &IsolationForestConfig,
    rng: &mut R,
) -> Result<FlagReport> {
    let forest = IsolationForest::new(config.clone())?;
    flag_with(&forest, sample, rng)
}

/// Flag a sample with the chosen method and contamination. Trees and
/// subsample size come from `forest` when the isolation forest is chosen.
pub fn flag_by_method<R: Rng + ?Sized>(
    method: Method,
    sample: &TransactionSample,
    forest: &IsolationForestConfig,
    rng: &mut R,
) -> Result<FlagReport> {
    match method {
        Method::IsolationForest => flag_transactions(sample, forest, rng),
        Method::ZScore => {
            let estimator = ZScoreEstimator::new(ZScoreConfig::new(forest.contamination))?;
            flag_with(&estimator, sample, rng)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anomaly_api::AnomalyError;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sample() -> TransactionSample {
        let mut amounts: Vec<f64> = (0..38).map(|i| 1000.0 + (i * 7 % 40) as f64).collect();
        amounts.push(9000.0);
        amounts.push(15000.0);
        TransactionSample::new(amounts)
    }

    #[test]
    fn test_flag_transactions_finds_large_amounts() {
        let mut rng = StdRng::seed_from_u64(42);
        // round(0.05 * 40) = 2
        let report =
            flag_transactions(&sample(), &IsolationForestConfig::default(), &mut rng).unwrap();
        assert_eq!(report.anomaly_indices(), vec![38, 39]);
    }

    #[test]
    fn test_flag_by_method_agrees_on_obvious_outliers() {
        let sample = sample();
        let config = IsolationForestConfig::default();
        let mut rng = StdRng::seed_from_u64(1);
        let forest =
            flag_by_method(Method::IsolationForest, &sample, &config, &mut rng).unwrap();
        let zscore = flag_by_method(Method::ZScore, &sample, &config, &mut rng).unwrap();
        assert_eq!(forest.anomaly_indices(), zscore.anomaly_indices());
    }

    #[test]
    fn test_invalid_contamination_fails_before_fitting() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = flag_transactions(&sample(), &IsolationForestConfig::new(0.6), &mut rng)
            .unwrap_err();
        assert!(matches!(err, AnomalyError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_empty_sample_fails() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = flag_transactions(
            &TransactionSample::new(vec![]),
            &IsolationForestConfig::default(),
            &mut rng,
        )
        .unwrap_err();
        assert_eq!(err, AnomalyError::EmptyInput);
    }
}
