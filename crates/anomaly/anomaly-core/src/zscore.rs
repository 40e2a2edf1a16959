//! Z-score estimator.

use anomaly_api::{Estimator, FittedModel, Result, ZScoreConfig};
use rand::Rng;

use crate::threshold::{contamination_threshold, ensure_valid_amounts};

/// Z-score based estimator.
///
/// Ranks amounts by their absolute distance from the mean in standard
/// deviations and flags the top `contamination` share. Ignores the random
/// source.
#[derive(Debug, Clone, Default)]
pub struct ZScoreEstimator {
    config: ZScoreConfig,
}

impl ZScoreEstimator {
    pub fn new(config: ZScoreConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ZScoreConfig {
        &self.config
    }
}

impl Estimator for ZScoreEstimator {
    type Model = FittedZScore;

    fn fit<R: Rng + ?Sized>(&self, data: &[f64], _rng: &mut R) -> Result<FittedZScore> {
        self.config.validate()?;
        ensure_valid_amounts(data)?;

        let (mean, std_dev) = mean_std(data);
        let mut model = FittedZScore {
            mean,
            std_dev,
            threshold: f64::INFINITY,
        };
        let training_scores = model.score(data)?;
        model.threshold = contamination_threshold(&training_scores, self.config.contamination)?;

        tracing::debug!(mean, std_dev, threshold = model.threshold, "fitted z-score model");
        Ok(model)
    }

    fn name(&self) -> &'static str {
        "zscore"
    }
}

/// Fitted z-score model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedZScore {
    pub mean: f64,
    pub std_dev: f64,
    threshold: f64,
}

impl FittedModel for FittedZScore {
    fn score(&self, data: &[f64]) -> Result<Vec<f64>> {
        ensure_valid_amounts(data)?;
        if self.std_dev == 0.0 {
            return Ok(vec![0.0; data.len()]);
        }
        Ok(data
            .iter()
            .map(|&x| ((x - self.mean) / self.std_dev).abs())
            .collect())
    }

    fn threshold(&self) -> f64 {
        self.threshold
    }
}

/// Population mean and standard deviation.
fn mean_std(data: &[f64]) -> (f64, f64) {
    let n = data.len() as f64;
    let mean = data.iter().sum::<f64>() / n;
    let std_dev = (data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n).sqrt();
    (mean, std_dev)
}
