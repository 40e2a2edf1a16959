//! Estimator trait definitions.

use rand::Rng;

use crate::error::Result;
use crate::model::{FlagReport, Verdict};

/// An unsupervised outlier estimator.
///
/// Fitting is separate from scoring: `fit` consumes the training amounts and
/// the caller's random source and returns a [`FittedModel`] value that holds
/// everything learned, including the decision threshold.
pub trait Estimator {
    /// Model produced by [`Estimator::fit`].
    type Model: FittedModel;

    /// Learn a model from the given amounts.
    fn fit<R: Rng + ?Sized>(&self, data: &[f64], rng: &mut R) -> Result<Self::Model>;

    /// Short method name used in logs and reports.
    fn name(&self) -> &'static str;
}

/// A fitted outlier model.
pub trait FittedModel: Send + Sync {
    /// Anomaly score for each amount, higher is more anomalous.
    fn score(&self, data: &[f64]) -> Result<Vec<f64>>;

    /// Scores strictly above this value are anomalous.
    fn threshold(&self) -> f64;

    /// Verdict for each amount.
    fn classify(&self, data: &[f64]) -> Result<Vec<Verdict>> {
        let threshold = self.threshold();
        Ok(self
            .score(data)?
            .into_iter()
            .map(|s| verdict_for(s, threshold))
            .collect())
    }

    /// Score and classify in one pass, keeping the amounts alongside.
    fn flag(&self, data: &[f64]) -> Result<FlagReport> {
        let threshold = self.threshold();
        let scores = self.score(data)?;
        let verdicts: Vec<Verdict> = scores
            .iter()
            .map(|&s| verdict_for(s, threshold))
            .collect();
        FlagReport::new(data, &scores, &verdicts, threshold)
    }
}

fn verdict_for(score: f64, threshold: f64) -> Verdict {
    if score > threshold {
        Verdict::Anomalous
    } else {
        Verdict::Normal
    }
}
