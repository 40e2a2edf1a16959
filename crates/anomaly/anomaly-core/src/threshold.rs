//! Contamination threshold policy shared by every estimator.
//!
//! The expected anomaly count is `round(contamination * n)` with halves
//! rounded away from zero. The threshold is the `(k + 1)`-th highest training
//! score and only scores strictly above it are anomalous, so ties at the cut
//! resolve to `Normal`.

use anomaly_api::{validate_contamination, AnomalyError, Result};

/// Number of anomalies expected among `n` points.
pub fn expected_anomalies(n: usize, contamination: f64) -> usize {
    ((contamination * n as f64).round() as usize).min(n.saturating_sub(1))
}

/// Score cut-off for the given training scores.
pub fn contamination_threshold(scores: &[f64], contamination: f64) -> Result<f64> {
    validate_contamination(contamination)?;
    if scores.is_empty() {
        return Err(AnomalyError::EmptyInput);
    }

    let mut sorted = scores.to_vec();
    sorted.sort_by(|a, b| b.total_cmp(a));
    let k = expected_anomalies(sorted.len(), contamination);
    Ok(sorted[k])
}

/// Reject empty input and non-finite amounts.
pub fn ensure_valid_amounts(data: &[f64]) -> Result<()> {
    if data.is_empty() {
        return Err(AnomalyError::EmptyInput);
    }
    if let Some((i, v)) = data.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(AnomalyError::InvalidData(format!(
            "amount at index {} is not finite: {}",
            i, v
        )));
    }
    Ok(())
}
