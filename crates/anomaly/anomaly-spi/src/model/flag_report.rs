//! Flagging result types.

use serde::{Deserialize, Serialize};

use super::verdict::Verdict;
use crate::error::{AnomalyError, Result};

/// One transaction together with its score and verdict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlaggedTransaction {
    /// Position in the original sample.
    pub index: usize,
    pub amount: f64,
    /// Anomaly score, higher is more anomalous.
    pub score: f64,
    pub verdict: Verdict,
}

/// Outcome of one flagging run: every transaction with its verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagReport {
    transactions: Vec<FlaggedTransaction>,
    /// Scores strictly above this value were flagged.
    threshold: f64,
}

impl FlagReport {
    /// Zip amounts, scores and verdicts into a report.
    ///
    /// All three slices must have the same length.
    pub fn new(amounts: &[f64], scores: &[f64], verdicts: &[Verdict], threshold: f64) -> Result<Self> {
        if amounts.len() != scores.len() || amounts.len() != verdicts.len() {
            return Err(AnomalyError::InvalidData(format!(
                "length mismatch: {} amounts, {} scores, {} verdicts",
                amounts.len(),
                scores.len(),
                verdicts.len()
            )));
        }

        let transactions = amounts
            .iter()
            .zip(scores)
            .zip(verdicts)
            .enumerate()
            .map(|(index, ((&amount, &score), &verdict))| FlaggedTransaction {
                index,
                amount,
                score,
                verdict,
            })
            .collect();

        Ok(Self {
            transactions,
            threshold,
        })
    }

    pub fn transactions(&self) -> &[FlaggedTransaction] {
        &self.transactions
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn verdicts(&self) -> Vec<Verdict> {
        self.transactions.iter().map(|t| t.verdict).collect()
    }

    pub fn scores(&self) -> Vec<f64> {
        self.transactions.iter().map(|t| t.score).collect()
    }

    /// The anomalous subsequence, original order preserved.
    pub fn anomalies(&self) -> AnomalySet<'_> {
        AnomalySet { report: self }
    }

    /// The normal subsequence, original order preserved.
    pub fn normals(&self) -> impl Iterator<Item = &FlaggedTransaction> {
        self.transactions
            .iter()
            .filter(|t| t.verdict == Verdict::Normal)
    }

    pub fn anomaly_count(&self) -> usize {
        self.anomalies().len()
    }

    pub fn anomaly_indices(&self) -> Vec<usize> {
        self.anomalies().iter().map(|t| t.index).collect()
    }
}

/// Read-only view over the anomalous transactions of a [`FlagReport`].
#[derive(Debug, Clone, Copy)]
pub struct AnomalySet<'a> {
    report: &'a FlagReport,
}

impl<'a> AnomalySet<'a> {
    pub fn iter(&self) -> impl Iterator<Item = &'a FlaggedTransaction> {
        self.report
            .transactions
            .iter()
            .filter(|t| t.verdict.is_anomalous())
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn to_vec(&self) -> Vec<FlaggedTransaction> {
        self.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> FlagReport {
        FlagReport::new(
            &[100.0, 9000.0, 110.0, 12000.0],
            &[0.4, 0.8, 0.41, 0.9],
            &[
                Verdict::Normal,
                Verdict::Anomalous,
                Verdict::Normal,
                Verdict::Anomalous,
            ],
            0.41,
        )
        .unwrap()
    }

    #[test]
    fn test_anomalies_keep_order_and_attributes() {
        let report = report();
        let anomalies = report.anomalies().to_vec();
        assert_eq!(anomalies.len(), 2);
        assert_eq!(anomalies[0].index, 1);
        assert_eq!(anomalies[0].amount, 9000.0);
        assert_eq!(anomalies[1].index, 3);
        assert_eq!(anomalies[1].score, 0.9);
    }

    #[test]
    fn test_bipartition_covers_every_transaction() {
        let report = report();
        assert_eq!(report.anomaly_count() + report.normals().count(), report.len());
        assert_eq!(report.anomaly_indices(), vec![1, 3]);
        assert_eq!(
            report.normals().map(|t| t.index).collect::<Vec<_>>(),
            vec![0, 2]
        );
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let err = FlagReport::new(&[1.0, 2.0], &[0.5], &[Verdict::Normal], 0.5).unwrap_err();
        assert!(matches!(err, AnomalyError::InvalidData(_)));
    }

    #[test]
    fn test_empty_anomaly_set() {
        let report = FlagReport::new(&[1.0], &[0.5], &[Verdict::Normal], 0.5).unwrap();
        assert!(report.anomalies().is_empty());
        assert_eq!(report.threshold(), 0.5);
    }
}
