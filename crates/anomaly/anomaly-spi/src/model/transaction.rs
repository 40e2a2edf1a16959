//! Transaction amount sample.

use serde::{Deserialize, Serialize};

/// Ordered sequence of transaction amounts.
///
/// Positions carry no meaning beyond generation order. The sample exposes no
/// mutating accessors once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionSample {
    amounts: Vec<f64>,
}

impl TransactionSample {
    pub fn new(amounts: Vec<f64>) -> Self {
        Self { amounts }
    }

    pub fn amounts(&self) -> &[f64] {
        &self.amounts
    }

    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.amounts.get(index).copied()
    }
}

impl From<Vec<f64>> for TransactionSample {
    fn from(amounts: Vec<f64>) -> Self {
        Self::new(amounts)
    }
}

impl From<&[f64]> for TransactionSample {
    fn from(amounts: &[f64]) -> Self {
        Self::new(amounts.to_vec())
    }
}

impl AsRef<[f64]> for TransactionSample {
    fn as_ref(&self) -> &[f64] {
        &self.amounts
    }
}
