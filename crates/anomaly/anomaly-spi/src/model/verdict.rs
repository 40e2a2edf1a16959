//! Per-sample classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Binary classification assigned to one transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Normal,
    Anomalous,
}

impl Verdict {
    pub fn is_anomalous(self) -> bool {
        matches!(self, Verdict::Anomalous)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Normal => write!(f, "normal"),
            Verdict::Anomalous => write!(f, "anomalous"),
        }
    }
}
