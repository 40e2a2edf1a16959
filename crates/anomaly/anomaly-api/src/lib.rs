//! Anomaly Flagging API
//!
//! Configuration types for the estimators and the synthetic sample generator.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// Re-export SPI types
pub use anomaly_spi::{
    AnomalyError, AnomalySet, Estimator, FittedModel, FlagReport, FlaggedTransaction, Result,
    TransactionSample, Verdict,
};

/// Default expected share of anomalies.
pub const DEFAULT_CONTAMINATION: f64 = 0.05;

/// Reject contamination values outside the open interval (0, 0.5).
pub fn validate_contamination(contamination: f64) -> Result<()> {
    if contamination > 0.0 && contamination < 0.5 {
        Ok(())
    } else {
        Err(AnomalyError::invalid_config(
            "contamination",
            format!("must be in (0, 0.5), got {}", contamination),
        ))
    }
}

// ============================================================================
// Detector Configuration
// ============================================================================

/// Isolation forest configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IsolationForestConfig {
    /// Expected share of anomalies, in (0, 0.5) (default: 0.05).
    pub contamination: f64,
    /// Number of isolation trees (default: 100).
    pub n_estimators: usize,
    /// Upper bound on the per-tree subsample size (default: 256).
    pub max_samples: usize,
}

impl Default for IsolationForestConfig {
    fn default() -> Self {
        Self {
            contamination: DEFAULT_CONTAMINATION,
            n_estimators: 100,
            max_samples: 256,
        }
    }
}

impl IsolationForestConfig {
    pub fn new(contamination: f64) -> Self {
        Self {
            contamination,
            ..Self::default()
        }
    }

    pub fn with_estimators(mut self, n_estimators: usize) -> Self {
        self.n_estimators = n_estimators;
        self
    }

    pub fn with_max_samples(mut self, max_samples: usize) -> Self {
        self.max_samples = max_samples;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_contamination(self.contamination)?;
        if self.n_estimators == 0 {
            return Err(AnomalyError::invalid_config(
                "n_estimators",
                "must be at least 1",
            ));
        }
        if self.max_samples == 0 {
            return Err(AnomalyError::invalid_config(
                "max_samples",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Z-score estimator configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZScoreConfig {
    /// Expected share of anomalies, in (0, 0.5) (default: 0.05).
    pub contamination: f64,
}

impl Default for ZScoreConfig {
    fn default() -> Self {
        Self {
            contamination: DEFAULT_CONTAMINATION,
        }
    }
}

impl ZScoreConfig {
    pub fn new(contamination: f64) -> Self {
        Self { contamination }
    }

    pub fn validate(&self) -> Result<()> {
        validate_contamination(self.contamination)
    }
}

/// Outlier method selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    #[default]
    #[serde(alias = "iforest")]
    IsolationForest,
    #[serde(alias = "zscore")]
    ZScore,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::IsolationForest => write!(f, "isolation_forest"),
            Method::ZScore => write!(f, "z_score"),
        }
    }
}

impl FromStr for Method {
    type Err = AnomalyError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "iforest" | "isolation_forest" | "isolation-forest" => Ok(Method::IsolationForest),
            "zscore" | "z_score" | "z-score" => Ok(Method::ZScore),
            other => Err(AnomalyError::invalid_config(
                "method",
                format!("unknown method '{}', use 'iforest' or 'zscore'", other),
            )),
        }
    }
}

// ============================================================================
// Synthetic Sample Configuration
// ============================================================================

/// Shape of the synthetic transaction sample.
///
/// Defaults reproduce the fraud simulation: 100 amounts around 1000, the
/// last five replaced by large amounts around 10000.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyntheticConfig {
    pub count: usize,
    pub normal_mean: f64,
    pub normal_std: f64,
    pub anomaly_count: usize,
    pub anomaly_mean: f64,
    pub anomaly_std: f64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            count: 100,
            normal_mean: 1000.0,
            normal_std: 250.0,
            anomaly_count: 5,
            anomaly_mean: 10000.0,
            anomaly_std: 3000.0,
        }
    }
}

impl SyntheticConfig {
    /// Resize the sample, keeping the current share of injected anomalies
    /// (rounded, capped at `count`).
    pub fn with_count(mut self, count: usize) -> Self {
        let share = if self.count == 0 {
            0.0
        } else {
            self.anomaly_count as f64 / self.count as f64
        };
        self.anomaly_count = ((share * count as f64).round() as usize).min(count);
        self.count = count;
        self
    }

    pub fn with_anomaly_count(mut self, anomaly_count: usize) -> Self {
        self.anomaly_count = anomaly_count;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.count == 0 {
            return Err(AnomalyError::invalid_config("count", "must be at least 1"));
        }
        if self.anomaly_count > self.count {
            return Err(AnomalyError::invalid_config(
                "anomaly_count",
                format!(
                    "must not exceed count ({}), got {}",
                    self.count, self.anomaly_count
                ),
            ));
        }
        for (name, value) in [
            ("normal_mean", self.normal_mean),
            ("anomaly_mean", self.anomaly_mean),
        ] {
            if !value.is_finite() {
                return Err(AnomalyError::invalid_config(name, "must be finite"));
            }
        }
        for (name, value) in [
            ("normal_std", self.normal_std),
            ("anomaly_std", self.anomaly_std),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(AnomalyError::invalid_config(
                    name,
                    format!("must be finite and non-negative, got {}", value),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contamination_bounds() {
        assert!(validate_contamination(0.05).is_ok());
        assert!(validate_contamination(0.49).is_ok());
        for bad in [0.0, 0.5, 0.6, -0.1, f64::NAN] {
            assert!(
                matches!(
                    validate_contamination(bad),
                    Err(AnomalyError::InvalidConfiguration { .. })
                ),
                "{} should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_forest_defaults() {
        let config = IsolationForestConfig::default();
        assert_eq!(config.contamination, 0.05);
        assert_eq!(config.n_estimators, 100);
        assert_eq!(config.max_samples, 256);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_forest_rejects_zero_trees() {
        let config = IsolationForestConfig::default().with_estimators(0);
        assert!(config.validate().is_err());
        let config = IsolationForestConfig::default().with_max_samples(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_forest_partial_json_uses_defaults() {
        let config: IsolationForestConfig =
            serde_json::from_str(r#"{"contamination": 0.1}"#).unwrap();
        assert_eq!(config.contamination, 0.1);
        assert_eq!(config.n_estimators, 100);
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!("iforest".parse::<Method>().unwrap(), Method::IsolationForest);
        assert_eq!("Z-Score".parse::<Method>().unwrap(), Method::ZScore);
        assert!("lof".parse::<Method>().is_err());
    }

    #[test]
    fn test_with_count_keeps_anomaly_share() {
        let small = SyntheticConfig::default().with_count(4);
        assert_eq!(small.count, 4);
        assert_eq!(small.anomaly_count, 0);
        assert!(small.validate().is_ok());

        let large = SyntheticConfig::default().with_count(1000);
        assert_eq!(large.anomaly_count, 50);

        let rounded = SyntheticConfig::default().with_count(30);
        assert_eq!(rounded.anomaly_count, 2); // 1.5 rounds up
    }

    #[test]
    fn test_with_anomaly_count_overrides_share() {
        let config = SyntheticConfig::default()
            .with_count(20)
            .with_anomaly_count(3);
        assert_eq!(config.count, 20);
        assert_eq!(config.anomaly_count, 3);
    }

    #[test]
    fn test_synthetic_validation() {
        assert!(SyntheticConfig::default().validate().is_ok());

        let too_many = SyntheticConfig {
            anomaly_count: 101,
            ..SyntheticConfig::default()
        };
        assert!(too_many.validate().is_err());

        let negative_std = SyntheticConfig {
            normal_std: -1.0,
            ..SyntheticConfig::default()
        };
        assert!(negative_std.validate().is_err());

        let empty = SyntheticConfig {
            count: 0,
            anomaly_count: 0,
            ..SyntheticConfig::default()
        };
        assert!(empty.validate().is_err());
    }
}
