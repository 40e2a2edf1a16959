//! Anomaly Flagging Facade
//!
//! Unified re-exports for the anomaly flagging module.
//!
//! This facade provides a single entry point to all anomaly flagging functionality:
//! - `Estimator`/`FittedModel` traits and the result types from SPI
//! - Configuration types from API
//! - Estimators (`IsolationForest`, `ZScoreEstimator`), the synthetic generator
//!   and the flagging operations from Core

// Re-export everything from SPI
pub use anomaly_spi::*;

// Re-export everything from API
pub use anomaly_api::*;

// Re-export everything from Core
pub use anomaly_core::*;
