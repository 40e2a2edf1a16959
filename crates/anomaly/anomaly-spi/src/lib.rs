//! Anomaly Flagging Service Provider Interface
//!
//! Defines the estimator contract and the types exchanged with it.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{Estimator, FittedModel};
pub use error::{AnomalyError, Result};
pub use model::{AnomalySet, FlagReport, FlaggedTransaction, TransactionSample, Verdict};
