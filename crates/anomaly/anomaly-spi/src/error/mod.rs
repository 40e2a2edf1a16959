//! Error types for anomaly flagging.
//!
//! This module contains error types and the Result alias.

mod anomaly_error;

pub use anomaly_error::{AnomalyError, Result};
