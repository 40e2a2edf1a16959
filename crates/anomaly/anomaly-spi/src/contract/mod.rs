//! Contract definitions for anomaly flagging.
//!
//! This module contains trait definitions that estimators must implement.

mod estimator;

pub use estimator::{Estimator, FittedModel};
