//! Anomaly Flagging Core
//!
//! Estimator implementations, the contamination threshold policy, the
//! synthetic transaction generator and the top-level flagging operation.

mod flagger;
mod isolation_forest;
mod synthetic;
mod threshold;
mod zscore;

pub use flagger::*;
pub use isolation_forest::*;
pub use synthetic::*;
pub use threshold::*;
pub use zscore::*;
