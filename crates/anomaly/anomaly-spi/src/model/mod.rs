//! Data models for anomaly flagging.

mod flag_report;
mod transaction;
mod verdict;

pub use flag_report::{AnomalySet, FlagReport, FlaggedTransaction};
pub use transaction::TransactionSample;
pub use verdict::Verdict;
