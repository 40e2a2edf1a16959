//! # anomaly
//!
//! Unsupervised anomaly flagging for transaction amounts.
//! Provides the isolation forest and z-score estimators, the contamination
//! threshold policy and a synthetic transaction generator.
//!
//! ```
//! use anomaly::{flag_transactions, IsolationForestConfig, TransactionSample};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let mut amounts: Vec<f64> = (0..19).map(|i| 1000.0 + i as f64).collect();
//! amounts.push(25_000.0);
//! let sample = TransactionSample::new(amounts);
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let report = flag_transactions(&sample, &IsolationForestConfig::default(), &mut rng).unwrap();
//! assert_eq!(report.anomaly_indices(), vec![19]);
//! ```

pub use anomaly_facade::*;
