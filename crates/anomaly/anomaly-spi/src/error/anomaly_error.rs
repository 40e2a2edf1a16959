//! Anomaly flagging error types.

use thiserror::Error;

/// Anomaly flagging errors.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnomalyError {
    #[error("Invalid configuration: {name} - {reason}")]
    InvalidConfiguration { name: String, reason: String },

    #[error("Empty input: at least one transaction amount is required")]
    EmptyInput,

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl AnomalyError {
    /// Shorthand for an [`AnomalyError::InvalidConfiguration`].
    pub fn invalid_config(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for anomaly flagging operations.
pub type Result<T> = std::result::Result<T, AnomalyError>;
