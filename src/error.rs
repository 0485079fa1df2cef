use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleError {
    #[error("invalid rule {rule}: {reason}")]
    Validation { rule: String, reason: String },

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("command failed: {0}")]
    Command(String),

    #[error("command output is missing key '{0}'")]
    MissingOutputKey(String),
}

impl RuleError {
    pub(crate) fn validation(rule: impl Into<String>, reason: impl Into<String>) -> Self {
        RuleError::Validation {
            rule: rule.into(),
            reason: reason.into(),
        }
    }
}
