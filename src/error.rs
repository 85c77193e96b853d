use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum PermissionError {
    #[error("invalid permission code: {0}")]
    InvalidCodeFormat(String),

    #[error("configuration error: {0}")]
    ConfigurationError(String),

    #[error("structural violation: {0}")]
    StructuralViolation(String),

    #[error("failed to load permissions: {0}")]
    LoadError(String),

    #[error("navigation error: {0}")]
    NavigationError(String),

    #[error("Poisoned lock error: {0}")]
    PoisonedLockError(String),
}

impl From<serde_json::Error> for PermissionError {
    fn from(err: serde_json::Error) -> Self {
        PermissionError::ConfigurationError(err.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for PermissionError {
    fn from(err: std::sync::PoisonError<T>) -> Self {
        PermissionError::PoisonedLockError(err.to_string())
    }
}
