//! Error types for the article generation pipeline.

use thiserror::Error;

/// Persistence-related errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),

    #[error("Storage I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Errors surfaced by the generation pipeline and its collaborators.
///
/// Only `ConfigError`, `BackendUnavailable` (in require-backend mode) and
/// `StorageError` ever reach the CLI. Backend request failures are absorbed
/// by the orchestrator's retry loop, and quality-gate failures are plain
/// `ValidationResult` values, never errors.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Backend request failed: {0}")]
    BackendRequestFailed(String),

    #[error("Backend error: {0}")]
    BackendError(String),

    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),
}

impl ApiError {
    /// Whether this error came from a backend call (and is therefore retryable
    /// by the orchestrator rather than fatal).
    pub fn is_backend_failure(&self) -> bool {
        matches!(
            self,
            ApiError::BackendRequestFailed(_) | ApiError::BackendError(_)
        )
    }
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::ConfigError(format!("Malformed JSON: {}", err))
    }
}
