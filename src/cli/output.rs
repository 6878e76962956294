//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ApiError;

/// Map domain/service errors to a single categorized line for stderr.
pub fn map_error(e: &ApiError) -> String {
    let category = match e {
        ApiError::ConfigError(_) => "config",
        ApiError::BackendUnavailable(_) => "backend",
        ApiError::BackendRequestFailed(_) | ApiError::BackendError(_) => "backend",
        ApiError::StorageError(_) => "storage",
    };
    format!("error[{}]: {}", category, e)
}
