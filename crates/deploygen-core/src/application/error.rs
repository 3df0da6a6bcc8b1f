//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// One service's start script could not be produced.
    #[error("Start script for {service} failed: {reason}")]
    ScriptPatchFailed { service: String, reason: String },

    /// Store access failed (lock poisoned, etc.).
    #[error("Template catalog store error")]
    StoreLockError,

    /// The deployment root is missing or not a directory.
    #[error("Deployment root not found: {path}")]
    DeployRootMissing { path: PathBuf },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::ScriptPatchFailed { service, .. } => vec![
                format!("Inspect {service}/template.sh.start"),
                "Other services were still patched".into(),
            ],
            Self::StoreLockError => vec![
                "The template catalog is locked".into(),
                "Try again in a moment".into(),
            ],
            Self::DeployRootMissing { path } => vec![
                format!("Create {} or pass --deploy-root", path.display()),
                "Run from the directory that holds the cmdb_* services".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } | Self::ScriptPatchFailed { .. } => {
                ErrorCategory::Filesystem
            }
            Self::DeployRootMissing { .. } => ErrorCategory::NotFound,
            Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
