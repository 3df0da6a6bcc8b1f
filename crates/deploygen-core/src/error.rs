//! Unified error handling for deploygen core.
//!
//! Wraps domain and application errors behind one type with suggestions and
//! a display category.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for deploygen core operations.
#[derive(Debug, Error, Clone)]
pub enum DeployError {
    /// Invalid parameters or an inconsistent catalog.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Filesystem or orchestration failures.
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

impl DeployError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category().into(),
            Self::Application(e) => e.category(),
        }
    }

    /// Whether the operator can fix this by changing their input.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Validation | ErrorCategory::Compatibility
        )
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
    Filesystem,
    Internal,
}

impl From<crate::domain::ErrorCategory> for ErrorCategory {
    fn from(category: crate::domain::ErrorCategory) -> Self {
        use crate::domain::ErrorCategory as Domain;
        match category {
            Domain::Validation => Self::Validation,
            Domain::Compatibility => Self::Compatibility,
            Domain::NotFound => Self::NotFound,
            Domain::Internal => Self::Internal,
        }
    }
}

/// Convenient result type alias.
pub type DeployResult<T> = Result<T, DeployError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn domain_errors_display_unchanged() {
        let err: DeployError = DomainError::MissingRequiredField { field: "mongo_ip" }.into();
        assert_eq!(err.to_string(), "missing required field 'mongo_ip'");
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.is_user_error());
    }

    #[test]
    fn filesystem_errors_are_not_user_errors() {
        let err: DeployError = ApplicationError::FilesystemError {
            path: PathBuf::from("/deploy/cmdb_adminserver"),
            reason: "permission denied".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Filesystem);
        assert!(!err.is_user_error());
    }
}
