// ============================================================================
// domain/error.rs - DEPLOYMENT PARAMETER & CATALOG ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reports collect them per service)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors (operator input)
    // ========================================================================
    #[error("missing required field '{field}'")]
    MissingRequiredField { field: &'static str },

    #[error("invalid value '{value}' for '{field}', expected one of: {}", allowed.join(", "))]
    InvalidEnumValue {
        field: &'static str,
        value: String,
        allowed: &'static [&'static str],
    },

    #[error("invalid value '{value}' for '{field}': {reason}")]
    InvalidNumber {
        field: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("'{field}' can't be empty when {condition}")]
    ConditionalRequirementUnmet {
        field: &'static str,
        condition: &'static str,
    },

    #[error("'{field}' must start with one of {}", accepted.join(" or "))]
    MalformedUrl {
        field: &'static str,
        accepted: &'static [&'static str],
    },

    #[error("unknown parameter '{name}'")]
    UnknownParameter { name: String },

    // ========================================================================
    // Catalog Errors (internal mismatch between catalog and context)
    // ========================================================================
    #[error("unresolved placeholder '{placeholder}' in '{template}'")]
    UnresolvedPlaceholder {
        template: String,
        placeholder: String,
    },

    #[error("no template named '{name}' in the {format} catalog")]
    UnknownTemplate { name: String, format: String },

    #[error("duplicate artifact path: {path}")]
    DuplicatePath { path: String },

    #[error("absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingRequiredField { field } => vec![
                format!("Pass --{} <value>", field.replace('_', "-")),
                "Or set it in the config file / DEPLOYGEN_* environment".into(),
            ],
            Self::InvalidEnumValue { field, allowed, .. } => vec![format!(
                "'{}' accepts exactly: {}",
                field,
                allowed.join(", ")
            )],
            Self::ConditionalRequirementUnmet { field, condition } => vec![
                format!("Provide --{} because {}", field.replace('_', "-"), condition),
                "Or disable the feature that requires it".into(),
            ],
            Self::MalformedUrl { field, .. } => vec![format!(
                "Use a full URL for '{}', e.g. http://127.0.0.1:8080",
                field
            )],
            Self::UnresolvedPlaceholder { .. } | Self::UnknownTemplate { .. } => vec![
                "The built-in template catalog is inconsistent".into(),
                "This is a bug, please report it".into(),
            ],
            _ => vec!["See `deploygen generate --help` for details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingRequiredField { .. }
            | Self::InvalidEnumValue { .. }
            | Self::InvalidNumber { .. }
            | Self::MalformedUrl { .. }
            | Self::UnknownParameter { .. } => ErrorCategory::Validation,
            Self::ConditionalRequirementUnmet { .. } => ErrorCategory::Compatibility,
            Self::UnknownTemplate { .. } => ErrorCategory::NotFound,
            _ => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    NotFound,
    Internal,
}
