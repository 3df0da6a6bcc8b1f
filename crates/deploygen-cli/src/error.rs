//! Error handling for the deploygen CLI.
//!
//! Provides structured errors with:
//! - Operator-facing messages (never carrying secret values)
//! - Actionable suggestions
//! - Exit code mapping

use std::error::Error;

use owo_colors::OwoColorize;
use thiserror::Error;

use deploygen_core::error::DeployError;

pub use deploygen_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Short usage reminder printed under user errors.
pub const GENERATE_USAGE: &str = "Usage: deploygen generate --discovery <ADDR> --redis-ip <IP> \
--redis-pass <PASS> --mongo-ip <IP> --mongo-user <USER> --mongo-pass <PASS> \
--blueking-cmdb-url <URL> [OPTIONS]";

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    // ── Config errors ──────────────────────────────────────────────────────
    /// A configuration file or environment layer could not be read.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ── Core errors ────────────────────────────────────────────────────────
    /// An error propagated from `deploygen-core`.
    #[error(transparent)]
    Core(#[from] DeployError),

    /// One or more startup scripts could not be patched.
    ///
    /// Configuration files were still written; only the named services are
    /// left without a fresh `start.sh`.
    #[error("Startup scripts failed for: {}", services.join(", "))]
    ScriptsFailed { services: Vec<String> },

    // ── System errors ──────────────────────────────────────────────────────
    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Machine-readable output could not be produced.
    #[error("Could not encode output: {0}")]
    Encoding(#[from] serde_json::Error),
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ConfigError { .. } => vec![
                "Check the file passed with --config (or ./deploygen.toml)".into(),
                "Values must be plain strings, numbers or booleans".into(),
            ],

            Self::Core(core) => core.suggestions(),

            Self::ScriptsFailed { .. } => vec![
                "Re-run with -v to see the reason for each service".into(),
                "Configuration files were written; fix the scripts and re-run".into(),
            ],

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {message}"),
                "Check file permissions".into(),
            ],

            Self::Encoding(_) => vec!["This appears to be a bug in deploygen".into()],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation | CoreCategory::Compatibility => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Filesystem | CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::ScriptsFailed { .. } | Self::IoError { .. } | Self::Encoding(_) => {
                ErrorCategory::Internal
            }
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// Usage line shown under input errors.
    pub fn usage(&self) -> Option<&'static str> {
        (self.category() == ErrorCategory::UserError).then_some(GENERATE_USAGE)
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {}\n\n",
            "✗".red().bold(),
            "Error:".red().bold()
        ));
        output.push_str(&format!("  {}\n", self.to_string().red()));

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "→".dimmed(),
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        if let Some(usage) = self.usage() {
            output.push_str(&format!("\n{}\n", usage.bold()));
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {suggestion}\n"));
            }
        }

        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(),
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`], no ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!("\nError: {self}\n"));

        if verbose {
            let mut src = self.source();
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        if let Some(usage) = self.usage() {
            out.push_str(&format!("\n{usage}\n"));
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, invalid arguments).
    UserError,
    /// Resource not found.
    NotFound,
    /// Configuration error.
    Configuration,
    /// Internal/system error.
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use deploygen_core::application::ApplicationError;
    use deploygen_core::domain::DomainError;

    fn missing(field: &'static str) -> CliError {
        CliError::Core(DomainError::MissingRequiredField { field }.into())
    }

    #[test]
    fn validation_errors_exit_two_with_usage() {
        let err = missing("redis_ip");
        assert_eq!(err.exit_code(), 2);
        let plain = err.format_plain(false);
        assert!(plain.contains("redis_ip"));
        assert!(plain.contains("Usage: deploygen generate"));
    }

    #[test]
    fn config_errors_exit_four() {
        let err = CliError::ConfigError {
            message: "bad toml".into(),
            source: None,
        };
        assert_eq!(err.exit_code(), 4);
        assert!(err.usage().is_none());
    }

    #[test]
    fn filesystem_errors_exit_one() {
        let err = CliError::Core(
            ApplicationError::FilesystemError {
                path: "/srv/x".into(),
                reason: "denied".into(),
            }
            .into(),
        );
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn missing_deploy_root_is_not_found() {
        let err = CliError::Core(
            ApplicationError::DeployRootMissing {
                path: "/nowhere".into(),
            }
            .into(),
        );
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn script_failures_list_services() {
        let err = CliError::ScriptsFailed {
            services: vec!["cmdb_apiserver".into(), "cmdb_toposerver".into()],
        };
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("cmdb_apiserver, cmdb_toposerver"));
    }

    #[test]
    fn io_error_conversion() {
        let err: CliError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, CliError::IoError { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn verbose_plain_output_omits_hint() {
        let err = missing("discovery");
        assert!(!err.format_plain(true).contains("--verbose for more details"));
    }
}
