//! Error handling for the relink CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Proper error chaining
//! - Exit code mapping

use std::error::Error;
use std::path::PathBuf;

use owo_colors::{OwoColorize, Style};
use thiserror::Error;

use relink_core::error::RelinkError;

// Re-export so callers only need `use crate::error::*`.
pub use relink_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    /// A directory was given to `render` without `--output`.
    #[error("Rendering the directory {path} needs an output directory")]
    OutputRequired { path: PathBuf },

    /// `--output` names an existing file where a directory is needed.
    #[error("Output path {path} exists and is not a directory")]
    OutputNotDirectory { path: PathBuf },

    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// `config get` was asked for a key that does not exist.
    #[error("Unknown config key '{key}'")]
    UnknownConfigKey { key: String },

    /// An error propagated from `relink-core` or its adapters.
    #[error("Rendering failed: {0}")]
    Core(#[from] RelinkError),

    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
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
            Self::OutputRequired { path } => vec![
                format!(
                    "Pass an output directory: relink render {} -o site",
                    path.display()
                ),
                "Only single files can be rendered to stdout".into(),
            ],

            Self::OutputNotDirectory { path } => vec![
                format!("'{}' is a file", path.display()),
                "Choose a different --output directory".into(),
            ],

            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {}", message),
                "Check the file shown by 'relink config path'".into(),
                "Use 'relink init --force' to recreate a default config".into(),
            ],

            Self::UnknownConfigKey { key } => vec![
                format!("'{}' is not a configuration key", key),
                "List every key with 'relink config list'".into(),
                "Example: relink config get resolver.base_url".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {}", message),
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::OutputRequired { .. } => ErrorCategory::UserError,
            Self::OutputNotDirectory { .. } => ErrorCategory::UserError,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::UnknownConfigKey { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation | CoreCategory::Conflict => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
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

    /// Report for a terminal: red headline, dimmed causes, yellow suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        self.report(verbose, true)
    }

    /// Same report without ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        self.report(verbose, false)
    }

    fn report(&self, verbose: bool, color: bool) -> String {
        let paint = |text: &str, style: Style| {
            if color {
                text.style(style).to_string()
            } else {
                text.to_owned()
            }
        };

        let mut out = format!(
            "\nerror[{}]: {}\n",
            paint(self.category().label(), Style::new().red().bold()),
            paint(&self.to_string(), Style::new().red())
        );

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                out.push_str(&format!(
                    "  caused by: {}\n",
                    paint(&err.to_string(), Style::new().dimmed())
                ));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str(&format!("\n{}\n", paint("Suggestions:", Style::new().yellow().bold())));
            for suggestion in &suggestions {
                out.push_str(&format!("  - {suggestion}\n"));
            }
        }

        if !verbose && self.source().is_some() {
            out.push_str(&format!(
                "\n{}\n",
                paint("Run again with -v to see the underlying cause.", Style::new().dimmed())
            ));
        }

        out
    }

    /// Emit a single tracing event describing the failure.
    pub fn log(&self) {
        let category = self.category().label();
        let exit_code = self.exit_code();
        let cause = self.source().map(ToString::to_string);
        let cause = cause.as_deref().unwrap_or("");
        match self.category() {
            ErrorCategory::UserError | ErrorCategory::NotFound => {
                tracing::warn!(category, exit_code, cause, error = %self, "Command failed")
            }
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!(category, exit_code, cause, error = %self, "Command failed")
            }
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

impl ErrorCategory {
    /// Short tag shown in the error headline.
    pub fn label(self) -> &'static str {
        match self {
            Self::UserError => "usage",
            Self::NotFound => "not-found",
            Self::Configuration => "config",
            Self::Internal => "internal",
        }
    }
}

/// Extension trait to convert foreign error types into [`CliError`] at
/// call-sites with a descriptive context message.
///
/// Two concrete impls are provided:
/// - `Result<T, std::io::Error>` → `CliError::IoError`
/// - `Result<T, RelinkError>`    → `CliError::Core`
pub trait IntoCli<T> {
    /// Convert to `CliResult` attaching a human-readable context message.
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

impl<T> IntoCli<T> for Result<T, RelinkError> {
    /// Core errors already carry their context; the message is only logged.
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| {
            tracing::debug!(context = %f().into(), "Core operation failed");
            CliError::Core(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relink_core::{
        application::ApplicationError,
        domain::DomainError,
    };
    use std::io;

    #[test]
    fn output_required_suggests_output_flag() {
        let err = CliError::OutputRequired {
            path: PathBuf::from("docs"),
        };
        assert!(err.suggestions().iter().any(|s| s.contains("-o site")));
    }

    #[test]
    fn unknown_key_points_at_config_list() {
        let err = CliError::UnknownConfigKey {
            key: "nope".into(),
        };
        assert!(err.suggestions().iter().any(|s| s.contains("config list")));
    }

    #[test]
    fn core_suggestions_are_forwarded() {
        let core: RelinkError = ApplicationError::DuplicateExtension {
            id: "wiki-links".into(),
        }
        .into();
        let expected = core.suggestions();
        assert_eq!(CliError::Core(core).suggestions(), expected);
    }

    #[test]
    fn exit_code_user_error() {
        assert_eq!(
            CliError::OutputRequired {
                path: PathBuf::from("docs")
            }
            .exit_code(),
            2
        );
        let invalid_base: RelinkError = DomainError::InvalidBaseUrl {
            url: "x".into(),
            reason: "relative".into(),
        }
        .into();
        assert_eq!(CliError::Core(invalid_base).exit_code(), 2);
    }

    #[test]
    fn exit_code_not_found() {
        let missing: RelinkError = ApplicationError::DocumentNotFound {
            path: "docs".into(),
        }
        .into();
        assert_eq!(CliError::Core(missing).exit_code(), 3);
    }

    #[test]
    fn exit_code_configuration() {
        assert_eq!(
            CliError::ConfigError {
                message: "x".into(),
                source: None
            }
            .exit_code(),
            4
        );
        assert_eq!(CliError::UnknownConfigKey { key: "x".into() }.exit_code(), 4);
    }

    #[test]
    fn exit_code_internal() {
        assert_eq!(
            CliError::IoError {
                message: "x".into(),
                source: io::Error::other("e"),
            }
            .exit_code(),
            1
        );
    }

    #[test]
    fn format_plain_contains_error_header() {
        let err = CliError::OutputNotDirectory {
            path: PathBuf::from("/tmp/x"),
        };
        let s = err.format_plain(false);
        assert!(s.contains("error[usage]: Output path /tmp/x exists and is not a directory"));
        assert!(s.contains("Suggestions:"));
        assert!(s.contains("  - Choose a different --output directory"));
        assert!(!s.contains("\u{1b}["));
        assert!(!s.contains("Run again"));
    }

    #[test]
    fn format_plain_hints_at_hidden_cause() {
        let err = CliError::IoError {
            message: "reading a.md".into(),
            source: io::Error::other("disk on fire"),
        };
        let s = err.format_plain(false);
        assert!(s.starts_with("\nerror[internal]: I/O error: reading a.md"));
        assert!(!s.contains("disk on fire"));
        assert!(s.contains("Run again with -v"));
    }

    #[test]
    fn format_colored_uses_ansi() {
        let err = CliError::UnknownConfigKey { key: "x".into() };
        let s = err.format_colored(false);
        assert!(s.contains("\u{1b}["));
        assert!(s.contains("config"));
    }

    #[test]
    fn format_plain_verbose_shows_cause() {
        let err = CliError::IoError {
            message: "reading a.md".into(),
            source: io::Error::other("disk on fire"),
        };
        let s = err.format_plain(true);
        assert!(s.contains("caused by: disk on fire"));
        assert!(!s.contains("Run again with -v"));
    }

    #[test]
    fn into_cli_io_error() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let cli: CliResult<()> = result.with_cli_context(|| "reading config");
        assert!(matches!(cli, Err(CliError::IoError { ref message, .. }) if message == "reading config"));
    }

    #[test]
    fn into_cli_core_error() {
        let result: Result<(), RelinkError> = Err(ApplicationError::DuplicateExtension {
            id: "wiki-links".into(),
        }
        .into());
        let cli = result.with_cli_context(|| "rendering");
        assert!(matches!(cli, Err(CliError::Core(_))));
    }
}
