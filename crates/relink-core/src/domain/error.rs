// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (resolver factories may hand the same error to several passes)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid extension id '{id}': {reason}")]
    InvalidExtensionId { id: String, reason: String },

    #[error("Invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error("Invalid context property '{raw}': expected key=value")]
    InvalidProperty { raw: String },
}

impl DomainError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidExtensionId { id, .. } => vec![
                format!("'{}' cannot be used as an extension id", id),
                "Use lowercase letters, digits, '-', '_', '.' or ':'".into(),
                "Examples: base-url, wiki-links, docs:api".into(),
            ],
            Self::InvalidBaseUrl { url, .. } => vec![
                format!("'{}' is not an absolute URL", url),
                "Include the scheme, e.g. https://example.org/docs/".into(),
                "End the base with '/' to join paths beneath it".into(),
            ],
            Self::InvalidProperty { raw } => vec![
                format!("Could not parse '{}'", raw),
                "Pass properties as -D key=value".into(),
            ],
        }
    }

    /// Categorize error for display purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidExtensionId { .. }
            | Self::InvalidBaseUrl { .. }
            | Self::InvalidProperty { .. } => ErrorCategory::Validation,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
}
