//! Application layer errors.
//!
//! These errors represent failures in orchestration, not in the link model.
//! Link model errors are `DomainError` from `crate::domain`.

use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while assembling and running a render pass.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// A registered extension breaks a declared ordering constraint.
    #[error("Extension '{extension}' must be ordered {constraint} '{other}'")]
    OrderingViolation {
        extension: String,
        other: String,
        constraint: &'static str,
    },

    /// Two factories registered under the same id.
    #[error("Extension '{id}' is already registered")]
    DuplicateExtension { id: String },

    /// Input document could not be found.
    #[error("Document not found: {path}")]
    DocumentNotFound { path: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::OrderingViolation {
                extension,
                other,
                constraint,
            } => vec![
                format!("'{}' declares it must run {} '{}'", extension, constraint, other),
                "Register extensions in an order that satisfies their constraints".into(),
                "Try: relink extensions to see the declared constraints".into(),
            ],
            Self::DuplicateExtension { id } => vec![
                format!("Extension id '{}' is used twice", id),
                "Give each resolver factory a unique id".into(),
            ],
            Self::DocumentNotFound { path } => vec![
                format!("Nothing to render at: {}", path),
                "Pass a Markdown file or a directory containing .md files".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::OrderingViolation { .. } | Self::DuplicateExtension { .. } => {
                ErrorCategory::Conflict
            }
            Self::DocumentNotFound { .. } => ErrorCategory::NotFound,
        }
    }
}
