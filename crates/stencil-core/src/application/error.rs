//! Application layer errors.
//!
//! These errors represent failures in orchestration, not argument or
//! template rules. Those are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The template does not offer the requested operation.
    #[error("Template '{template}' does not support operation '{operation}'")]
    UnsupportedOperation { operation: String, template: String },

    /// One file could not be rendered or written.
    #[error("Failed to render {file}: {reason}")]
    RenderFailure { file: PathBuf, reason: String },

    /// The rendering engine rejected a template body.
    #[error("Template rendering failed: {reason}")]
    RenderingFailed { reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// No answer could be read from the user.
    #[error("Could not read user input: {reason}")]
    PromptFailed { reason: String },

    /// Adapter state access failed (lock poisoned, etc.).
    #[error("Adapter state is unavailable (lock poisoned)")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnsupportedOperation { template, .. } => vec![
                format!("Template '{}' does not declare this capability", template),
                "Try: stencil list to see what each template supports".into(),
            ],
            Self::FilesystemError { path, .. } | Self::RenderFailure { file: path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::PromptFailed { .. } => vec![
                "Input is required but none could be read".into(),
                "Pass every value on the command line when running non-interactively".into(),
            ],
            Self::StoreLockError => vec!["Try again in a moment".into()],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnsupportedOperation { .. } => ErrorCategory::Validation,
            Self::PromptFailed { .. } => ErrorCategory::Validation,
            Self::RenderFailure { .. } | Self::RenderingFailed { .. } => ErrorCategory::Internal,
            Self::FilesystemError { .. } | Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
