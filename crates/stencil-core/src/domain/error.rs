// ============================================================================
// domain/error.rs - ARGUMENT AND TEMPLATE ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (parse failures are collected before being reported)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Argument Errors
    // ========================================================================
    #[error("Missing value for argument '{name}'")]
    MissingArgument { name: String },

    #[error("Invalid value for argument '{name}': {reason}")]
    InvalidArgument { name: String, reason: String },

    /// Every failure found while parsing one invocation.
    #[error("{}", join_failures(.0))]
    ParseFailures(Vec<DomainError>),

    // ========================================================================
    // Template Errors
    // ========================================================================
    #[error("Invalid template: {0}")]
    InvalidTemplate(String),

    #[error("Template '{template}' declares argument '{name}' more than once")]
    DuplicateArgument { template: String, name: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Path leaves the output directory: {path}")]
    PathEscapesRoot { path: String },
}

fn join_failures(failures: &[DomainError]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

impl DomainError {
    /// Flatten into individual failures.
    ///
    /// A `ParseFailures` yields its members; anything else yields itself.
    pub fn failures(&self) -> Vec<&DomainError> {
        match self {
            Self::ParseFailures(all) => all.iter().flat_map(|e| e.failures()).collect(),
            other => vec![other],
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingArgument { name } => vec![
                format!("Supply a value for '{}'", name),
                "Positional: pass values in declaration order, '_' keeps a default".into(),
                format!("Named: pass {}=<value>", name),
            ],
            Self::InvalidArgument { name, reason } => vec![
                format!("Check the value given for '{}': {}", name, reason),
                "Try: stencil list to see the arguments a template declares".into(),
            ],
            Self::ParseFailures(all) => {
                let mut out: Vec<String> = all.iter().flat_map(|e| e.suggestions()).collect();
                out.dedup();
                out
            }
            Self::InvalidTemplate(_) | Self::DuplicateArgument { .. } => vec![
                "The template manifest is malformed".into(),
                "Fix template.toml and try again".into(),
            ],
            Self::PathEscapesRoot { .. } => vec![
                "Argument values used in file names must not contain '..'".into(),
            ],
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingArgument { .. }
            | Self::InvalidArgument { .. }
            | Self::ParseFailures(_)
            | Self::PathEscapesRoot { .. } => ErrorCategory::Validation,
            Self::InvalidTemplate(_)
            | Self::DuplicateArgument { .. }
            | Self::AbsolutePathNotAllowed { .. } => ErrorCategory::Template,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Template,
}
