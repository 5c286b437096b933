//! Error types for template resolution.

use thiserror::Error;

/// Errors raised while resolving a template.
///
/// Any of these aborts the whole `resolve` call; no partially substituted
/// value is ever returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ResolveError {
    /// A variable path had no store entry and no default.
    #[error("Unresolved variable: {0}")]
    UnresolvedVariable(String),

    /// A `$faker.*` path could not be navigated.
    #[error("Invalid function path '{path}': {reason}")]
    InvalidFunctionPath {
        /// The dotted path as written in the placeholder
        path: String,
        /// Why navigation stopped
        reason: String,
    },

    /// Wrong arguments for a built-in function, or an unknown function name.
    #[error("Invalid function call '{call}': {reason}")]
    InvalidFunctionCall {
        /// The call as written in the placeholder
        call: String,
        /// What was wrong with it
        reason: String,
    },

    /// `$env.NAME` referenced a variable that is not set.
    #[error("Environment variable not found: {0}")]
    UndefinedEnvironmentVariable(String),

    /// The placeholder text is neither a function call nor a variable path.
    #[error("Malformed placeholder '{placeholder}': {reason}")]
    MalformedPlaceholder {
        /// The placeholder expression
        placeholder: String,
        /// What could not be parsed
        reason: String,
    },

    /// The template nests deeper than the configured limit.
    #[error("Template nesting exceeds maximum depth of {0}")]
    DepthExceeded(usize),
}

impl ResolveError {
    pub(crate) fn invalid_call(call: impl Into<String>, reason: impl Into<String>) -> Self {
        ResolveError::InvalidFunctionCall {
            call: call.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_path(path: impl Into<String>, reason: impl Into<String>) -> Self {
        ResolveError::InvalidFunctionPath {
            path: path.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(placeholder: impl Into<String>, reason: impl Into<String>) -> Self {
        ResolveError::MalformedPlaceholder {
            placeholder: placeholder.into(),
            reason: reason.into(),
        }
    }
}
