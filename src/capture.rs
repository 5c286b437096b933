//! Capture directives for extracting values from response bodies.
//!
//! A capture directive takes a value out of a JSON response and stores it as
//! a variable, so later requests can reference it in templates.
//!
//! # Syntax
//!
//! ```text
//! # @capture variableName = path
//! # @capture global variableName = path
//! # @capture local variableName = path
//! ```
//!
//! The path uses the same grammar as placeholder variables, optionally
//! prefixed with `$.`: `$.token`, `user.id`, `$.items[0].id`. Without an
//! explicit scope the value goes to the local scope.
//!
//! # Examples
//!
//! ```
//! use request_templates::capture::{apply_captures, parse_capture_directives};
//! use request_templates::store::VariableStore;
//! use serde_json::json;
//!
//! let directives = parse_capture_directives(
//!     "# @capture global authToken = $.token\n# @capture userId = $.user.id",
//! );
//! let body = json!({"token": "abc", "user": {"id": 7}});
//!
//! let mut store = VariableStore::new();
//! apply_captures(&mut store, &directives, &body).unwrap();
//!
//! assert_eq!(store.get_global("authToken"), Some(&json!("abc")));
//! assert_eq!(store.get_local("userId"), Some(&json!(7)));
//! ```

use crate::store::{Scope, VariableStore};
use crate::template::path::{navigate, parse_path};
use crate::value::TemplateValue;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Matches `# @capture [scope] name = path`.
static CAPTURE_DIRECTIVE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*(?:#|//)\s*@capture\s+(?:(global|local)\s+)?([a-zA-Z_][a-zA-Z0-9_]*)\s*=\s*(.+?)\s*$",
    )
    .expect("Failed to compile capture directive regex")
});

/// Errors raised while applying capture directives.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CaptureError {
    /// The path is not valid path syntax
    #[error("Invalid capture path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// The path does not exist in the response body
    #[error("Capture path '{path}' not found for variable '{variable}'")]
    PathNotFound { variable: String, path: String },
}

/// A parsed `@capture` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureDirective {
    /// Variable that receives the captured value
    pub variable_name: String,
    /// Scope the variable is written to
    pub scope: Scope,
    /// Path into the response body, as written
    pub path: String,
}

impl CaptureDirective {
    /// Creates a directive writing to the local scope.
    pub fn new(variable_name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            variable_name: variable_name.into(),
            scope: Scope::Local,
            path: path.into(),
        }
    }

    /// Sets the target scope.
    pub fn in_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    /// Path segments with any leading `$` or `$.` removed.
    pub fn segments(&self) -> Result<Vec<String>, CaptureError> {
        let trimmed = self.path.trim();
        let relative = trimmed
            .strip_prefix("$.")
            .or_else(|| trimmed.strip_prefix('$'))
            .unwrap_or(trimmed);

        if relative.is_empty() {
            return Ok(Vec::new());
        }

        parse_path(relative).map_err(|e| CaptureError::InvalidPath {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }

    /// Extracts this directive's value from a response body.
    ///
    /// A path of `$` alone captures the whole body.
    pub fn extract(&self, body: &TemplateValue) -> Result<TemplateValue, CaptureError> {
        let segments = self.segments()?;
        navigate(body, &segments)
            .cloned()
            .ok_or_else(|| CaptureError::PathNotFound {
                variable: self.variable_name.clone(),
                path: self.path.clone(),
            })
    }
}

/// Parses a capture directive from one comment line.
///
/// Returns `None` for lines that are not capture directives.
pub fn parse_capture_directive(line: &str) -> Option<CaptureDirective> {
    let captures = CAPTURE_DIRECTIVE_REGEX.captures(line)?;

    let scope = captures
        .get(1)
        .and_then(|m| Scope::from_name(m.as_str()))
        .unwrap_or(Scope::Local);
    let variable_name = captures.get(2)?.as_str();
    let path = captures.get(3)?.as_str();

    Some(CaptureDirective::new(variable_name, path).in_scope(scope))
}

/// Parses every capture directive in a block of text, in line order.
pub fn parse_capture_directives(text: &str) -> Vec<CaptureDirective> {
    text.lines().filter_map(parse_capture_directive).collect()
}

/// Applies directives in order, writing each captured value to the store.
///
/// Stops at the first directive whose path cannot be extracted; values
/// captured by earlier directives stay in the store.
pub fn apply_captures(
    store: &mut VariableStore,
    directives: &[CaptureDirective],
    body: &TemplateValue,
) -> Result<usize, CaptureError> {
    for directive in directives {
        let value = directive.extract(body).inspect_err(|e| {
            log::warn!("{}", e);
        })?;
        log::debug!(
            "captured '{}' into {} scope",
            directive.variable_name,
            directive.scope
        );
        store.set(directive.scope, directive.variable_name.clone(), value);
    }
    Ok(directives.len())
}
