//! Configuration schema for the template resolver.

use serde::{Deserialize, Serialize};

/// Alphanumeric characters used by `$random.string(N)` unless configured.
pub const ALPHANUMERIC: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Resolver settings.
///
/// Missing fields fall back to their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolverConfig {
    /// Maximum nesting depth of arrays and objects in a template.
    ///
    /// Deeper templates fail with `DepthExceeded`. Defaults to 64; must be > 0.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Output format of `$date.now` and `$date.add`. Defaults to ISO 8601.
    #[serde(default)]
    pub date_format: DateFormat,

    /// Whether `\{{` produces a literal `{{` instead of opening a placeholder.
    /// Defaults to true.
    #[serde(default = "default_allow_escapes")]
    pub allow_escapes: bool,

    /// Characters `$random.string(N)` draws from. Must not be empty.
    #[serde(default = "default_random_string_charset")]
    pub random_string_charset: String,
}

/// Textual format for instants produced by the `$date` namespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateFormat {
    /// `2024-01-31T12:00:00.000Z`
    #[default]
    Iso8601,
    /// `Wed, 31 Jan 2024 12:00:00 +0000`
    Rfc2822,
    /// Unix seconds as a string, `1706702400`
    Timestamp,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            date_format: DateFormat::default(),
            allow_escapes: default_allow_escapes(),
            random_string_charset: default_random_string_charset(),
        }
    }
}

impl ResolverConfig {
    /// Validates the configuration.
    ///
    /// Returns a description of the first invalid setting.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_depth == 0 {
            return Err("maxDepth must be greater than 0".to_string());
        }

        if self.random_string_charset.is_empty() {
            return Err("randomStringCharset must not be empty".to_string());
        }

        Ok(())
    }
}

fn default_max_depth() -> usize {
    64
}

fn default_allow_escapes() -> bool {
    true
}

fn default_random_string_charset() -> String {
    ALPHANUMERIC.to_string()
}
