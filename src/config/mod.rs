//! Configuration loading for the template resolver.
//!
//! Settings live under the `"template-resolver"` key of a JSON settings
//! document and are merged with defaults. The loaded configuration is passed
//! to the resolver explicitly; there is no process-wide instance.

pub mod schema;

pub use schema::{DateFormat, ResolverConfig, ALPHANUMERIC};

use serde_json::Value;
use thiserror::Error;

/// Key under which resolver settings are read.
pub const SETTINGS_KEY: &str = "template-resolver";

/// Errors that can occur while loading configuration.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A setting has a value outside its allowed range.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Loads resolver configuration from a settings document.
///
/// Settings that fail to deserialize are logged and replaced by defaults;
/// settings that deserialize but fail validation are an error.
///
/// # Example
///
/// ```
/// use request_templates::config::load_config;
/// use serde_json::json;
///
/// let settings = json!({
///     "template-resolver": {
///         "maxDepth": 16,
///         "dateFormat": "timestamp"
///     }
/// });
///
/// let config = load_config(Some(settings)).unwrap();
/// assert_eq!(config.max_depth, 16);
/// ```
pub fn load_config(settings_json: Option<Value>) -> Result<ResolverConfig, ConfigError> {
    let config = settings_json
        .as_ref()
        .and_then(|settings| settings.get(SETTINGS_KEY))
        .map(|section| {
            serde_json::from_value::<ResolverConfig>(section.clone()).unwrap_or_else(|e| {
                log::warn!(
                    "failed to parse {} settings: {}. Using defaults.",
                    SETTINGS_KEY,
                    e
                );
                ResolverConfig::default()
            })
        })
        .unwrap_or_default();

    config.validate().map_err(ConfigError::Invalid)?;
    Ok(config)
}
