//! Environment accessors for the `$env` namespace
//!
//! `{{$env.NAME}}` looks `NAME` up through an [`EnvironmentSource`] handed to
//! the resolver at construction time. The default source is the process
//! environment; tests substitute a plain map so they never depend on ambient
//! state.
//!
//! Besides the process environment, variables can come from a `.env` file
//! ([`DotenvFile`]) or from several sources layered in priority order
//! ([`LayeredEnvironment`]).
//!
//! # Example
//!
//! ```
//! use request_templates::environment::{EnvironmentSource, LayeredEnvironment};
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! let mut overrides = HashMap::new();
//! overrides.insert("API_HOST".to_string(), "localhost".to_string());
//!
//! let env = LayeredEnvironment::new()
//!     .with(Arc::new(overrides))
//!     .with_process_environment();
//!
//! assert_eq!(env.var("API_HOST"), Some("localhost".to_string()));
//! ```

pub mod dotenv;

use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

pub use dotenv::DotenvFile;

/// Errors raised while loading an environment source.
#[derive(Debug, Error)]
pub enum EnvError {
    /// The `.env` file could not be read or has a malformed line
    #[error("Failed to load .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
}

/// Read-only, string-keyed lookup consulted by `$env.NAME`.
pub trait EnvironmentSource: Send + Sync {
    /// Returns the value of `name`, or `None` if it is not defined.
    fn var(&self, name: &str) -> Option<String>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl EnvironmentSource for ProcessEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl EnvironmentSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// Consults several sources in order; the first one defining a name wins.
#[derive(Clone, Default)]
pub struct LayeredEnvironment {
    layers: Vec<Arc<dyn EnvironmentSource>>,
}

impl LayeredEnvironment {
    /// Creates a layered environment with no sources.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a source with lower priority than the ones already added.
    pub fn with(mut self, source: Arc<dyn EnvironmentSource>) -> Self {
        self.layers.push(source);
        self
    }

    /// Appends the process environment as the next layer.
    pub fn with_process_environment(self) -> Self {
        self.with(Arc::new(ProcessEnvironment))
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Checks if there are no layers.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }
}

impl EnvironmentSource for LayeredEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        self.layers.iter().find_map(|layer| layer.var(name))
    }
}

impl std::fmt::Debug for LayeredEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayeredEnvironment")
            .field("layers", &self.layers.len())
            .finish()
    }
}
