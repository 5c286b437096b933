//! `.env` file source
//!
//! Parsing is delegated to `dotenvy`, so the usual `.env` syntax applies:
//! `#` comments (including trailing ones on unquoted values), an optional
//! `export` prefix, single-quoted literals, double-quoted values with
//! escapes, and `${VAR}` expansion. Nothing is written to the process
//! environment.

use super::{EnvError, EnvironmentSource};
use std::collections::HashMap;
use std::path::Path;

/// Variables parsed from a `.env` file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DotenvFile {
    variables: HashMap<String, String>,
}

impl DotenvFile {
    /// Reads and parses a `.env` file.
    pub fn load(path: &Path) -> Result<Self, EnvError> {
        log::debug!("loading .env file from {}", path.display());
        Self::collect(dotenvy::from_path_iter(path)?)
    }

    /// Parses `.env` content.
    ///
    /// The first malformed line is an error.
    pub fn parse(content: &str) -> Result<Self, EnvError> {
        Self::collect(dotenvy::from_read_iter(content.as_bytes()))
    }

    fn collect<I>(entries: I) -> Result<Self, EnvError>
    where
        I: Iterator<Item = Result<(String, String), dotenvy::Error>>,
    {
        let variables = entries.collect::<Result<HashMap<_, _>, _>>()?;
        Ok(Self { variables })
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Checks if the file defined no variables.
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

impl EnvironmentSource for DotenvFile {
    fn var(&self, name: &str) -> Option<String> {
        self.variables.get(name).cloned()
    }
}
