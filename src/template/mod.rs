//! Template resolution engine
//!
//! Rewrites any [`TemplateValue`] by replacing `{{expression}}` placeholders
//! with live values: stored variables, fake data, dates, random values,
//! environment variables and arithmetic.
//!
//! # Type preservation
//!
//! A string that is exactly one placeholder resolves to the typed value of
//! that placeholder, so `"{{count}}"` with `count = 42` becomes the number
//! `42`. A placeholder embedded in surrounding text is stringified instead:
//! `"id={{count}}"` becomes `"id=42"`.
//!
//! # Traversal
//!
//! Arrays are resolved element by element, objects key by key (keys are
//! templates too) and value by value. Traversal is depth-first in document
//! order, and every placeholder occurrence is evaluated exactly once, so two
//! `{{$random.uuid}}` placeholders produce two different values.
//!
//! The first failing placeholder aborts the whole call; no partially
//! resolved value is returned.
//!
//! # Example
//!
//! ```
//! use request_templates::store::VariableStore;
//! use request_templates::template::TemplateResolver;
//! use serde_json::json;
//!
//! let mut store = VariableStore::new();
//! store.set_global("baseUrl", json!("https://api.example.com"));
//! store.set_local("user", json!({"id": 7, "roles": ["admin", "dev"]}));
//!
//! let resolver = TemplateResolver::new(&store);
//! let request = json!({
//!     "url": "{{baseUrl}}/users/{{user.id}}",
//!     "body": {"id": "{{user.id}}", "role": "{{user.roles[1]}}", "note": "{{note|none}}"}
//! });
//!
//! assert_eq!(
//!     resolver.resolve(&request).unwrap(),
//!     json!({
//!         "url": "https://api.example.com/users/7",
//!         "body": {"id": 7, "role": "dev", "note": "none"}
//!     })
//! );
//! ```

pub mod error;
pub mod path;
pub mod placeholder;

pub use error::ResolveError;
pub use placeholder::{parse_literal, parse_placeholder, Expression, FunctionCall, Placeholder};

use crate::clock::{Clock, SystemClock};
use crate::config::{ConfigError, ResolverConfig};
use crate::environment::{EnvironmentSource, ProcessEnvironment};
use crate::faker::{FakeDataProvider, FakerCatalog};
use crate::functions::{FunctionNamespace, FunctionRegistry};
use crate::store::VariableStore;
use crate::value::{stringify, TemplateValue};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Map;
use std::sync::Arc;

/// Matches `{{...}}`, capturing the text between the delimiters.
static PLACEHOLDER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\{\{(.*?)\}\}").expect("Failed to compile placeholder regex"));

/// Resolves templates against a variable store.
///
/// The resolver only reads from the store. It is cheap to construct and
/// holds no state besides its configuration and function registry, so one
/// can be created per step.
#[derive(Debug, Clone)]
pub struct TemplateResolver<'a> {
    store: &'a VariableStore,
    functions: FunctionRegistry,
    config: ResolverConfig,
}

impl<'a> TemplateResolver<'a> {
    /// Creates a resolver with default configuration, the shared English
    /// fake-data catalog, the process environment and the system clock.
    pub fn new(store: &'a VariableStore) -> Self {
        Self::builder(store).build()
    }

    /// Starts a builder for substituting providers or configuration.
    pub fn builder(store: &'a VariableStore) -> TemplateResolverBuilder<'a> {
        TemplateResolverBuilder {
            store,
            config: ResolverConfig::default(),
            faker: None,
            environment: None,
            clock: None,
            extra: FunctionRegistry::new(),
        }
    }

    /// Creates a resolver from a prepared function registry.
    ///
    /// Useful when many resolvers share one registry. Fails if `config` does
    /// not validate.
    pub fn with_functions(
        store: &'a VariableStore,
        functions: FunctionRegistry,
        config: ResolverConfig,
    ) -> Result<Self, ConfigError> {
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(Self {
            store,
            functions,
            config,
        })
    }

    /// The store variables are read from.
    pub fn store(&self) -> &VariableStore {
        self.store
    }

    /// The active configuration.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// The function namespaces available to placeholders.
    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    /// Resolves every placeholder in `value`, returning a new value.
    ///
    /// The input is never modified.
    pub fn resolve(&self, value: &TemplateValue) -> Result<TemplateValue, ResolveError> {
        self.resolve_at(value, 0).inspect_err(|e| {
            log::debug!("template resolution failed: {}", e);
        })
    }

    /// Resolves a string template.
    ///
    /// A string consisting of a single placeholder (surrounding whitespace
    /// allowed) yields the placeholder's typed value; anything else yields a
    /// string with each placeholder replaced by its stringified value.
    /// An unclosed `{{` is kept as literal text.
    pub fn resolve_string(&self, text: &str) -> Result<TemplateValue, ResolveError> {
        if let Some(inner) = whole_placeholder(text) {
            return self.resolve_placeholder(inner);
        }
        if !text.contains("{{") {
            return Ok(TemplateValue::String(text.to_string()));
        }
        self.interpolate(text).map(TemplateValue::String)
    }

    /// Resolves a string template and stringifies the result.
    ///
    /// Suited to URLs and header values, which are always text.
    pub fn resolve_str(&self, text: &str) -> Result<String, ResolveError> {
        self.resolve_string(text).map(|value| stringify(&value))
    }

    /// Evaluates the inside of one placeholder, e.g. `user.id|0`.
    pub fn resolve_placeholder(&self, text: &str) -> Result<TemplateValue, ResolveError> {
        let placeholder = parse_placeholder(text)?;

        match placeholder.expression {
            Expression::Function(call) => self.functions.dispatch(&call),
            Expression::Variable(segments) => {
                let (first, rest) = segments
                    .split_first()
                    .ok_or_else(|| ResolveError::malformed(text, "empty variable path"))?;

                let found = self
                    .store
                    .get(first)
                    .and_then(|root| path::navigate(root, rest));

                match (found, placeholder.default) {
                    (Some(value), _) => Ok(value.clone()),
                    (None, Some(default)) => {
                        log::trace!("'{}' not found, using default", placeholder.source);
                        Ok(default)
                    }
                    (None, None) => Err(ResolveError::UnresolvedVariable(placeholder.source)),
                }
            }
        }
    }

    /// `depth` counts the containers enclosing `value`.
    fn resolve_at(&self, value: &TemplateValue, depth: usize) -> Result<TemplateValue, ResolveError> {
        match value {
            TemplateValue::Null | TemplateValue::Bool(_) | TemplateValue::Number(_) => {
                Ok(value.clone())
            }
            TemplateValue::String(text) => self.resolve_string(text),
            TemplateValue::Array(items) => {
                self.check_depth(depth)?;
                items
                    .iter()
                    .map(|item| self.resolve_at(item, depth + 1))
                    .collect::<Result<Vec<_>, _>>()
                    .map(TemplateValue::Array)
            }
            TemplateValue::Object(entries) => {
                self.check_depth(depth)?;
                let mut resolved = Map::new();
                for (key, item) in entries {
                    let key = self.resolve_str(key)?;
                    let item = self.resolve_at(item, depth + 1)?;
                    resolved.insert(key, item);
                }
                Ok(TemplateValue::Object(resolved))
            }
        }
    }

    fn check_depth(&self, depth: usize) -> Result<(), ResolveError> {
        if depth >= self.config.max_depth {
            Err(ResolveError::DepthExceeded(self.config.max_depth))
        } else {
            Ok(())
        }
    }

    /// Replaces each placeholder occurrence with its stringified value.
    fn interpolate(&self, text: &str) -> Result<String, ResolveError> {
        let mut result = String::with_capacity(text.len() + text.len() / 4);
        let mut last_match_end = 0;

        for caps in PLACEHOLDER_REGEX.captures_iter(text) {
            let Some(body) = caps.get(1) else {
                continue;
            };

            // A stray `{{` earlier in the match stays literal; the
            // placeholder opens at the last `{{` before `}}`.
            let open = match body.as_str().rfind("{{") {
                Some(offset) => body.start() + offset,
                None => body.start() - 2,
            };
            let inner = &text[open + 2..body.end()];
            let escaped = text[last_match_end..open].ends_with('\\');

            if escaped && self.config.allow_escapes {
                result.push_str(&text[last_match_end..open - 1]);
                result.push_str(&text[open..body.end() + 2]);
            } else {
                result.push_str(&text[last_match_end..open]);
                result.push_str(&stringify(&self.resolve_placeholder(inner)?));
            }

            last_match_end = body.end() + 2;
        }

        result.push_str(&text[last_match_end..]);
        Ok(result)
    }
}

/// Returns the inner expression if `text` is exactly one placeholder.
fn whole_placeholder(text: &str) -> Option<&str> {
    let inner = text.trim().strip_prefix("{{")?.strip_suffix("}}")?;
    if inner.contains("{{") || inner.contains("}}") {
        return None;
    }
    Some(inner)
}

/// Builder for [`TemplateResolver`].
pub struct TemplateResolverBuilder<'a> {
    store: &'a VariableStore,
    config: ResolverConfig,
    faker: Option<Arc<dyn FakeDataProvider>>,
    environment: Option<Arc<dyn EnvironmentSource>>,
    clock: Option<Arc<dyn Clock>>,
    extra: FunctionRegistry,
}

impl<'a> TemplateResolverBuilder<'a> {
    /// Sets the configuration, rejecting settings that do not validate.
    pub fn config(mut self, config: ResolverConfig) -> Result<Self, ConfigError> {
        config.validate().map_err(ConfigError::Invalid)?;
        self.config = config;
        Ok(self)
    }

    /// Sets the fake-data provider behind `$faker`.
    pub fn faker(mut self, provider: impl FakeDataProvider + 'static) -> Self {
        self.faker = Some(Arc::new(provider));
        self
    }

    /// Sets the environment source behind `$env`.
    pub fn environment(mut self, source: impl EnvironmentSource + 'static) -> Self {
        self.environment = Some(Arc::new(source));
        self
    }

    /// Sets the clock behind `$date`.
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Arc::new(clock));
        self
    }

    /// Adds a custom namespace, replacing a built-in one of the same name.
    pub fn function(mut self, namespace: impl FunctionNamespace + 'static) -> Self {
        self.extra.register(namespace);
        self
    }

    /// Builds the resolver.
    pub fn build(self) -> TemplateResolver<'a> {
        let faker: Arc<dyn FakeDataProvider> = match self.faker {
            Some(faker) => faker,
            None => FakerCatalog::shared_english(),
        };
        let mut functions = FunctionRegistry::standard(
            &self.config,
            faker,
            self.environment
                .unwrap_or_else(|| Arc::new(ProcessEnvironment)),
            self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
        );
        functions.extend(self.extra);

        TemplateResolver {
            store: self.store,
            functions,
            config: self.config,
        }
    }
}
