//! Built-in function namespaces
//!
//! A placeholder starting with `$` is a function call, `$namespace.member`
//! or `$namespace.member(args...)`. The namespace name selects an evaluator
//! from a [`FunctionRegistry`]; the evaluator interprets the member and its
//! arguments.
//!
//! | Namespace | Members |
//! |-----------|---------|
//! | `faker`   | dotted path into the fake-data provider |
//! | `math`    | `random`, `round`, `floor`, `ceil`, `abs` |
//! | `date`    | `now`, `timestamp`, `timestampMs`, `format`, `add` |
//! | `random`  | `uuid`, `string`, `number`, `boolean`, `pick` |
//! | `env`     | any environment variable name |
//!
//! New namespaces are added by implementing [`FunctionNamespace`] and
//! registering it; the dispatcher itself never changes.

pub mod date;
pub mod env;
pub mod faker;
pub mod math;
pub mod random;

pub use date::DateFunctions;
pub use env::EnvFunctions;
pub use faker::FakerFunctions;
pub use math::MathFunctions;
pub use random::RandomFunctions;

use crate::clock::Clock;
use crate::config::ResolverConfig;
use crate::environment::EnvironmentSource;
use crate::faker::FakeDataProvider;
use crate::template::{FunctionCall, ResolveError};
use crate::value::TemplateValue;
use std::collections::HashMap;
use std::sync::Arc;

/// Evaluator for one `$namespace`.
pub trait FunctionNamespace: Send + Sync {
    /// Namespace name as written after `$`, e.g. `"math"`.
    fn name(&self) -> &str;

    /// Evaluates a call whose namespace is this one.
    ///
    /// Each invocation produces a fresh value; callers never cache results.
    fn call(&self, call: &FunctionCall) -> Result<TemplateValue, ResolveError>;
}

/// Maps namespace names to their evaluators.
///
/// Cloning is cheap; evaluators are shared.
#[derive(Clone, Default)]
pub struct FunctionRegistry {
    namespaces: HashMap<String, Arc<dyn FunctionNamespace>>,
}

impl FunctionRegistry {
    /// Creates a registry with no namespaces.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with the five built-in namespaces.
    pub fn standard(
        config: &ResolverConfig,
        faker: Arc<dyn FakeDataProvider>,
        environment: Arc<dyn EnvironmentSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::new()
            .with(FakerFunctions::new(faker))
            .with(MathFunctions)
            .with(DateFunctions::new(clock, config.date_format))
            .with(RandomFunctions::new(&config.random_string_charset))
            .with(EnvFunctions::new(environment))
    }

    /// Registers a namespace, returning the one it replaced.
    pub fn register(
        &mut self,
        namespace: impl FunctionNamespace + 'static,
    ) -> Option<Arc<dyn FunctionNamespace>> {
        let name = namespace.name().to_string();
        self.namespaces.insert(name, Arc::new(namespace))
    }

    /// Registers a namespace, builder style.
    pub fn with(mut self, namespace: impl FunctionNamespace + 'static) -> Self {
        self.register(namespace);
        self
    }

    /// Adds every namespace of `other`, replacing same-named ones.
    pub fn extend(&mut self, other: FunctionRegistry) {
        self.namespaces.extend(other.namespaces);
    }

    /// Checks if a namespace is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.namespaces.contains_key(name)
    }

    /// Registered namespace names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.namespaces.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Routes a call to its namespace.
    pub fn dispatch(&self, call: &FunctionCall) -> Result<TemplateValue, ResolveError> {
        let namespace = self
            .namespaces
            .get(&call.namespace)
            .ok_or_else(|| call.error(format!("unknown function namespace '{}'", call.namespace)))?;

        log::trace!("evaluating {}", call.source);
        namespace.call(call)
    }
}

impl std::fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("namespaces", &self.names())
            .finish()
    }
}

/// Fails unless the call was written without arguments.
pub(crate) fn expect_no_args(call: &FunctionCall) -> Result<(), ResolveError> {
    if call.arity() == 0 {
        Ok(())
    } else {
        Err(call.error(format!("'{}' takes no arguments", call.member)))
    }
}

/// Error for a member the namespace does not define.
pub(crate) fn unknown_member(call: &FunctionCall) -> ResolveError {
    call.error(format!(
        "unknown function '{}' in namespace '{}'",
        call.member, call.namespace
    ))
}
