//! `$env` namespace: `{{$env.NAME}}` reads `NAME` from the injected
//! environment source. Unset variables are an error, never an empty string.

use super::{expect_no_args, FunctionNamespace};
use crate::environment::EnvironmentSource;
use crate::template::{FunctionCall, ResolveError};
use crate::value::TemplateValue;
use std::sync::Arc;

/// Environment lookups through an [`EnvironmentSource`].
#[derive(Clone)]
pub struct EnvFunctions {
    source: Arc<dyn EnvironmentSource>,
}

impl EnvFunctions {
    /// Creates the namespace over `source`.
    pub fn new(source: Arc<dyn EnvironmentSource>) -> Self {
        Self { source }
    }
}

impl FunctionNamespace for EnvFunctions {
    fn name(&self) -> &str {
        "env"
    }

    fn call(&self, call: &FunctionCall) -> Result<TemplateValue, ResolveError> {
        expect_no_args(call)?;
        self.source
            .var(&call.member)
            .map(TemplateValue::String)
            .ok_or_else(|| ResolveError::UndefinedEnvironmentVariable(call.member.clone()))
    }
}
