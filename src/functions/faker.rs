//! `$faker` namespace: dotted navigation into a [`FakeDataProvider`].

use super::{expect_no_args, FunctionNamespace};
use crate::faker::{FakeDataProvider, FakerNode};
use crate::template::{path, FunctionCall, ResolveError};
use crate::value::TemplateValue;
use std::sync::Arc;

/// Resolves `$faker.<path>` against an injected provider.
///
/// Generators run once per call; plain values are cloned. Segments past a
/// plain value index into it (`$faker.app.limits.max`). `$faker.x.y()` is
/// accepted as an explicit invocation of the same member.
#[derive(Clone)]
pub struct FakerFunctions {
    provider: Arc<dyn FakeDataProvider>,
}

impl FakerFunctions {
    /// Creates the namespace over `provider`.
    pub fn new(provider: Arc<dyn FakeDataProvider>) -> Self {
        Self { provider }
    }
}

impl FunctionNamespace for FakerFunctions {
    fn name(&self) -> &str {
        "faker"
    }

    fn call(&self, call: &FunctionCall) -> Result<TemplateValue, ResolveError> {
        expect_no_args(call)?;

        let segments: Vec<&str> = call.member.split('.').collect();
        let mut node = self.provider.root();
        for (index, segment) in segments.iter().enumerate() {
            node = match node {
                FakerNode::Group(children) => children.get(*segment).ok_or_else(|| {
                    ResolveError::invalid_path(
                        &call.member,
                        format!("unknown member '{}'", segment),
                    )
                })?,
                // Remaining segments walk into the stored object or array.
                FakerNode::Value(value) => {
                    return path::navigate(value, &segments[index..])
                        .cloned()
                        .ok_or_else(|| {
                            ResolveError::invalid_path(
                                &call.member,
                                format!("'{}' not found in value", segments[index..].join(".")),
                            )
                        })
                }
                FakerNode::Generator(_) => {
                    return Err(ResolveError::invalid_path(
                        &call.member,
                        format!("cannot access '{}' on a generator", segment),
                    ))
                }
            };
        }

        match node {
            FakerNode::Value(value) => Ok(value.clone()),
            FakerNode::Generator(generate) => Ok(generate()),
            FakerNode::Group(_) => Err(ResolveError::invalid_path(
                &call.member,
                "path names a group, not a member",
            )),
        }
    }
}
