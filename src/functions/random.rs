//! `$random` namespace: identifiers, strings, numbers and choices.

use super::math::random_in_range;
use super::{expect_no_args, unknown_member, FunctionNamespace};
use crate::template::{FunctionCall, ResolveError};
use crate::value::TemplateValue;
use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

/// Upper bound for `$random.string(N)`.
const MAX_STRING_LENGTH: i64 = 1 << 20;

/// `$random.uuid`, `string(N)`, `number(min, max)`, `boolean`, `pick(a, ...)`.
#[derive(Debug, Clone)]
pub struct RandomFunctions {
    charset: Vec<char>,
}

impl RandomFunctions {
    /// Creates the namespace; `string(N)` draws characters from `charset`.
    pub fn new(charset: &str) -> Self {
        Self {
            charset: charset.chars().collect(),
        }
    }

    fn string(&self, call: &FunctionCall) -> Result<TemplateValue, ResolveError> {
        call.expect_arity(1)?;
        let length = call.integer_arg(0)?;
        if !(0..=MAX_STRING_LENGTH).contains(&length) {
            return Err(call.error(format!(
                "length must be between 0 and {}, got {}",
                MAX_STRING_LENGTH, length
            )));
        }

        if self.charset.is_empty() {
            return Err(call.error("character set is empty"));
        }

        let mut rng = rand::thread_rng();
        let value: String = (0..length)
            .map(|_| self.charset[rng.gen_range(0..self.charset.len())])
            .collect();
        Ok(TemplateValue::String(value))
    }
}

impl FunctionNamespace for RandomFunctions {
    fn name(&self) -> &str {
        "random"
    }

    fn call(&self, call: &FunctionCall) -> Result<TemplateValue, ResolveError> {
        match call.member.as_str() {
            "uuid" => {
                expect_no_args(call)?;
                Ok(TemplateValue::String(Uuid::new_v4().to_string()))
            }
            "string" => self.string(call),
            "number" => {
                call.expect_arity(2)?;
                random_in_range(call, call.integer_arg(0)?, call.integer_arg(1)?)
            }
            "boolean" => {
                expect_no_args(call)?;
                Ok(TemplateValue::Bool(rand::thread_rng().gen()))
            }
            "pick" => call
                .args()
                .choose(&mut rand::thread_rng())
                .cloned()
                .ok_or_else(|| call.error("pick requires at least one argument")),
            _ => Err(unknown_member(call)),
        }
    }
}
