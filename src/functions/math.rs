//! `$math` namespace: random numbers and rounding.

use super::{unknown_member, FunctionNamespace};
use crate::template::{FunctionCall, ResolveError};
use crate::value::TemplateValue;
use rand::Rng;
use serde_json::Number;

/// Largest integer an `f64` represents exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// `$math.random()`, `$math.random(min, max)`, `round`, `floor`, `ceil`, `abs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MathFunctions;

impl FunctionNamespace for MathFunctions {
    fn name(&self) -> &str {
        "math"
    }

    fn call(&self, call: &FunctionCall) -> Result<TemplateValue, ResolveError> {
        match call.member.as_str() {
            "random" => random(call),
            "round" => unary(call, |x| (x + 0.5).floor(), TemplateValue::from),
            "floor" => unary(call, f64::floor, TemplateValue::from),
            "ceil" => unary(call, f64::ceil, TemplateValue::from),
            "abs" => unary(call, f64::abs, abs_integer),
            _ => Err(unknown_member(call)),
        }
    }
}

/// `random()` is a float in [0, 1); `random(min, max)` an integer in [min, max].
fn random(call: &FunctionCall) -> Result<TemplateValue, ResolveError> {
    match call.arity() {
        0 => number(call, rand::thread_rng().gen::<f64>()),
        2 => {
            let min = call.integer_arg(0)?;
            let max = call.integer_arg(1)?;
            random_in_range(call, min, max)
        }
        n => Err(call.error(format!("expected 0 or 2 arguments, got {}", n))),
    }
}

/// Inclusive integer range shared by `$math.random` and `$random.number`.
pub(crate) fn random_in_range(
    call: &FunctionCall,
    min: i64,
    max: i64,
) -> Result<TemplateValue, ResolveError> {
    if min > max {
        return Err(call.error(format!(
            "min ({}) cannot be greater than max ({})",
            min, max
        )));
    }
    Ok(TemplateValue::from(rand::thread_rng().gen_range(min..=max)))
}

/// Applies `float_op` to a numeric argument, or `integer_op` when the
/// argument is an integer so it stays exact.
///
/// Halves round toward positive infinity, so `round(-2.5)` is `-2`.
fn unary(
    call: &FunctionCall,
    float_op: fn(f64) -> f64,
    integer_op: fn(i64) -> TemplateValue,
) -> Result<TemplateValue, ResolveError> {
    call.expect_arity(1)?;

    match call.args()[0].as_i64() {
        Some(integer) => Ok(integer_op(integer)),
        None => number(call, float_op(call.number_arg(0)?)),
    }
}

/// `i64::MIN` has no `i64` absolute value and widens to `u64`.
fn abs_integer(integer: i64) -> TemplateValue {
    integer
        .checked_abs()
        .map(TemplateValue::from)
        .unwrap_or_else(|| TemplateValue::from(integer.unsigned_abs()))
}

/// Converts a float result, using an integer when it has no fractional part.
pub(crate) fn number(call: &FunctionCall, value: f64) -> Result<TemplateValue, ResolveError> {
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        return Ok(TemplateValue::from(value as i64));
    }
    Number::from_f64(value)
        .map(TemplateValue::Number)
        .ok_or_else(|| call.error("result is not a finite number"))
}
