//! `$date` namespace: current time, formatting and offsets.
//!
//! ```text
//! {{$date.now}}                     2024-01-31T12:00:00.000Z
//! {{$date.timestamp}}               1706702400
//! {{$date.timestampMs}}             1706702400000
//! {{$date.format('YYYY-MM-DD')}}    2024-01-31
//! {{$date.add(-1, 'days')}}         2024-01-30T12:00:00.000Z
//! ```

use super::{expect_no_args, unknown_member, FunctionNamespace};
use crate::clock::Clock;
use crate::config::DateFormat;
use crate::template::{FunctionCall, ResolveError};
use crate::value::TemplateValue;
use chrono::{DateTime, Datelike, Duration, SecondsFormat, Timelike, Utc};
use std::sync::Arc;

/// Date functions reading time from an injected [`Clock`].
#[derive(Clone)]
pub struct DateFunctions {
    clock: Arc<dyn Clock>,
    format: DateFormat,
}

impl DateFunctions {
    /// Creates the namespace; `format` applies to `now` and `add`.
    pub fn new(clock: Arc<dyn Clock>, format: DateFormat) -> Self {
        Self { clock, format }
    }

    fn render(&self, instant: DateTime<Utc>) -> TemplateValue {
        TemplateValue::String(match self.format {
            DateFormat::Iso8601 => instant.to_rfc3339_opts(SecondsFormat::Millis, true),
            DateFormat::Rfc2822 => instant.to_rfc2822(),
            DateFormat::Timestamp => instant.timestamp().to_string(),
        })
    }
}

impl FunctionNamespace for DateFunctions {
    fn name(&self) -> &str {
        "date"
    }

    fn call(&self, call: &FunctionCall) -> Result<TemplateValue, ResolveError> {
        let now = self.clock.now();

        match call.member.as_str() {
            "now" => {
                expect_no_args(call)?;
                Ok(self.render(now))
            }
            "timestamp" => {
                expect_no_args(call)?;
                Ok(TemplateValue::from(now.timestamp()))
            }
            "timestampMs" => {
                expect_no_args(call)?;
                Ok(TemplateValue::from(now.timestamp_millis()))
            }
            "format" => {
                call.expect_arity(1)?;
                Ok(TemplateValue::String(format_tokens(
                    now,
                    call.string_arg(0)?,
                )))
            }
            "add" => {
                call.expect_arity(2)?;
                let amount = call.integer_arg(0)?;
                let unit = call.string_arg(1)?;
                let shifted = offset(unit, amount)
                    .ok_or_else(|| {
                        call.error(format!(
                            "invalid unit '{}'. Use 'days', 'hours', 'minutes', or 'seconds'",
                            unit
                        ))
                    })?
                    .and_then(|delta| now.checked_add_signed(delta))
                    .ok_or_else(|| call.error("date offset out of range"))?;
                Ok(self.render(shifted))
            }
            _ => Err(unknown_member(call)),
        }
    }
}

/// `None` for an unknown unit, `Some(None)` for an out-of-range amount.
fn offset(unit: &str, amount: i64) -> Option<Option<Duration>> {
    let delta = match unit {
        "days" | "day" => Duration::try_days(amount),
        "hours" | "hour" => Duration::try_hours(amount),
        "minutes" | "minute" => Duration::try_minutes(amount),
        "seconds" | "second" => Duration::try_seconds(amount),
        _ => return None,
    };
    Some(delta)
}

/// Substitutes `YYYY`, `MM`, `DD`, `HH`, `mm` and `ss`, zero padded.
///
/// Substitution is naive: tokens are replaced wherever they appear, in that
/// order, and other text is kept as-is.
pub fn format_tokens(instant: DateTime<Utc>, pattern: &str) -> String {
    pattern
        .replace("YYYY", &format!("{:04}", instant.year()))
        .replace("MM", &format!("{:02}", instant.month()))
        .replace("DD", &format!("{:02}", instant.day()))
        .replace("HH", &format!("{:02}", instant.hour()))
        .replace("mm", &format!("{:02}", instant.minute()))
        .replace("ss", &format!("{:02}", instant.second()))
}
