//! Placeholder expression parsing
//!
//! The text between `{{` and `}}` is an expression with an optional default:
//!
//! ```text
//! user.roles[1]                 variable path
//! missing|'fallback'            variable path with default
//! $random.uuid                  function call without arguments
//! $math.random(1, 10)           function call with literal arguments
//! ```
//!
//! Arguments and defaults are literals only: quoted strings, numbers,
//! `true`, `false`, `null`, or bare text. They are never nested expressions.

use super::path::parse_path;
use super::ResolveError;
use crate::value::TemplateValue;
use serde_json::Number;

/// A parsed placeholder expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    /// Reference into the variable store, as path segments
    Variable(Vec<String>),
    /// Built-in function call, `$namespace.member(args)`
    Function(FunctionCall),
}

/// A `$namespace.member(args...)` call.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionCall {
    /// Namespace name without the `$`, e.g. `math`
    pub namespace: String,
    /// Member within the namespace; may be dotted, e.g. `name.firstName`
    pub member: String,
    /// Parsed arguments, `None` when written without parentheses
    pub args: Option<Vec<TemplateValue>>,
    /// The call as written, for error messages
    pub source: String,
}

impl FunctionCall {
    /// Arguments as a slice; a call without parentheses has none.
    pub fn args(&self) -> &[TemplateValue] {
        self.args.as_deref().unwrap_or(&[])
    }

    /// Number of arguments.
    pub fn arity(&self) -> usize {
        self.args().len()
    }

    /// Builds an `InvalidFunctionCall` error for this call.
    pub fn error(&self, reason: impl Into<String>) -> ResolveError {
        ResolveError::invalid_call(&self.source, reason)
    }

    /// Fails unless the call has exactly `expected` arguments.
    pub fn expect_arity(&self, expected: usize) -> Result<(), ResolveError> {
        if self.arity() == expected {
            Ok(())
        } else {
            Err(self.error(format!(
                "expected {} argument{}, got {}",
                expected,
                if expected == 1 { "" } else { "s" },
                self.arity()
            )))
        }
    }

    /// Reads argument `index` as a float.
    pub fn number_arg(&self, index: usize) -> Result<f64, ResolveError> {
        self.args()
            .get(index)
            .and_then(TemplateValue::as_f64)
            .ok_or_else(|| self.error(format!("argument {} must be a number", index + 1)))
    }

    /// Reads argument `index` as an integer.
    ///
    /// Floats without a fractional part are accepted.
    pub fn integer_arg(&self, index: usize) -> Result<i64, ResolveError> {
        let value = self.args().get(index);
        value
            .and_then(TemplateValue::as_i64)
            .or_else(|| {
                value
                    .and_then(TemplateValue::as_f64)
                    .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
                    .map(|f| f as i64)
            })
            .ok_or_else(|| self.error(format!("argument {} must be an integer", index + 1)))
    }

    /// Reads argument `index` as a string.
    pub fn string_arg(&self, index: usize) -> Result<&str, ResolveError> {
        self.args()
            .get(index)
            .and_then(TemplateValue::as_str)
            .ok_or_else(|| self.error(format!("argument {} must be a string", index + 1)))
    }
}

/// A placeholder split into its expression and optional default.
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    /// The expression to evaluate
    pub expression: Expression,
    /// Literal used when a variable path is not found
    pub default: Option<TemplateValue>,
    /// The expression as written, without the default
    pub source: String,
}

/// Parses the inside of a `{{...}}` placeholder.
pub fn parse_placeholder(text: &str) -> Result<Placeholder, ResolveError> {
    let (expression_text, default_text) = split_default(text);
    let expression_text = expression_text.trim();

    if expression_text.is_empty() {
        return Err(ResolveError::malformed(text, "empty expression"));
    }

    let expression = match expression_text.strip_prefix('$') {
        Some(call) => Expression::Function(parse_function_call(call, expression_text)?),
        None => Expression::Variable(parse_path(expression_text)?),
    };

    Ok(Placeholder {
        expression,
        default: default_text.map(parse_literal),
        source: expression_text.to_string(),
    })
}

/// Splits on the first `|` that is neither escaped nor inside quotes.
///
/// `\|` in the expression part stands for a literal `|`.
fn split_default(text: &str) -> (String, Option<&str>) {
    let mut expression = String::with_capacity(text.len());
    let mut quote: Option<char> = None;
    let mut chars = text.char_indices().peekable();

    while let Some((index, c)) = chars.next() {
        match (c, quote) {
            ('\\', _) if matches!(chars.peek(), Some((_, '|'))) => {
                expression.push('|');
                chars.next();
            }
            ('|', None) => return (expression, Some(&text[index + 1..])),
            ('\'' | '"', None) => {
                quote = Some(c);
                expression.push(c);
            }
            (c, Some(open)) if c == open => {
                quote = None;
                expression.push(c);
            }
            _ => expression.push(c),
        }
    }

    (expression, None)
}

/// Parses `namespace.member` or `namespace.member(args)`; `source` is the
/// full expression including `$`.
fn parse_function_call(call: &str, source: &str) -> Result<FunctionCall, ResolveError> {
    let (head, args) = match call.find('(') {
        Some(open) => {
            let inner = call[open + 1..]
                .strip_suffix(')')
                .ok_or_else(|| ResolveError::malformed(source, "missing closing ')'"))?;
            (&call[..open], Some(parse_arguments(inner, source)?))
        }
        None if call.contains(')') => {
            return Err(ResolveError::malformed(source, "unexpected ')'"));
        }
        None => (call, None),
    };

    let (namespace, member) = head
        .split_once('.')
        .ok_or_else(|| ResolveError::malformed(source, "expected '$namespace.member'"))?;
    let namespace = namespace.trim();
    let member = member.trim();

    if namespace.is_empty() || !namespace.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ResolveError::malformed(source, "invalid function namespace"));
    }
    if member.is_empty() {
        return Err(ResolveError::malformed(source, "missing function name"));
    }

    Ok(FunctionCall {
        namespace: namespace.to_string(),
        member: member.to_string(),
        args,
        source: source.to_string(),
    })
}

/// Splits an argument list on commas outside quotes and parses each literal.
fn parse_arguments(inner: &str, source: &str) -> Result<Vec<TemplateValue>, ResolveError> {
    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut raw = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;

    for c in inner.chars() {
        match (c, quote) {
            (',', None) => raw.push(std::mem::take(&mut current)),
            ('\'' | '"', None) => {
                quote = Some(c);
                current.push(c);
            }
            (c, Some(open)) if c == open => {
                quote = None;
                current.push(c);
            }
            ('(' | ')', None) => {
                return Err(ResolveError::malformed(
                    source,
                    "nested parentheses are not allowed in arguments",
                ));
            }
            _ => current.push(c),
        }
    }
    if quote.is_some() {
        return Err(ResolveError::malformed(source, "unterminated string argument"));
    }
    raw.push(current);

    raw.iter()
        .map(|arg| {
            if arg.trim().is_empty() {
                Err(ResolveError::malformed(source, "empty argument"))
            } else {
                Ok(parse_literal(arg))
            }
        })
        .collect()
}

/// Parses literal text into a typed value.
///
/// Quoted text becomes a string without its quotes, `true`/`false`/`null`
/// become their JSON counterparts, numeric text becomes a number, and
/// anything else is kept as trimmed raw text.
pub fn parse_literal(text: &str) -> TemplateValue {
    let text = text.trim();

    if text.len() >= 2 {
        let first = text.as_bytes()[0];
        let last = text.as_bytes()[text.len() - 1];
        if (first == b'\'' || first == b'"') && first == last {
            return TemplateValue::String(text[1..text.len() - 1].to_string());
        }
    }

    match text {
        "true" => return TemplateValue::Bool(true),
        "false" => return TemplateValue::Bool(false),
        "null" => return TemplateValue::Null,
        _ => {}
    }

    if let Ok(integer) = text.parse::<i64>() {
        return TemplateValue::Number(integer.into());
    }
    if looks_numeric(text) {
        if let Some(number) = text.parse::<f64>().ok().and_then(Number::from_f64) {
            return TemplateValue::Number(number);
        }
    }

    TemplateValue::String(text.to_string())
}

/// Rejects words like `inf` and `NaN` that `f64::from_str` would accept.
fn looks_numeric(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E'))
        && text.chars().any(|c| c.is_ascii_digit())
}
