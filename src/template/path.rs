//! Variable path parsing and navigation.
//!
//! A variable path is a dotted reference with optional bracket indices:
//! `user.profile.name`, `items[0].id`, `headers['x-request-id']`. Bracket
//! segments are normalized to dotted ones, so `items[0].id` and `items.0.id`
//! are the same path.

use super::ResolveError;
use crate::value::TemplateValue;

/// Splits a variable path into its segments.
///
/// Quoted bracket segments may contain dots. Empty segments and unbalanced
/// brackets are rejected as malformed.
pub fn parse_path(expression: &str) -> Result<Vec<String>, ResolveError> {
    let malformed = |reason: &str| ResolveError::malformed(expression, reason);

    let mut segments = Vec::new();
    let mut current = String::new();
    // Set after a closing bracket, where the segment is already complete
    let mut after_bracket = false;
    let mut chars = expression.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '.' => {
                if current.is_empty() && !after_bracket {
                    return Err(malformed("empty path segment"));
                }
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
                after_bracket = false;
                if chars.peek().is_none() {
                    return Err(malformed("path ends with '.'"));
                }
            }
            '[' => {
                if current.is_empty() && !after_bracket {
                    return Err(malformed("index without a preceding name"));
                }
                if !current.is_empty() {
                    segments.push(std::mem::take(&mut current));
                }
                let mut inner = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == ']' {
                        closed = true;
                        break;
                    }
                    inner.push(c);
                }
                if !closed {
                    return Err(malformed("unclosed '['"));
                }
                let segment = unquote(inner.trim());
                if segment.is_empty() {
                    return Err(malformed("empty index"));
                }
                segments.push(segment.to_string());
                after_bracket = true;
            }
            ']' => return Err(malformed("unexpected ']'")),
            _ => {
                if after_bracket {
                    return Err(malformed("expected '.' or '[' after index"));
                }
                current.push(c);
            }
        }
    }

    if !current.is_empty() {
        segments.push(current);
    }
    if segments.is_empty() {
        return Err(malformed("empty variable path"));
    }
    Ok(segments)
}

/// Walks `segments` down from `root`.
///
/// Objects are indexed by key and arrays by non-negative integer index.
/// Returns `None` as soon as a segment does not match.
pub fn navigate<'v, S: AsRef<str>>(
    root: &'v TemplateValue,
    segments: &[S],
) -> Option<&'v TemplateValue> {
    segments
        .iter()
        .try_fold(root, |current, segment| match current {
            TemplateValue::Object(map) => map.get(segment.as_ref()),
            TemplateValue::Array(items) => segment
                .as_ref()
                .parse::<usize>()
                .ok()
                .and_then(|index| items.get(index)),
            _ => None,
        })
}

fn unquote(text: &str) -> &str {
    let quoted = text.len() >= 2
        && ((text.starts_with('\'') && text.ends_with('\''))
            || (text.starts_with('"') && text.ends_with('"')));
    if quoted {
        &text[1..text.len() - 1]
    } else {
        text
    }
}
