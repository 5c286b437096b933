//! The value type shared by templates and resolved output.
//!
//! Templates are plain JSON-shaped trees. `serde_json` is built with
//! `preserve_order`, so mappings iterate in insertion order and resolution
//! visits fields in the order they were written.

/// A template or resolved value: null, bool, number, string, array or object.
pub type TemplateValue = serde_json::Value;

/// Renders a value for interpolation into a larger string.
///
/// Strings are inserted verbatim; everything else uses its compact JSON text.
pub fn stringify(value: &TemplateValue) -> String {
    match value {
        TemplateValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}
