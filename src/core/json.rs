//! JSON reshaping: unwrapping of stringified JSON, pretty-printing,
//! minifying, and stringifying.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;

use crate::core::error::{Error, Result};

/// Upper bound on unwrap iterations. Bounds the fixed-point loop against
/// adversarial nesting while covering JSON stringified 1-3 times upstream.
const MAX_UNWRAP_DEPTH: usize = 3;

/// Strip up to three levels of JSON string-literal quoting.
///
/// Stops early when the text is no longer quote-wrapped or fails to parse
/// as a string literal. Implemented as a capped loop, not recursion.
pub fn unwrap_stringified(input: &str) -> String {
    let mut s = input.trim().to_string();
    for _ in 0..MAX_UNWRAP_DEPTH {
        if !(s.len() >= 2 && s.starts_with('"') && s.ends_with('"')) {
            break;
        }
        match serde_json::from_str::<String>(&s) {
            Ok(inner) => s = inner,
            Err(_) => break,
        }
    }
    s
}

fn indent_value(text: &str, indent: usize) -> Option<String> {
    let value: Value = serde_json::from_str(text).ok()?;
    let spaces = " ".repeat(indent);
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(spaces.as_bytes()));
    value.serialize(&mut ser).ok()?;
    String::from_utf8(buf).ok()
}

/// Pretty-print a JSON object or array, tolerating stringified input.
///
/// A negative indent defaults to 2; an indent of 0 produces one element per
/// line with no indentation.
pub fn pretty(input: &str, indent: i64) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyInput);
    }
    let indent = if indent < 0 { 2 } else { indent } as usize;

    // A leading quote usually means a JSON string literal containing JSON.
    if trimmed.starts_with('"') {
        let unwrapped = unwrap_stringified(trimmed);
        if unwrapped.starts_with('{') || unwrapped.starts_with('[') {
            if let Some(out) = indent_value(&unwrapped, indent) {
                return Ok(out);
            }
        }
    }

    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        if let Some(out) = indent_value(trimmed, indent) {
            return Ok(out);
        }
    }

    // Last resort: unwrap anyway (handles nested-quote cases).
    let unwrapped = unwrap_stringified(trimmed);
    if unwrapped.starts_with('{') || unwrapped.starts_with('[') {
        if let Some(out) = indent_value(&unwrapped, indent) {
            return Ok(out);
        }
    }

    Err(Error::NotJson)
}

/// Minify JSON. When `allow_unwrap` is set, stringified input is unwrapped
/// before giving up.
pub fn minify(input: &str, allow_unwrap: bool) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyInput);
    }
    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        return Ok(value.to_string());
    }
    if allow_unwrap {
        let unwrapped = unwrap_stringified(trimmed);
        if let Ok(value) = serde_json::from_str::<Value>(&unwrapped) {
            return Ok(value.to_string());
        }
    }
    Err(Error::InvalidJson)
}

/// Encode JSON input as a single JSON string literal.
///
/// `compact` minifies first (with unwrap fallback); otherwise the input is
/// parsed (raw, then unwrapped) and re-serialized to canonical compact form
/// before encoding. `no_quotes` strips the surrounding quote marks.
pub fn stringify(input: &str, compact: bool, no_quotes: bool) -> Result<String> {
    let data = if compact {
        minify(input, true)?
    } else {
        let value: Value = match serde_json::from_str(input) {
            Ok(v) => v,
            Err(_) => {
                let unwrapped = unwrap_stringified(input);
                serde_json::from_str(&unwrapped).map_err(|_| Error::InvalidJson)?
            }
        };
        value.to_string()
    };

    let literal = Value::String(data).to_string();
    if no_quotes {
        Ok(literal[1..literal.len() - 1].to_string())
    } else {
        Ok(literal)
    }
}
