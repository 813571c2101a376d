//! JSON-object and key/value-line conversion into KEY=VALUE pairs.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::core::error::{Error, Result};

/// Key shaping options shared by the env conversions.
#[derive(Debug, Clone, Default)]
pub struct EnvOptions {
    pub uppercase: bool,
    pub prefix: String,
    pub flatten: bool,
    pub separator: String,
}

/// Convert a top-level JSON object to sorted `KEY=VALUE` lines.
///
/// Flattening joins nested object keys with the separator; arrays stay
/// compact JSON. Identical computed keys collapse map-style (last write
/// wins). Keys sort on the computed key; uppercasing and prefixing apply at
/// emit time.
pub fn from_json(input: &str, opts: &EnvOptions) -> Result<Vec<String>> {
    let value: Value = serde_json::from_str(input).map_err(Error::ObjectParse)?;
    let Value::Object(object) = value else {
        return Err(Error::NotAnObject);
    };

    let mut pairs = BTreeMap::new();
    if opts.flatten {
        flatten_object(&object, "", &opts.separator, &mut pairs);
    } else {
        for (key, val) in &object {
            pairs.insert(key.trim().to_string(), stringify_scalar(val));
        }
    }

    Ok(pairs
        .into_iter()
        .map(|(key, value)| format!("{}={}", shape_key(key, opts), value))
        .collect())
}

fn shape_key(key: String, opts: &EnvOptions) -> String {
    let key = if opts.uppercase { key.to_uppercase() } else { key };
    if opts.prefix.is_empty() {
        key
    } else {
        format!("{}{}", opts.prefix, key)
    }
}

fn flatten_object(
    object: &Map<String, Value>,
    prefix: &str,
    separator: &str,
    out: &mut BTreeMap<String, String>,
) {
    for (key, value) in object {
        let key = if prefix.is_empty() {
            key.trim().to_string()
        } else {
            format!("{}{}{}", prefix, separator, key.trim())
        };
        match value {
            Value::Object(nested) => flatten_object(nested, &key, separator, out),
            // Arrays keep their order as compact JSON instead of expanding.
            other => {
                out.insert(key, stringify_scalar(other));
            }
        }
    }
}

fn stringify_scalar(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else if let Some(f) = n.as_f64() {
                if f == (f as i64) as f64 {
                    (f as i64).to_string()
                } else {
                    f.to_string()
                }
            } else {
                n.to_string()
            }
        }
        other => other.to_string(),
    }
}

fn kv_line_pattern() -> &'static Regex {
    static KV_LINE: OnceLock<Regex> = OnceLock::new();
    KV_LINE.get_or_init(|| {
        Regex::new(r"^\s*([^:#\s][^:]*)\s*:\s*(.*)$").expect("kv line pattern is valid")
    })
}

/// Convert `key: value` lines to sorted `KEY=VALUE` lines.
///
/// Blank lines and `#` comments are skipped; any other non-matching line
/// fails the whole conversion before anything is emitted. Pairs sort on the
/// final emitted key.
pub fn from_kv(input: &str, uppercase: bool, prefix: &str) -> Result<Vec<String>> {
    let mut pairs = BTreeMap::new();
    for raw_line in input.lines() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let captures = kv_line_pattern()
            .captures(line)
            .ok_or_else(|| Error::InvalidKvLine(line.to_string()))?;
        let mut key = captures[1].trim().to_string();
        let value = captures[2].trim().to_string();
        if uppercase {
            key = key.to_uppercase();
        }
        if !prefix.is_empty() {
            key = format!("{}{}", prefix, key);
        }
        pairs.insert(key, value);
    }
    Ok(pairs
        .into_iter()
        .map(|(key, value)| format!("{}={}", key, value))
        .collect())
}
