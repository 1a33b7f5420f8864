//! Lenient readers for loosely typed analysis payload values.
//!
//! The analysis service is not consistent about types: scores arrive as
//! numbers or numeric strings, word lists as arrays or comma separated text.
//! Every reader here maps anything unusable to "absent" instead of failing.

use serde_json::Value;

/// A numeric score, accepting JSON numbers and numeric strings.
pub fn score(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Free text. Blank strings are treated as absent; other scalars are rendered.
pub fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// A non-negative occurrence count. Fractions are truncated.
pub fn count(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| *f >= 0.0).map_or(0, |f| f as u64),
        _ => 0,
    }
}

/// A word list from an array of strings or a comma separated string.
pub fn word_list(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.trim().to_owned()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .filter(|s| !s.is_empty())
            .collect(),
        Value::String(s) => split_word_list(s),
        _ => Vec::new(),
    }
}

pub fn split_word_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect()
}
