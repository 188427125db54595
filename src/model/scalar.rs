//! Loosely typed scalar values.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// A JSON scalar that may arrive as a number or a string.
///
/// Section numbers and bibliography ids are written either way in real
/// documents (`"number": 2` and `"number": "2"` are both common).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    /// Whole number
    Integer(i64),
    /// Fractional number
    Float(f64),
    /// Text
    Text(String),
}

impl Scalar {
    /// Whether the value counts as present.
    ///
    /// Zero, NaN and the empty string count as absent, so a section with
    /// `"number": 0` gets no numeric prefix.
    pub fn is_truthy(&self) -> bool {
        match self {
            Scalar::Integer(n) => *n != 0,
            Scalar::Float(f) => *f != 0.0 && !f.is_nan(),
            Scalar::Text(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Integer(n) => write!(f, "{}", n),
            Scalar::Float(x) => write!(f, "{}", x),
            Scalar::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::Text(s.to_string())
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Scalar::Integer(n)
    }
}

/// Display text of a loosely typed value.
///
/// `null` is empty and scalars give their printed form. Arrays and objects
/// have no sensible text and also come out empty.
pub(crate) fn text_of(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// `deserialize_with` helper for free-text fields.
pub(crate) fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(text_of(Value::deserialize(deserializer)?))
}

/// Like [`lenient_text`], but `null` stays absent.
pub(crate) fn lenient_opt_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        value => Some(text_of(value)),
    })
}

/// A list of free-text entries. `null` is an empty list; anything else
/// that is not an array is rejected.
pub(crate) fn lenient_text_list<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<String>, D::Error> {
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(Vec::new()),
        Value::Array(entries) => Ok(entries.into_iter().map(text_of).collect()),
        other => Err(serde::de::Error::custom(format!(
            "expected a list of strings, found {}",
            other
        ))),
    }
}
