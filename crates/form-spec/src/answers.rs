use std::collections::BTreeMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Result of running the validation engine over a form and answer map.
///
/// Failures are returned as data, never thrown, so callers can surface
/// every error at once and focus the first failing field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Default)]
pub struct ValidationOutcome {
    /// Per-question error messages, keyed by `questionId`.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub errors_by_question: BTreeMap<String, String>,
    /// First failing `questionId` in traversal order, for focus/scroll.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_failed: Option<String>,
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        self.errors_by_question.is_empty()
    }
}

/// Empty per the required-rule definition: absent, null, empty string, or
/// an empty array.
pub fn is_empty_value(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(text)) => text.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        _ => false,
    }
}

/// Scalar answers rendered as comparison text for trigger matching.
/// Arrays, objects, and null never match a trigger token.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

/// Numeric coercion for the max/min rule family: accepts numbers and
/// numeric strings, rejects everything else (including NaN).
pub fn numeric_value(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    if number.is_nan() { None } else { Some(number) }
}

/// Length of a string (in characters) or array answer, for
/// maxLength/minLength.
pub fn value_length(value: &Value) -> Option<usize> {
    match value {
        Value::String(text) => Some(text.chars().count()),
        Value::Array(items) => Some(items.len()),
        _ => None,
    }
}
