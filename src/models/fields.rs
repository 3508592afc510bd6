//! Flat fields decoded from a request body.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::errors::AppError;

/// Field name to value, as submitted by a form or JSON object.
///
/// Form and multipart values are always strings; JSON values keep their type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Fields(HashMap<String, Value>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), Value::String(value.into()));
    }

    /// A field in textual form, if it was submitted at all.
    pub fn text(&self, name: &str) -> Option<String> {
        self.0.get(name).map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        })
    }

    /// A field exactly as submitted.
    pub fn value(&self, name: &str) -> Option<Value> {
        self.0.get(name).cloned()
    }

    /// A field that must be present and not blank.
    pub fn required(&self, name: &'static str) -> Result<String, AppError> {
        match self.text(name) {
            Some(value) if !value.trim().is_empty() => Ok(value),
            _ => Err(AppError::MissingField(name)),
        }
    }

    /// A headcount field. Non-numeric input counts as zero.
    pub fn count(&self, name: &str) -> Option<u32> {
        self.0.get(name).map(headcount)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<HashMap<String, String>> for Fields {
    fn from(map: HashMap<String, String>) -> Self {
        map.into_iter().collect()
    }
}

/// JSON nulls are treated as absent.
impl From<Map<String, Value>> for Fields {
    fn from(object: Map<String, Value>) -> Self {
        Self(object.into_iter().filter(|(_, v)| !v.is_null()).collect())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Fields {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), Value::String(v.into())))
                .collect(),
        )
    }
}

/// Numeric input is truncated toward zero and clamped into `u32`; NaN,
/// infinities and non-numbers become 0.
fn headcount(value: &Value) -> u32 {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match number {
        Some(n) if n.is_finite() => n.trunc().clamp(0.0, u32::MAX as f64) as u32,
        _ => 0,
    }
}
