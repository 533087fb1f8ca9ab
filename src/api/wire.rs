//! Field access over loosely-typed backend payloads.
//!
//! The backend mixes `PascalCase`, `camelCase` and `snake_case` keys, and
//! sometimes sends numbers as strings. Entity mappers list every accepted
//! spelling once and get a typed value back.

use serde_json::{Map, Value};

use super::ApiError;
use crate::models::image::normalize_image_source;

/// Keys under which list endpoints wrap their arrays.
pub const ENVELOPE_KEYS: &[&str] = &[
    "data", "items", "results", "applications", "projects", "services", "users",
    "transactions", "reviews",
];

pub struct Fields<'a>(&'a Map<String, Value>);

impl<'a> Fields<'a> {
    pub fn new(value: &'a Value) -> Result<Self, ApiError> {
        value
            .as_object()
            .map(Fields)
            .ok_or_else(|| ApiError::Decode(format!("expected object, got {}", kind(value))))
    }

    /// First present, non-null value among `keys`.
    pub fn raw(&self, keys: &[&str]) -> Option<&'a Value> {
        keys.iter()
            .filter_map(|k| self.0.get(*k))
            .find(|v| !v.is_null())
    }

    pub fn str(&self, keys: &[&str]) -> Option<String> {
        match self.raw(keys)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn string(&self, keys: &[&str]) -> String {
        self.str(keys).unwrap_or_default()
    }

    pub fn i64(&self, keys: &[&str]) -> Option<i64> {
        match self.raw(keys)? {
            // 12.0 is an id, 12.5 is not
            Value::Number(n) => n.as_i64().or_else(|| {
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64)
                    .map(|f| f as i64)
            }),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn require_i64(&self, keys: &[&str]) -> Result<i64, ApiError> {
        self.i64(keys)
            .ok_or_else(|| ApiError::Decode(format!("missing integer field {}", keys[0])))
    }

    pub fn f64(&self, keys: &[&str]) -> Option<f64> {
        match self.raw(keys)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn bool(&self, keys: &[&str]) -> bool {
        match self.raw(keys) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_i64().unwrap_or(0) != 0,
            Some(Value::String(s)) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "1" | "yes"),
            _ => false,
        }
    }

    /// Image field as a renderable source. Only string payloads qualify.
    pub fn image(&self, keys: &[&str]) -> Option<String> {
        match self.raw(keys)? {
            Value::String(s) => normalize_image_source(Some(s)),
            _ => None,
        }
    }

    /// Nested object, e.g. `{"user": {...}}`.
    pub fn object(&self, keys: &[&str]) -> Option<Fields<'a>> {
        self.raw(keys).and_then(|v| v.as_object()).map(Fields)
    }
}

/// Items of a list response: a bare array, or an array under one of [`ENVELOPE_KEYS`].
pub fn list_items(value: &Value) -> Vec<&Value> {
    match value {
        Value::Array(items) => items.iter().collect(),
        Value::Object(obj) => ENVELOPE_KEYS
            .iter()
            .filter_map(|k| obj.get(*k))
            .find_map(|v| v.as_array())
            .map(|items| items.iter().collect())
            .unwrap_or_default(),
        _ => Vec::new(),
    }
}

/// Map every item of a list response, skipping (and logging) malformed ones.
pub fn map_list<T>(
    value: &Value,
    entity: &str,
    map: impl Fn(&Fields) -> Result<T, ApiError>,
) -> Vec<T> {
    list_items(value)
        .into_iter()
        .filter_map(|item| {
            let mapped = Fields::new(item).and_then(|f| map(&f));
            match mapped {
                Ok(record) => Some(record),
                Err(e) => {
                    log::warn!("Skipping malformed {entity}: {e}");
                    None
                }
            }
        })
        .collect()
}

/// Single-object response, optionally wrapped in `{data: {...}}` or `{user: {...}}`.
pub fn unwrap_object<'a>(value: &'a Value, wrapper_keys: &[&str]) -> &'a Value {
    if let Value::Object(obj) = value {
        for key in wrapper_keys {
            if let Some(inner) = obj.get(*key).filter(|v| v.is_object()) {
                return inner;
            }
        }
    }
    value
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
