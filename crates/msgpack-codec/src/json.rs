//! JSON view of a [`Value`], for diagnostics and JSON fixtures.
//!
//! The mapping is lossy: binary data becomes an array of byte numbers,
//! extensions become `{"ext": tag, "data": [...]}`, non-string map keys are
//! rendered with `Display`, and non-finite floats become `null`.

use serde_json::{json, Map, Number};

use crate::Value;

impl Value {
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Nil => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Integer(i) => match (i.as_u64(), i.as_i64()) {
                (Some(u), _) => serde_json::Value::Number(u.into()),
                (None, Some(n)) => serde_json::Value::Number(n.into()),
                (None, None) => serde_json::Value::Null,
            },
            Value::Float(f) => Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Str(s) => match s.as_str() {
                Some(text) => serde_json::Value::String(text.to_owned()),
                None => json!({ "invalid_utf8": s.as_bytes() }),
            },
            Value::Bin(bytes) => json!(bytes),
            Value::Array(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Map(pairs) => {
                let mut obj = Map::with_capacity(pairs.len());
                for (key, val) in pairs {
                    let key = match key.as_str() {
                        Some(text) => text.to_owned(),
                        None => key.to_string(),
                    };
                    obj.insert(key, val.to_json());
                }
                serde_json::Value::Object(obj)
            }
            Value::Extension(ext) => json!({ "ext": ext.tag, "data": ext.data }),
        }
    }
}
