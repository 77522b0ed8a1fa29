//! Best-effort decoding of stored values.

use rusqlite::types::ValueRef;
use serde::Serialize;
use serde_json::Value;

/// A value read from a key-value table.
///
/// Cursor stores mostly JSON, but nothing enforces it. Values that parse as
/// JSON are returned structured; everything else is passed through verbatim.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StoredValue {
    Structured(Value),
    Raw(String),
}

impl StoredValue {
    /// Decode stored text. Never fails.
    pub fn decode(raw: &str) -> Self {
        match serde_json::from_str::<Value>(raw) {
            Ok(value) => Self::Structured(value),
            Err(_) => Self::Raw(raw.to_string()),
        }
    }

    /// Decode a SQLite column value. BLOBs are treated as UTF-8 text.
    pub fn from_sql(value: ValueRef<'_>) -> Self {
        match value {
            ValueRef::Null => Self::Structured(Value::Null),
            ValueRef::Integer(i) => Self::Structured(Value::from(i)),
            ValueRef::Real(f) => match serde_json::Number::from_f64(f) {
                Some(n) => Self::Structured(Value::Number(n)),
                None => Self::Raw(f.to_string()),
            },
            ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
                Self::decode(&String::from_utf8_lossy(bytes))
            }
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, Self::Structured(_))
    }

    /// The value as JSON; raw text becomes a JSON string.
    pub fn into_json(self) -> Value {
        match self {
            Self::Structured(value) => value,
            Self::Raw(text) => Value::String(text),
        }
    }
}

/// Render a key column as text. NULL keys become empty strings.
pub fn key_text(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(i) => i.to_string(),
        ValueRef::Real(f) => f.to_string(),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => String::from_utf8_lossy(bytes).into_owned(),
    }
}

/// One `(key, value)` row of a query result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryRow {
    pub key: String,
    pub value: StoredValue,
}
