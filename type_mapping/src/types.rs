//! Driver value definitions
//!
//! This module provides the value shapes a PostgreSQL driver hands to an
//! adapter on read and accepts from it on write.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use uuid::Uuid;

/// Text stored for an absent value when a column must hold JSON data
pub const JSON_NULL: &str = "null";

/// PostgreSQL column values as seen by the driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PostgresValue {
    Text(String),
    Bytes(Vec<u8>),
    SmallInt(i16),
    Integer(i32),
    BigInt(i64),
    Float(f64),
    Decimal(String), // Store as string to preserve precision
    Boolean(bool),
    Uuid(Uuid),
    Timestamp(DateTime<Utc>),
    Json(serde_json::Value),
    Null,
}

impl PostgresValue {
    pub fn is_null(&self) -> bool {
        matches!(self, PostgresValue::Null)
    }

    /// Variant name used in conversion error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            PostgresValue::Text(_) => "text",
            PostgresValue::Bytes(_) => "bytes",
            PostgresValue::SmallInt(_) => "smallint",
            PostgresValue::Integer(_) => "integer",
            PostgresValue::BigInt(_) => "bigint",
            PostgresValue::Float(_) => "float",
            PostgresValue::Decimal(_) => "decimal",
            PostgresValue::Boolean(_) => "boolean",
            PostgresValue::Uuid(_) => "uuid",
            PostgresValue::Timestamp(_) => "timestamp",
            PostgresValue::Json(_) => "json",
            PostgresValue::Null => "null",
        }
    }

    /// Generic stringification of the value. Total: every variant has a
    /// textual form, and `Null` renders as the JSON null token.
    pub fn to_text(&self) -> Cow<'_, [u8]> {
        match self {
            PostgresValue::Text(s) | PostgresValue::Decimal(s) => Cow::Borrowed(s.as_bytes()),
            PostgresValue::Bytes(b) => Cow::Borrowed(b.as_slice()),
            PostgresValue::SmallInt(n) => Cow::Owned(n.to_string().into_bytes()),
            PostgresValue::Integer(n) => Cow::Owned(n.to_string().into_bytes()),
            PostgresValue::BigInt(n) => Cow::Owned(n.to_string().into_bytes()),
            PostgresValue::Float(f) => Cow::Owned(f.to_string().into_bytes()),
            PostgresValue::Boolean(b) => Cow::Borrowed(if *b { &b"true"[..] } else { &b"false"[..] }),
            PostgresValue::Uuid(u) => Cow::Owned(u.hyphenated().to_string().into_bytes()),
            PostgresValue::Timestamp(t) => {
                Cow::Owned(t.to_rfc3339_opts(SecondsFormat::AutoSi, true).into_bytes())
            }
            PostgresValue::Json(v) => Cow::Owned(v.to_string().into_bytes()),
            PostgresValue::Null => Cow::Borrowed(JSON_NULL.as_bytes()),
        }
    }

    /// Build a text value from raw bytes, keeping non-UTF-8 input as bytes
    pub fn from_raw(bytes: &[u8]) -> Self {
        match std::str::from_utf8(bytes) {
            Ok(text) => PostgresValue::Text(text.to_string()),
            Err(_) => PostgresValue::Bytes(bytes.to_vec()),
        }
    }
}

impl From<String> for PostgresValue {
    fn from(val: String) -> Self {
        PostgresValue::Text(val)
    }
}

impl From<&str> for PostgresValue {
    fn from(val: &str) -> Self {
        PostgresValue::Text(val.to_string())
    }
}

impl From<Vec<u8>> for PostgresValue {
    fn from(val: Vec<u8>) -> Self {
        PostgresValue::Bytes(val)
    }
}

impl From<&[u8]> for PostgresValue {
    fn from(val: &[u8]) -> Self {
        PostgresValue::Bytes(val.to_vec())
    }
}

impl From<i16> for PostgresValue {
    fn from(val: i16) -> Self {
        PostgresValue::SmallInt(val)
    }
}

impl From<i32> for PostgresValue {
    fn from(val: i32) -> Self {
        PostgresValue::Integer(val)
    }
}

impl From<i64> for PostgresValue {
    fn from(val: i64) -> Self {
        PostgresValue::BigInt(val)
    }
}

impl From<f64> for PostgresValue {
    fn from(val: f64) -> Self {
        PostgresValue::Float(val)
    }
}

impl From<bool> for PostgresValue {
    fn from(val: bool) -> Self {
        PostgresValue::Boolean(val)
    }
}

impl From<Uuid> for PostgresValue {
    fn from(val: Uuid) -> Self {
        PostgresValue::Uuid(val)
    }
}

impl From<DateTime<Utc>> for PostgresValue {
    fn from(val: DateTime<Utc>) -> Self {
        PostgresValue::Timestamp(val)
    }
}

impl From<serde_json::Value> for PostgresValue {
    fn from(val: serde_json::Value) -> Self {
        PostgresValue::Json(val)
    }
}

impl<T> From<Option<T>> for PostgresValue
where
    T: Into<PostgresValue>,
{
    fn from(val: Option<T>) -> Self {
        match val {
            Some(v) => v.into(),
            None => PostgresValue::Null,
        }
    }
}
