//! Serialization utilities
//!
//! This module provides helpers for storing any serde-compatible value in a
//! JSON-encoded column without writing a dedicated adapter type.

use crate::errors::{Result, TypeMappingError};
use crate::types::{PostgresValue, JSON_NULL};
use config::JsonConfig;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Decode a JSON-encoded column into `dst`.
///
/// A SQL NULL column is read as the text `null`. A JSON null that the
/// destination type cannot represent leaves `dst` unchanged.
pub fn json_scan<T: DeserializeOwned>(dst: &mut T, value: &PostgresValue) -> Result<()> {
    let text = value.to_text();
    match serde_json::from_slice::<T>(&text) {
        Ok(decoded) => {
            *dst = decoded;
            Ok(())
        }
        Err(_) if text.trim_ascii() == JSON_NULL.as_bytes() => {
            trace_log!("json null left {} unchanged", std::any::type_name::<T>());
            Ok(())
        }
        Err(err) => Err(TypeMappingError::Decode(err)),
    }
}

/// Encode `src` as JSON column text; a missing source becomes SQL NULL
pub fn json_value<T: Serialize + ?Sized>(src: Option<&T>) -> Result<PostgresValue> {
    json_value_with(src, &JsonConfig::default())
}

pub fn json_value_with<T: Serialize + ?Sized>(
    src: Option<&T>,
    config: &JsonConfig,
) -> Result<PostgresValue> {
    let Some(src) = src else {
        return Ok(PostgresValue::Null);
    };

    let mut text = serde_json::to_string(src).map_err(TypeMappingError::Encode)?;
    if config.trailing_newline {
        text.push('\n');
    }
    Ok(PostgresValue::Text(text))
}
