//! Storage and wire capabilities
//!
//! An adapter type becomes pluggable at the database boundary by implementing
//! [`FromPostgresValue`] and [`ToPostgresValue`], and at the JSON boundary by
//! implementing [`JsonWire`]. Neither boundary needs to know the concrete type.

use crate::errors::{Result, TypeMappingError};
use crate::types::PostgresValue;

/// Decode a value read from a database column
pub trait FromPostgresValue: Sized {
    fn from_postgres_value(value: &PostgresValue) -> Result<Self>;

    /// Replace `self` with the decoded column value.
    /// On failure `self` is left untouched.
    fn scan(&mut self, value: &PostgresValue) -> Result<()> {
        trace_log!(
            "scanning {} into {}",
            value.type_name(),
            std::any::type_name::<Self>()
        );
        *self = Self::from_postgres_value(value)?;
        Ok(())
    }
}

/// Encode a value for writing into a database column
pub trait ToPostgresValue {
    fn to_postgres_value(&self) -> Result<PostgresValue>;
}

/// JSON wire form of a value, as bytes
pub trait JsonWire: Sized {
    /// Render the JSON bytes for this value. Never fails.
    fn marshal_json(&self) -> Vec<u8>;

    /// Replace `self` with the value decoded from `data`
    fn unmarshal_json(&mut self, data: &[u8]) -> Result<()>;

    /// Unmarshal through a receiver that may not exist.
    fn unmarshal_json_into(receiver: Option<&mut Self>, data: &[u8]) -> Result<()> {
        match receiver {
            Some(target) => target.unmarshal_json(data),
            None => Err(TypeMappingError::NilReceiver(std::any::type_name::<Self>())),
        }
    }
}

impl<T: FromPostgresValue> FromPostgresValue for Option<T> {
    fn from_postgres_value(value: &PostgresValue) -> Result<Self> {
        if value.is_null() {
            return Ok(None);
        }
        T::from_postgres_value(value).map(Some)
    }
}

impl<T: ToPostgresValue> ToPostgresValue for Option<T> {
    fn to_postgres_value(&self) -> Result<PostgresValue> {
        match self {
            Some(v) => v.to_postgres_value(),
            None => Ok(PostgresValue::Null),
        }
    }
}
