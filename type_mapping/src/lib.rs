//! Driver-level value model and conversion capabilities
//! This crate provides the pieces every sqljson adapter is built on: the
//! [`PostgresValue`] a column decodes from or encodes to, the storage and wire
//! capability traits, and generic helpers for JSON-encoded columns.

#[cfg(feature = "debug-logging")]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod conversion;
pub mod errors;
pub mod serialize;
pub mod types;

pub use conversion::{FromPostgresValue, JsonWire, ToPostgresValue};
pub use errors::{Result, TypeMappingError};
pub use serialize::{json_scan, json_value, json_value_with};
pub use types::PostgresValue;
