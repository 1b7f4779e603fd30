//! # sqljson
//!
//! Column adapters that carry nullable timestamps and raw JSON documents
//! through PostgreSQL and through serde JSON without extra glue.
//!
//! ## Quick Start
//!
//! ```rust
//! use sqljson::prelude::*;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Event {
//!     deleted_at: NullableTimestamp,
//!     payload: RawPayload,
//! }
//!
//! let event = Event {
//!     deleted_at: NullableTimestamp::NULL,
//!     payload: RawPayload::from(r#"{"b":1,"a":2}"#),
//! };
//!
//! let json = serde_json::to_string(&event)?;
//! assert_eq!(json, r#"{"deleted_at":null,"payload":{"b":1,"a":2}}"#);
//!
//! assert_eq!(event.deleted_at.to_postgres_value()?, PostgresValue::Null);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Every adapter also implements `sqlx::Type`, `sqlx::Encode` and
//! `sqlx::Decode` for Postgres, so it can be bound and fetched directly.

/// Conditional trace logging macro
/// Compiles to nothing unless the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
#[macro_export]
macro_rules! trace_log {
    ($($arg:tt)*) => {};
}

pub mod payload;
pub mod postgres;
pub mod prelude;
pub mod timestamp;

pub use payload::{NullableRawPayload, RawPayload};
pub use timestamp::NullableTimestamp;

// Re-export centralized config
pub use config::{ConfigError, JsonConfig, SecondsPrecision, TimestampConfig, TypeConfig};

// Re-export the conversion layer the adapters are built on
pub use type_mapping;
pub use type_mapping::{
    FromPostgresValue, JsonWire, PostgresValue, ToPostgresValue, TypeMappingError, json_scan,
    json_value, json_value_with,
};

// Re-export external dependencies used in public API
pub use sqlx;
