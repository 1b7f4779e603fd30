//! Convenience re-exports for common sqljson usage
//!
//! # Example
//!
//! ```rust
//! use sqljson::prelude::*;
//!
//! let stored = NullableTimestamp::NULL.to_postgres_value()?;
//! assert!(stored.is_null());
//! # Ok::<(), TypeMappingError>(())
//! ```

// Adapters
pub use crate::payload::{NullableRawPayload, RawPayload};
pub use crate::timestamp::NullableTimestamp;

// Capabilities and helpers
pub use type_mapping::{
    FromPostgresValue, JsonWire, PostgresValue, ToPostgresValue, TypeMappingError, json_scan,
    json_value, json_value_with,
};

// Re-export centralized config
pub use config::{JsonConfig, SecondsPrecision, TimestampConfig, TypeConfig};
