//! Raw JSON payload adapters
//!
//! Both payload types carry an already-encoded JSON document as opaque bytes.
//! The bytes are never re-parsed or re-ordered on the way to the database or
//! to a JSON response. They differ only in how an empty payload is stored:
//!
//! | Empty payload | Database column | JSON |
//! |---|---|---|
//! | [`RawPayload`] | text `null` | `null` |
//! | [`NullableRawPayload`] | SQL NULL | `null` |

mod nullable;
mod raw;

pub use nullable::NullableRawPayload;
pub use raw::RawPayload;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer, ser};
use serde_json::value::RawValue;
use type_mapping::types::JSON_NULL;
use type_mapping::{PostgresValue, TypeMappingError};

/// Bytes read from any driver value, via generic stringification
fn scan_bytes(value: &PostgresValue) -> Vec<u8> {
    crate::trace_log!("scanning {} into payload", value.type_name());
    value.to_text().into_owned()
}

/// JSON bytes for a payload: `null` when empty, otherwise verbatim
fn marshal_bytes(bytes: &[u8]) -> Vec<u8> {
    if bytes.is_empty() {
        JSON_NULL.as_bytes().to_vec()
    } else {
        bytes.to_vec()
    }
}

fn unmarshal_bytes(target: &mut Vec<u8>, data: &[u8]) {
    target.clear();
    target.extend_from_slice(data);
}

fn encode_json<T: Serialize + ?Sized>(value: &T) -> type_mapping::Result<Vec<u8>> {
    serde_json::to_vec(value).map_err(TypeMappingError::Encode)
}

fn decode_json<T: DeserializeOwned>(bytes: &[u8]) -> type_mapping::Result<T> {
    serde_json::from_slice(marshal_bytes(bytes).as_slice()).map_err(TypeMappingError::Decode)
}

/// Write a payload through a serializer without re-encoding it
fn serialize_bytes<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
    if bytes.is_empty() {
        return serializer.serialize_none();
    }
    let raw: &RawValue = serde_json::from_slice(bytes).map_err(<S::Error as ser::Error>::custom)?;
    raw.serialize(serializer)
}

fn deserialize_bytes<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
    let raw = Box::<RawValue>::deserialize(deserializer)?;
    Ok(raw.get().as_bytes().to_vec())
}

