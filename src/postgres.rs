//! sqlx bindings for PostgreSQL
//!
//! Each adapter can be bound as a query parameter and fetched from a row:
//!
//! | Adapter | Column type | Empty / absent value |
//! |---|---|---|
//! | [`NullableTimestamp`] | `TIMESTAMPTZ` | SQL NULL |
//! | [`RawPayload`] | `JSON` or `JSONB` | the JSON document `null` |
//! | [`NullableRawPayload`] | `JSON` or `JSONB` | SQL NULL |
//!
//! Payload parameters are declared as `json`, whose wire form is the document
//! text itself, so a `JSON` column stores the bytes exactly as given. A `JSONB`
//! column normalizes them on the server side.
//!
//! Reading SQL NULL into a payload yields the bytes `null`, matching
//! [`type_mapping::PostgresValue::to_text`].

use chrono::{DateTime, Utc};
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgArgumentBuffer, PgTypeInfo, PgValueRef, Postgres};
use sqlx::types::{JsonRawValue, JsonValue};
use sqlx::{Decode, Encode, Type, ValueRef};
use type_mapping::types::JSON_NULL;

use crate::payload::{NullableRawPayload, RawPayload};
use crate::timestamp::NullableTimestamp;

impl Type<Postgres> for NullableTimestamp {
    fn type_info() -> PgTypeInfo {
        <DateTime<Utc> as Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <DateTime<Utc> as Type<Postgres>>::compatible(ty)
    }
}

impl Encode<'_, Postgres> for NullableTimestamp {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
        match self.instant() {
            Some(instant) => <DateTime<Utc> as Encode<Postgres>>::encode_by_ref(&instant, buf),
            None => Ok(IsNull::Yes),
        }
    }
}

impl<'r> Decode<'r, Postgres> for NullableTimestamp {
    fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
        if value.is_null() {
            return Ok(NullableTimestamp::NULL);
        }
        let instant = <DateTime<Utc> as Decode<Postgres>>::decode(value)?;
        Ok(NullableTimestamp::new(instant))
    }
}

/// Parameter type for payloads; `jsonb` would re-order keys before storage
fn json_type_info() -> PgTypeInfo {
    PgTypeInfo::with_name("json")
}

/// Write payload bytes as a `json` parameter, verbatim
fn encode_raw_json(bytes: &[u8], buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
    // Reject malformed documents before they reach the server
    let _: &JsonRawValue = serde_json::from_slice(bytes)?;
    buf.extend_from_slice(bytes);
    Ok(IsNull::No)
}

fn decode_raw_json(value: PgValueRef<'_>) -> Result<Vec<u8>, BoxDynError> {
    if value.is_null() {
        crate::trace_log!("payload column is NULL");
        return Ok(JSON_NULL.as_bytes().to_vec());
    }
    let raw = <&JsonRawValue as Decode<Postgres>>::decode(value)?;
    Ok(raw.get().as_bytes().to_vec())
}

impl Type<Postgres> for RawPayload {
    fn type_info() -> PgTypeInfo {
        json_type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <JsonValue as Type<Postgres>>::compatible(ty)
    }
}

impl Encode<'_, Postgres> for RawPayload {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
        if self.is_empty() {
            return encode_raw_json(JSON_NULL.as_bytes(), buf);
        }
        encode_raw_json(self.as_bytes(), buf)
    }
}

impl<'r> Decode<'r, Postgres> for RawPayload {
    fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
        decode_raw_json(value).map(RawPayload::from)
    }
}

impl Type<Postgres> for NullableRawPayload {
    fn type_info() -> PgTypeInfo {
        json_type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <JsonValue as Type<Postgres>>::compatible(ty)
    }
}

impl Encode<'_, Postgres> for NullableRawPayload {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
        if self.is_empty() {
            return Ok(IsNull::Yes);
        }
        encode_raw_json(self.as_bytes(), buf)
    }
}

impl<'r> Decode<'r, Postgres> for NullableRawPayload {
    fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
        decode_raw_json(value).map(NullableRawPayload::from)
    }
}
