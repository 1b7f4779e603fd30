use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use type_mapping::types::JSON_NULL;
use type_mapping::{FromPostgresValue, JsonWire, PostgresValue, ToPostgresValue};

use super::NullableRawPayload;

/// An encoded JSON document that is never stored as SQL NULL.
///
/// An empty payload is written as the JSON document `null`, so the column
/// always holds data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RawPayload(Vec<u8>);

impl RawPayload {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    /// Encode `value` as the payload
    pub fn from_json<T: Serialize + ?Sized>(value: &T) -> type_mapping::Result<Self> {
        super::encode_json(value).map(Self)
    }

    /// Decode the payload; an empty payload decodes as JSON `null`
    pub fn decode<T: DeserializeOwned>(&self) -> type_mapping::Result<T> {
        super::decode_json(&self.0)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<u8> {
        self.0
    }
}

impl From<Vec<u8>> for RawPayload {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<String> for RawPayload {
    fn from(text: String) -> Self {
        Self(text.into_bytes())
    }
}

impl From<&str> for RawPayload {
    fn from(text: &str) -> Self {
        Self(text.as_bytes().to_vec())
    }
}

impl From<NullableRawPayload> for RawPayload {
    fn from(payload: NullableRawPayload) -> Self {
        Self(payload.into_inner())
    }
}

impl AsRef<[u8]> for RawPayload {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromPostgresValue for RawPayload {
    fn from_postgres_value(value: &PostgresValue) -> type_mapping::Result<Self> {
        Ok(Self(super::scan_bytes(value)))
    }
}

impl ToPostgresValue for RawPayload {
    fn to_postgres_value(&self) -> type_mapping::Result<PostgresValue> {
        if self.0.is_empty() {
            return Ok(PostgresValue::Text(JSON_NULL.to_string()));
        }
        Ok(PostgresValue::from_raw(&self.0))
    }
}

impl JsonWire for RawPayload {
    fn marshal_json(&self) -> Vec<u8> {
        super::marshal_bytes(&self.0)
    }

    fn unmarshal_json(&mut self, data: &[u8]) -> type_mapping::Result<()> {
        super::unmarshal_bytes(&mut self.0, data);
        Ok(())
    }
}

impl Serialize for RawPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        super::serialize_bytes(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for RawPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        super::deserialize_bytes(deserializer).map(Self)
    }
}
