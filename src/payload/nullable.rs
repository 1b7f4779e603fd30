use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use type_mapping::{FromPostgresValue, JsonWire, PostgresValue, ToPostgresValue};

use super::RawPayload;

/// An encoded JSON document whose empty state is stored as SQL NULL
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NullableRawPayload(Vec<u8>);

impl NullableRawPayload {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn from_json<T: Serialize + ?Sized>(value: &T) -> type_mapping::Result<Self> {
        super::encode_json(value).map(Self)
    }

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

impl From<Vec<u8>> for NullableRawPayload {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<String> for NullableRawPayload {
    fn from(text: String) -> Self {
        Self(text.into_bytes())
    }
}

impl From<&str> for NullableRawPayload {
    fn from(text: &str) -> Self {
        Self(text.as_bytes().to_vec())
    }
}

impl From<RawPayload> for NullableRawPayload {
    fn from(payload: RawPayload) -> Self {
        Self(payload.into_inner())
    }
}

impl AsRef<[u8]> for NullableRawPayload {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromPostgresValue for NullableRawPayload {
    fn from_postgres_value(value: &PostgresValue) -> type_mapping::Result<Self> {
        Ok(Self(super::scan_bytes(value)))
    }
}

impl ToPostgresValue for NullableRawPayload {
    fn to_postgres_value(&self) -> type_mapping::Result<PostgresValue> {
        if self.0.is_empty() {
            return Ok(PostgresValue::Null);
        }
        Ok(PostgresValue::from_raw(&self.0))
    }
}

impl JsonWire for NullableRawPayload {
    fn marshal_json(&self) -> Vec<u8> {
        super::marshal_bytes(&self.0)
    }

    fn unmarshal_json(&mut self, data: &[u8]) -> type_mapping::Result<()> {
        super::unmarshal_bytes(&mut self.0, data);
        Ok(())
    }
}

impl Serialize for NullableRawPayload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        super::serialize_bytes(&self.0, serializer)
    }
}

impl<'de> Deserialize<'de> for NullableRawPayload {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        super::deserialize_bytes(deserializer).map(Self)
    }
}
