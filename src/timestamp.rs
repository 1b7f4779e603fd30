//! Nullable timestamp adapter
//!
//! [`NullableTimestamp`] wraps a UTC instant that may be absent. The absent
//! state is the sentinel for SQL NULL and JSON `null` alike:
//!
//! | In memory | Database column | JSON |
//! |---|---|---|
//! | [`NullableTimestamp::NULL`] | SQL NULL | `null` |
//! | instant `t` | `t` | `"<RFC 3339 of t>"` |
//!
//! The zero instant `0001-01-01T00:00:00Z` is treated as absent wherever it is
//! read, so it can never be stored as a present value.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use config::{SecondsPrecision, TimestampConfig};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use type_mapping::types::JSON_NULL;
use type_mapping::{FromPostgresValue, JsonWire, PostgresValue, ToPostgresValue, TypeMappingError};

/// Seconds between `0001-01-01T00:00:00Z` and the Unix epoch
const ZERO_INSTANT_SECS: i64 = -62_135_596_800;

/// Postgres text output for `timestamptz`, e.g. `2024-03-01 12:30:00.5+02`
const PG_TIMESTAMPTZ_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f%#z";
const PG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// A point in time that may be absent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NullableTimestamp(Option<DateTime<Utc>>);

/// Whether `instant` is the zero instant that stands for "absent"
pub fn is_zero_instant(instant: &DateTime<Utc>) -> bool {
    instant.timestamp() == ZERO_INSTANT_SECS && instant.timestamp_subsec_nanos() == 0
}

impl NullableTimestamp {
    pub const NULL: Self = Self(None);

    pub fn new(instant: DateTime<Utc>) -> Self {
        if is_zero_instant(&instant) {
            Self::NULL
        } else {
            Self(Some(instant))
        }
    }

    pub fn now() -> Self {
        Self::new(Utc::now())
    }

    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }

    pub fn instant(&self) -> Option<DateTime<Utc>> {
        self.0
    }

    /// JSON bytes using the given rendering settings
    pub fn marshal_json_with(&self, config: &TimestampConfig) -> Vec<u8> {
        match &self.0 {
            Some(instant) => format!("\"{}\"", format_instant(instant, config)).into_bytes(),
            None => JSON_NULL.as_bytes().to_vec(),
        }
    }
}

fn seconds_format(precision: SecondsPrecision) -> SecondsFormat {
    match precision {
        SecondsPrecision::Auto => SecondsFormat::AutoSi,
        SecondsPrecision::Secs => SecondsFormat::Secs,
        SecondsPrecision::Millis => SecondsFormat::Millis,
        SecondsPrecision::Micros => SecondsFormat::Micros,
        SecondsPrecision::Nanos => SecondsFormat::Nanos,
    }
}

fn format_instant(instant: &DateTime<Utc>, config: &TimestampConfig) -> String {
    instant.to_rfc3339_opts(seconds_format(config.precision), config.use_z)
}

/// Parse the text form a driver may hand back for a timestamp column
fn parse_column_text(text: &str) -> Option<DateTime<Utc>> {
    let text = text.trim();
    DateTime::parse_from_rfc3339(text)
        .or_else(|_| DateTime::parse_from_str(text, PG_TIMESTAMPTZ_FORMAT))
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| NaiveDateTime::parse_from_str(text, PG_TIMESTAMP_FORMAT).map(|n| n.and_utc()))
        .ok()
}

/// Parse a JSON timestamp string: RFC 3339 with `T` between date and time
fn parse_json_text(text: &str) -> Result<DateTime<Utc>, String> {
    if text.as_bytes().get(10) != Some(&b'T') {
        return Err(format!("invalid RFC 3339 timestamp {text:?}: expected 'T' separator"));
    }
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("invalid RFC 3339 timestamp {text:?}: {e}"))
}

impl From<DateTime<Utc>> for NullableTimestamp {
    fn from(instant: DateTime<Utc>) -> Self {
        Self::new(instant)
    }
}

impl From<Option<DateTime<Utc>>> for NullableTimestamp {
    fn from(instant: Option<DateTime<Utc>>) -> Self {
        instant.map_or(Self::NULL, Self::new)
    }
}

impl From<NullableTimestamp> for Option<DateTime<Utc>> {
    fn from(ts: NullableTimestamp) -> Self {
        ts.0
    }
}

impl fmt::Display for NullableTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Some(instant) => f.write_str(&format_instant(instant, &TimestampConfig::default())),
            None => f.write_str(JSON_NULL),
        }
    }
}

impl FromPostgresValue for NullableTimestamp {
    fn from_postgres_value(value: &PostgresValue) -> type_mapping::Result<Self> {
        match value {
            PostgresValue::Null => Ok(Self::NULL),
            PostgresValue::Timestamp(instant) => Ok(Self::new(*instant)),
            PostgresValue::Text(text) => parse_column_text(text)
                .map(Self::new)
                .ok_or_else(|| TypeMappingError::conversion("NullableTimestamp", format!("text {text:?}"))),
            PostgresValue::Bytes(bytes) => std::str::from_utf8(bytes)
                .ok()
                .and_then(parse_column_text)
                .map(Self::new)
                .ok_or_else(|| TypeMappingError::conversion("NullableTimestamp", "unparseable bytes")),
            other => Err(TypeMappingError::conversion("NullableTimestamp", other.type_name())),
        }
    }
}

impl ToPostgresValue for NullableTimestamp {
    fn to_postgres_value(&self) -> type_mapping::Result<PostgresValue> {
        Ok(self.0.into())
    }
}

impl JsonWire for NullableTimestamp {
    fn marshal_json(&self) -> Vec<u8> {
        self.marshal_json_with(&TimestampConfig::default())
    }

    fn unmarshal_json(&mut self, data: &[u8]) -> type_mapping::Result<()> {
        *self = serde_json::from_slice(data).map_err(|e| TypeMappingError::Format(e.to_string()))?;
        crate::trace_log!("unmarshalled timestamp {}", self);
        Ok(())
    }
}

impl Serialize for NullableTimestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.0 {
            Some(instant) => {
                serializer.serialize_str(&format_instant(instant, &TimestampConfig::default()))
            }
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for NullableTimestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(text) => parse_json_text(&text).map(Self::new).map_err(de::Error::custom),
            None => Ok(Self::NULL),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 15).unwrap()
    }

    fn zero_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_zero_instant_is_null() {
        assert!(is_zero_instant(&zero_instant()));
        assert!(NullableTimestamp::new(zero_instant()).is_null());
        assert!(!NullableTimestamp::new(sample()).is_null());
        assert!(NullableTimestamp::default().is_null());
    }

    #[test]
    fn test_database_round_trip() {
        let ts = NullableTimestamp::new(sample());
        let value = ts.to_postgres_value().unwrap();
        assert_eq!(value, PostgresValue::Timestamp(sample()));

        let mut scanned = NullableTimestamp::NULL;
        scanned.scan(&value).unwrap();
        assert_eq!(scanned, ts);
    }

    #[test]
    fn test_null_to_database() {
        assert_eq!(
            NullableTimestamp::NULL.to_postgres_value().unwrap(),
            PostgresValue::Null
        );
        assert_eq!(
            NullableTimestamp::new(zero_instant()).to_postgres_value().unwrap(),
            PostgresValue::Null
        );
    }

    #[test]
    fn test_scan_null_resets_to_zero() {
        let mut ts = NullableTimestamp::new(sample());
        ts.scan(&PostgresValue::Null).unwrap();
        assert!(ts.is_null());
    }

    #[test]
    fn test_scan_text_forms() {
        let expected = NullableTimestamp::new(sample());
        for text in [
            "2024-03-01T12:30:15Z",
            "2024-03-01T14:30:15+02:00",
            "2024-03-01 12:30:15+00",
            "2024-03-01 12:30:15",
        ] {
            let ts = NullableTimestamp::from_postgres_value(&PostgresValue::from(text)).unwrap();
            assert_eq!(ts, expected, "{text}");
        }

        let ts = NullableTimestamp::from_postgres_value(&PostgresValue::from(
            b"2024-03-01T12:30:15Z".to_vec(),
        ))
        .unwrap();
        assert_eq!(ts, expected);
    }

    #[test]
    fn test_scan_rejects_other_shapes() {
        let mut ts = NullableTimestamp::new(sample());
        let err = ts.scan(&PostgresValue::Integer(5)).unwrap_err();
        assert!(matches!(err, TypeMappingError::Conversion { .. }));
        assert_eq!(ts, NullableTimestamp::new(sample()));

        let err = NullableTimestamp::from_postgres_value(&PostgresValue::from("yesterday"))
            .unwrap_err();
        assert!(matches!(err, TypeMappingError::Conversion { .. }));
    }

    #[test]
    fn test_marshal_json() {
        assert_eq!(NullableTimestamp::NULL.marshal_json(), b"null");
        assert_eq!(
            NullableTimestamp::new(sample()).marshal_json(),
            b"\"2024-03-01T12:30:15Z\""
        );
        assert_eq!(
            serde_json::to_vec(&NullableTimestamp::new(sample())).unwrap(),
            NullableTimestamp::new(sample()).marshal_json()
        );
    }

    #[test]
    fn test_marshal_json_with_config() {
        let ts = NullableTimestamp::new(sample());
        let config = TimestampConfig::new(SecondsPrecision::Millis, false);
        assert_eq!(
            ts.marshal_json_with(&config),
            b"\"2024-03-01T12:30:15.000+00:00\""
        );
    }

    #[test]
    fn test_json_round_trip_keeps_nanos() {
        let instant = Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap();
        let ts = NullableTimestamp::new(instant);
        let mut decoded = NullableTimestamp::NULL;
        decoded.unmarshal_json(&ts.marshal_json()).unwrap();
        assert_eq!(decoded, ts);
    }

    #[test]
    fn test_unmarshal_null_is_zero() {
        let mut ts = NullableTimestamp::new(sample());
        ts.unmarshal_json(b"null").unwrap();
        assert!(ts.is_null());

        let mut ts = NullableTimestamp::new(sample());
        ts.unmarshal_json(b"\"0001-01-01T00:00:00Z\"").unwrap();
        assert!(ts.is_null());
    }

    #[test]
    fn test_unmarshal_format_errors() {
        let mut ts = NullableTimestamp::new(sample());
        let inputs: [&[u8]; 6] = [
            b"{",
            b"42",
            b"\"2024-03-01\"",
            b"\"not a time\"",
            b"\"2024-03-01 12:30:15Z\"",
            b"\"2024-03-01t12:30:15Z\"",
        ];
        for input in inputs {
            let err = ts.unmarshal_json(input).unwrap_err();
            assert!(matches!(err, TypeMappingError::Format(_)));
        }
        assert_eq!(ts, NullableTimestamp::new(sample()));
    }

    #[test]
    fn test_unmarshal_missing_receiver() {
        let err = NullableTimestamp::unmarshal_json_into(None, b"null").unwrap_err();
        assert!(matches!(err, TypeMappingError::NilReceiver(_)));
    }

    #[test]
    fn test_option_conversions() {
        let ts = NullableTimestamp::from(Some(sample()));
        assert_eq!(Option::<DateTime<Utc>>::from(ts), Some(sample()));
        assert_eq!(NullableTimestamp::from(None::<DateTime<Utc>>), NullableTimestamp::NULL);
        assert_eq!(NullableTimestamp::NULL.to_string(), "null");
        assert_eq!(ts.to_string(), "2024-03-01T12:30:15Z");
    }
}
