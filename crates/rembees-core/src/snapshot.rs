//! Versioned encoding for the persisted slices.
//!
//! Each record is written as `{"schema_version": N, "data": ...}` so a damaged or
//! newer record can be detected per slice. Bare values written before the
//! envelope existed are still accepted and flagged as legacy.

use rembees_domain::Theme;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

use crate::CoreError;

pub const TRANSACTIONS_SCHEMA_VERSION: u32 = 1;
pub const USER_SCHEMA_VERSION: u32 = 1;
pub const THEME_SCHEMA_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    schema_version: u32,
    data: &'a T,
}

#[derive(Deserialize)]
struct Envelope {
    schema_version: u32,
    data: Value,
}

/// A decoded slice and whether it came from a pre-envelope record.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    pub value: T,
    pub legacy: bool,
}

pub fn encode<T: Serialize>(schema_version: u32, data: &T) -> Result<String, CoreError> {
    Ok(serde_json::to_string(&EnvelopeRef {
        schema_version,
        data,
    })?)
}

pub fn decode<T: DeserializeOwned>(
    key: &str,
    raw: &str,
    supported: u32,
) -> Result<Decoded<T>, CoreError> {
    let value: Value = serde_json::from_str(raw)?;
    decode_value(key, value, supported)
}

/// Themes were historically stored as the bare, unquoted name.
pub fn decode_theme(raw: &str) -> Result<Decoded<Theme>, CoreError> {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => decode_value(crate::storage::THEME_KEY, value, THEME_SCHEMA_VERSION),
        Err(_) => raw
            .parse::<Theme>()
            .map(|value| Decoded {
                value,
                legacy: true,
            })
            .map_err(|err| CoreError::Serde(err.to_string())),
    }
}

fn decode_value<T: DeserializeOwned>(
    key: &str,
    value: Value,
    supported: u32,
) -> Result<Decoded<T>, CoreError> {
    if !is_envelope(&value) {
        return Ok(Decoded {
            value: serde_json::from_value(value)?,
            legacy: true,
        });
    }
    let envelope: Envelope = serde_json::from_value(value)?;
    if envelope.schema_version > supported {
        return Err(CoreError::UnsupportedSchema {
            key: key.to_string(),
            found: envelope.schema_version,
            supported,
        });
    }
    Ok(Decoded {
        value: serde_json::from_value(envelope.data)?,
        legacy: false,
    })
}

fn is_envelope(value: &Value) -> bool {
    value
        .as_object()
        .map(|map| map.len() == 2 && map.contains_key("schema_version") && map.contains_key("data"))
        .unwrap_or(false)
}
