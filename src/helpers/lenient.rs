//! Deserializers for form-style JSON, where numbers and dates may arrive as
//! strings and an empty string means "not provided".

use serde::{de::Error, Deserialize, Deserializer};
use serde_json::Value;
use std::{fmt::Display, str::FromStr};

/// Accept `null`, a missing field, a blank string, a string, or a number.
///
/// Use together with `#[serde(default)]` so absent fields become `None`.
pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let raw = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(None),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => return Err(D::Error::custom(format!("unexpected value {}", other))),
    };

    raw.parse::<T>()
        .map(Some)
        .map_err(|e| D::Error::custom(format!("invalid value '{}': {}", raw, e)))
}
