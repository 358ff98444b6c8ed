//! Decoding of plugin option blocks supplied by the host.
//!
//! Options arrive as a loosely typed key-value object. The agent configuration
//! file only knows strings, so integer fields accept either a JSON number or a
//! numeric string. Range rules live on the target type via [`Validate`].

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use crate::error::ConfError;

/// Post-decode checks for an options type
pub trait Validate {
    fn validate(&self) -> Result<(), ConfError>;
}

/// Decodes `options` into `T` and runs its validation rules.
///
/// A `null` block means the host supplied no options for this plugin.
pub fn unmarshal<T>(options: &Value) -> Result<T, ConfError>
where
    T: DeserializeOwned + Validate + Default,
{
    let decoded = if options.is_null() {
        T::default()
    } else {
        T::deserialize(options)?
    };

    decoded.validate()?;
    Ok(decoded)
}

/// Fails unless `value` lies within `min..=max`
pub fn check_range(field: &'static str, value: i64, min: i64, max: i64) -> Result<(), ConfError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(i64),
    Str(String),
}

/// `deserialize_with` helper for optional integer options
pub fn optional_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<IntOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(IntOrString::Int(value)) => Ok(Some(value)),
        Some(IntOrString::Str(raw)) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid integer value {:?}", raw))),
    }
}
