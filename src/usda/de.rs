//! Lenient field decoders for FDC documents
//!
//! FDC exports carry explicit `null`s and write some integers as floats (`1.0`).
//! Both decode to the field's default or whole value instead of failing the document.

use serde::de::Error;
use serde::{Deserialize, Deserializer};

/// `null` becomes `T::default()`
pub fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Integer that may be written as a whole-number float; `null` becomes 0
pub fn whole_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Number {
        Int(i64),
        Float(f64),
    }

    match Option::<Number>::deserialize(deserializer)? {
        None => Ok(0),
        Some(Number::Int(n)) => Ok(n),
        Some(Number::Float(f)) if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 => {
            Ok(f as i64)
        }
        Some(Number::Float(f)) => Err(D::Error::custom(format!("expected a whole number, got {}", f))),
    }
}
