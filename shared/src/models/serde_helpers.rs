//! Serde helpers for partial-update payloads

use serde::{Deserialize, Deserializer};

/// Deserialize a nullable field of a partial update into `Option<Option<T>>`.
///
/// - field absent      -> `None` (leave unchanged, needs `#[serde(default)]`)
/// - field `null`      -> `Some(None)` (clear)
/// - field `value`     -> `Some(Some(value))` (set)
pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Deserialize bool that treats null as true
pub fn bool_true<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<bool>::deserialize(deserializer).map(|opt| opt.unwrap_or(true))
}
