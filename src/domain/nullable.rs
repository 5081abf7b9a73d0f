//! Serde helpers for fields the API may send as `null` or leave out.

use serde::{Deserialize, Deserializer};

/// Deserialize `null` as the type's default.
///
/// Pair with `#[serde(default)]` so a missing key behaves the same way.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
