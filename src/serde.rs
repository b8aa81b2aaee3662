use serde::de::{Deserialize, Deserializer};

/// Set `deserialize_with` to this fn to treat anything but a JSON string as
/// absent. Pair it with `#[serde(default)]` so a missing field works too.
pub(crate) fn deserialize_string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        _ => None,
    })
}
