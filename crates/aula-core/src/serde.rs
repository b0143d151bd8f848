use serde::{Deserialize, Deserializer};

/// Treats `?flag=` as absent and accepts `true`/`false`/`1`/`0` for query flags.
pub fn deserialize_optional_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    match opt.as_deref() {
        None | Some("") => Ok(None),
        Some("true") | Some("1") => Ok(Some(true)),
        Some("false") | Some("0") => Ok(Some(false)),
        Some(other) => Err(serde::de::Error::custom(format!(
            "invalid boolean value '{}'",
            other
        ))),
    }
}

/// Tells an explicit `null` apart from an absent field in update bodies.
///
/// Use with `#[serde(default)]`: a missing field stays `None`, `null` becomes
/// `Some(None)` and a value becomes `Some(Some(value))`.
pub fn deserialize_nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
