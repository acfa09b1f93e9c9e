use serde::{Deserialize, Deserializer};
use validator::ValidationError;

/// Rejects values that are empty once surrounding whitespace is removed.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank")
            .with_message("This field may not be blank.".into()));
    }

    Ok(())
}

/// Keeps an explicit `null` apart from a missing key: pair it with
/// `#[serde(default)]` so a missing key stays `None` and `null` becomes
/// `Some(None)`.
pub fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

pub(crate) fn null_error() -> ValidationError {
    ValidationError::new("null").with_message("This field may not be null.".into())
}
