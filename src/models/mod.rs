//! Data models for shortsmith.
//!
//! Values decoded from model replies. Both are produced once per successful
//! generation call and never mutated afterwards.

mod content_package;
mod strategic_report;

pub use content_package::{ContentPackage, Outline};
pub use strategic_report::{ACTION_PLAN_LEN, StrategicReport};

use serde::{Deserialize, Deserializer};

/// Describes the fields a decoded value is expected to carry.
///
/// Decoding is permissive: a reply that omits a field still decodes, with the
/// field left empty. `missing_fields` reports which required fields ended up
/// empty so callers can log or reject them.
pub trait Shape {
    /// Human-readable name of the shape.
    const NAME: &'static str;

    /// Wire names of the required fields.
    fn required_fields() -> &'static [&'static str];

    /// Wire names of required fields that are empty in this value.
    fn missing_fields(&self) -> Vec<&'static str>;

    /// Returns `true` if every required field is populated.
    fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

/// Returns `true` when a decoded string field carries no content.
pub(crate) fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Decodes `null` as the field's default value.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Decodes a string list, treating a `null` list as empty and dropping `null` items.
pub(crate) fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = Option::<Vec<Option<String>>>::deserialize(deserializer)?;
    Ok(items.into_iter().flatten().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    struct Loose {
        #[serde(deserialize_with = "null_as_default")]
        name: String,
        #[serde(deserialize_with = "string_list")]
        items: Vec<String>,
    }

    #[test]
    fn test_null_fields_take_defaults() {
        let value: Loose = serde_json::from_str(r#"{"name": null, "items": null}"#).unwrap();
        assert_eq!(value.name, "");
        assert!(value.items.is_empty());
    }

    #[test]
    fn test_null_list_items_are_dropped() {
        let value: Loose =
            serde_json::from_str(r#"{"name": "x", "items": ["a", null, "b"]}"#).unwrap();
        assert_eq!(value.items, vec!["a", "b"]);
    }

    #[test]
    fn test_wrong_type_still_fails() {
        assert!(serde_json::from_str::<Loose>(r#"{"name": 5}"#).is_err());
    }
}
