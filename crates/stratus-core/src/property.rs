//! Property map helpers
//!
//! Resource inputs and resolved state travel as untyped JSON object maps;
//! typed argument and state structs convert through these helpers.

use crate::error::{Error, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Untyped property mapping exchanged with the backend
pub type PropertyMap = serde_json::Map<String, serde_json::Value>;

/// Serialize a typed value into a property map.
///
/// Fails if the value does not serialize to a JSON object.
pub fn to_property_map<T: Serialize>(value: &T) -> Result<PropertyMap> {
    match serde_json::to_value(value)? {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(Error::invalid_properties(format!(
            "expected an object, got {other}"
        ))),
    }
}

/// Deserialize a typed value out of a property map
pub fn from_property_map<T: DeserializeOwned>(map: &PropertyMap) -> Result<T> {
    Ok(serde_json::from_value(serde_json::Value::Object(
        map.clone(),
    ))?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        port: i64,
    }

    #[test]
    fn round_trips_typed_structs() {
        let sample = Sample {
            name: "web".to_string(),
            port: 80,
        };
        let map = to_property_map(&sample).unwrap();
        assert_eq!(map["name"], "web");
        assert_eq!(map["port"], 80);

        let back: Sample = from_property_map(&map).unwrap();
        assert_eq!(back, sample);
    }

    #[test]
    fn rejects_non_object_values() {
        let err = to_property_map(&42).unwrap_err();
        assert!(matches!(err, Error::InvalidProperties { .. }));
    }
}
