//! Custom serialization for Record.
//!
//! The backend stores documents with an `_id` key and a `__v` version key.
//! On read, `_id` becomes the record ID and `__v` is dropped. On write, the
//! ID is emitted back as `_id` when present and null fields are skipped.

use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::MapAccess;
use serde::de::Visitor;
use serde::ser::SerializeMap;

use super::Record;
use super::Value;

/// Key holding the document identifier.
pub(crate) const ID_KEY: &str = "_id";

/// Document version key maintained by the backend.
const VERSION_KEY: &str = "__v";

// =============================================================================
// Serialization (for writes)
// =============================================================================

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;

        if let Some(id) = &self.id {
            map.serialize_entry(ID_KEY, id)?;
        }

        for (key, value) in &self.fields {
            if value.is_null() {
                continue;
            }
            map.serialize_entry(key, value)?;
        }

        map.end()
    }
}

// =============================================================================
// Deserialization (from reads)
// =============================================================================

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RecordVisitor)
    }
}

struct RecordVisitor;

impl<'de> Visitor<'de> for RecordVisitor {
    type Value = Record;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a map representing a content record")
    }

    fn visit_map<M>(self, mut map: M) -> Result<Record, M::Error>
    where
        M: MapAccess<'de>,
    {
        let mut record = Record::new();

        while let Some(key) = map.next_key::<String>()? {
            let value: serde_json::Value = map.next_value()?;

            if key == ID_KEY {
                record.id = match value {
                    serde_json::Value::Null => None,
                    serde_json::Value::String(s) => Some(s),
                    other => Some(other.to_string()),
                };
            } else if key == VERSION_KEY {
                // Backend bookkeeping
            } else {
                record.fields.insert(key, Value::from_json(value));
            }
        }

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_with_id() {
        let record = Record::with_id("66a1").set("caption", "Lobby");

        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"_id\":\"66a1\""));
        assert!(json.contains("\"caption\":\"Lobby\""));
    }

    #[test]
    fn test_serialize_skips_null() {
        let record = Record::new().set("caption", Value::Null).set("priority", 1i64);

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(json, r#"{"priority":1}"#);
    }

    #[test]
    fn test_deserialize_document() {
        let json = r#"{
            "_id": "66a1f0c2e4b0a1b2c3d4e5f6",
            "__v": 0,
            "projectName": "Skyline",
            "areas": [1200, 950.5],
            "isActive": true
        }"#;
        let record: Record = serde_json::from_str(json).unwrap();

        assert_eq!(record.id(), Some("66a1f0c2e4b0a1b2c3d4e5f6"));
        assert!(!record.contains("__v"));
        assert!(!record.contains("_id"));
        assert_eq!(record.get_string("projectName").unwrap(), Some("Skyline"));
        assert_eq!(
            record.get_list("areas").unwrap(),
            Some(&[Value::Int(1200), Value::Float(950.5)][..])
        );
        assert_eq!(record.get_bool("isActive").unwrap(), Some(true));
    }

    #[test]
    fn test_deserialize_numeric_id() {
        let record: Record = serde_json::from_str(r#"{"_id": 7, "name": "x"}"#).unwrap();
        assert_eq!(record.id(), Some("7"));
    }
}
