/// Token details handed from the fetch source to the report generator
use serde::Serialize;
use serde_json::{Map, Value};

/// Key/value record describing a token
///
/// Field order is kept as produced by the source, so the report lists
/// fields in the order the source emitted them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TokenDetails {
    fields: Map<String, Value>,
}

impl TokenDetails {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Build from any serializable record that serializes to a JSON object
    pub fn from_record<T: Serialize>(record: &T) -> Result<Self, serde_json::Error> {
        match serde_json::to_value(record)? {
            Value::Object(fields) => Ok(Self { fields }),
            other => {
                let mut fields = Map::new();
                fields.insert("value".to_string(), other);
                Ok(Self { fields })
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Symbol, else name, else address, else `"unknown"`
    pub fn display_name(&self) -> &str {
        ["symbol", "name", "address", "mint"]
            .iter()
            .filter_map(|key| self.get_str(key))
            .find(|value| !value.trim().is_empty())
            .unwrap_or("unknown")
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.fields
    }
}
