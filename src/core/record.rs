use serde::{Deserialize, Serialize};
use super::field::Schema;
use super::value::Value;

/// Read access to a flat record by field name.
///
/// `field` returns `None` when the name is not a field of this record shape at
/// all, and `Some(Value::Null)` when the field exists but holds nothing.
pub trait Record {
    fn field(&self, name: &str) -> Option<Value>;

    /// Every field name in display order
    fn field_names(&self) -> Vec<String>;

    /// Static field table, when the record shape has one
    fn schema() -> Option<&'static Schema>
    where
        Self: Sized,
    {
        None
    }

    /// Value used by filters and sorting: missing fields read as Null
    fn value_of(&self, name: &str) -> Value {
        self.field(name).unwrap_or_default()
    }
}

impl<R: Record> Record for &R {
    fn field(&self, name: &str) -> Option<Value> {
        (**self).field(name)
    }

    fn field_names(&self) -> Vec<String> {
        (**self).field_names()
    }

    fn schema() -> Option<&'static Schema> {
        R::schema()
    }
}

/// Schemaless record backed by a JSON object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JsonRecord(pub serde_json::Map<String, serde_json::Value>);

impl JsonRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for fixtures
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }
}

impl Record for JsonRecord {
    fn field(&self, name: &str) -> Option<Value> {
        self.0.get(name).cloned().map(Value::from)
    }

    fn field_names(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for JsonRecord {
    fn from(map: serde_json::Map<String, serde_json::Value>) -> Self {
        Self(map)
    }
}
