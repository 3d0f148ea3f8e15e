//! Raw node as returned by Kuzu, before normalization.

use serde::{Deserialize, Serialize};
use super::{PropertyMap, Value};
use crate::{Error, Result};

/// Kuzu internal identifier: `(table id, offset within the table)`.
///
/// Unique per element within one query result. Not stable across schema
/// changes, so it never leaves the normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InternalId {
    pub table: u64,
    pub offset: u64,
}

impl InternalId {
    pub fn new(table: u64, offset: u64) -> Self {
        Self { table, offset }
    }

    /// Read an `{table, offset}` map out of `element[field]`.
    pub fn from_field(element: &Value, field: &str) -> Result<Self> {
        let id = element.get(field)
            .ok_or_else(|| Error::MalformedElement(format!("missing '{field}'")))?;
        let part = |name: &str| -> Result<u64> {
            id.get(name)
                .and_then(Value::as_int)
                .and_then(|i| u64::try_from(i).ok())
                .ok_or_else(|| Error::MalformedElement(format!("'{field}.{name}' is not a non-negative integer")))
        };
        Ok(Self { table: part("table")?, offset: part("offset")? })
    }
}

impl std::fmt::Display for InternalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.table, self.offset)
    }
}

/// A node value from a result row.
#[derive(Debug, Clone, PartialEq)]
pub struct RawNode {
    pub id: InternalId,
    pub label: String,
    /// Every non-underscore field of the row value.
    pub properties: PropertyMap,
}

impl RawNode {
    pub fn new(id: InternalId, label: impl Into<String>) -> Self {
        Self { id, label: label.into(), properties: PropertyMap::new() }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Build from a `{_label, _id, ...}` map.
    pub fn from_value(value: &Value) -> Result<Self> {
        Ok(Self {
            id: InternalId::from_field(value, "_id")?,
            label: label_of(value)?,
            properties: public_fields(value),
        })
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

pub(crate) fn label_of(value: &Value) -> Result<String> {
    value.get("_label")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| Error::MalformedElement("'_label' is not a string".into()))
}

pub(crate) fn public_fields(value: &Value) -> PropertyMap {
    value.as_map()
        .map(|m| {
            m.iter()
                .filter(|(k, _)| !k.starts_with('_'))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_drops_internal_fields() {
        let v = Value::from(json!({
            "_label": "Person", "_id": {"table": 0, "offset": 3}, "name": "Ada", "age": 36,
        }));
        let node = RawNode::from_value(&v).unwrap();
        assert_eq!(node.id, InternalId::new(0, 3));
        assert_eq!(node.label, "Person");
        assert_eq!(node.properties.len(), 2);
        assert_eq!(node.get("name"), Some(&Value::from("Ada")));
    }

    #[test]
    fn test_bad_id_is_malformed() {
        let v = Value::from(json!({"_label": "Person", "_id": {"table": 0}}));
        assert!(matches!(RawNode::from_value(&v), Err(Error::MalformedElement(_))));
    }
}
