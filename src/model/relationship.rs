//! Raw relationship as returned by Kuzu, before normalization.

use super::node::{label_of, public_fields};
use super::property_map::strip_nulls;
use super::{InternalId, PropertyMap, Value};
use crate::Result;

/// A relationship value from a result row.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRelationship {
    pub id: InternalId,
    pub src: InternalId,
    pub dst: InternalId,
    /// Relationship table name (the relationship type).
    pub label: String,
    /// Non-underscore fields, with null values already removed.
    pub properties: PropertyMap,
}

impl RawRelationship {
    pub fn new(id: InternalId, src: InternalId, dst: InternalId, label: impl Into<String>) -> Self {
        Self { id, src, dst, label: label.into(), properties: PropertyMap::new() }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        let value = value.into();
        if !value.is_null() {
            self.properties.insert(key.into(), value);
        }
        self
    }

    /// Build from a `{_label, _id, _src, _dst, ...}` map. Null properties are dropped.
    pub fn from_value(value: &Value) -> Result<Self> {
        let mut properties = public_fields(value);
        strip_nulls(&mut properties);
        Ok(Self {
            id: InternalId::from_field(value, "_id")?,
            src: InternalId::from_field(value, "_src")?,
            dst: InternalId::from_field(value, "_dst")?,
            label: label_of(value)?,
            properties,
        })
    }
}
