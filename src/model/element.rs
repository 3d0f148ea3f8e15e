//! Shape-based classification of result row values.

use super::{PathBundle, RawNode, RawRelationship, Value};
use crate::Result;

/// A graph element found in a result row.
#[derive(Debug, Clone, PartialEq)]
pub enum RawElement {
    Node(RawNode),
    Relationship(RawRelationship),
    Path(PathBundle),
}

/// The shape a row value has, decided by which reserved keys it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementShape {
    Node,
    Relationship,
    Path,
    Other,
}

impl ElementShape {
    pub fn of(value: &Value) -> Self {
        let has = |k: &str| value.contains_key(k);
        let endpoints = has("_src") && has("_dst");
        if has("_label") && has("_id") && !endpoints {
            ElementShape::Node
        } else if has("_label") && endpoints {
            ElementShape::Relationship
        } else if has("_nodes") && has("_rels") {
            ElementShape::Path
        } else {
            ElementShape::Other
        }
    }
}

impl RawElement {
    /// Classify a row value.
    ///
    /// Returns `Ok(None)` for null, empty maps and values that are not
    /// graph elements (scalar columns).
    pub fn classify(value: &Value) -> Result<Option<RawElement>> {
        if value.is_empty_element() {
            return Ok(None);
        }
        let element = match ElementShape::of(value) {
            ElementShape::Node => RawElement::Node(RawNode::from_value(value)?),
            ElementShape::Relationship => RawElement::Relationship(RawRelationship::from_value(value)?),
            ElementShape::Path => RawElement::Path(PathBundle::from_value(value)?),
            ElementShape::Other => return Ok(None),
        };
        Ok(Some(element))
    }
}
