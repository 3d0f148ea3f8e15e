//! PathBundle: the node and relationship collections of a recursive
//! (variable-length) relationship value.

use super::{RawNode, RawRelationship, Value};
use crate::{Error, Result};

/// `{_nodes: [...], _rels: [...]}` as produced for variable-length patterns.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PathBundle {
    pub nodes: Vec<RawNode>,
    pub relationships: Vec<RawRelationship>,
}

impl PathBundle {
    /// Number of relationships traversed.
    pub fn hops(&self) -> usize {
        self.relationships.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.relationships.is_empty()
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        let nodes = members(value, "_nodes")?
            .iter()
            .filter(|v| !v.is_empty_element())
            .map(RawNode::from_value)
            .collect::<Result<Vec<_>>>()?;
        let relationships = members(value, "_rels")?
            .iter()
            .filter(|v| !v.is_empty_element())
            .map(RawRelationship::from_value)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { nodes, relationships })
    }
}

fn members<'a>(value: &'a Value, field: &str) -> Result<&'a [Value]> {
    match value.get(field) {
        Some(Value::List(items)) => Ok(items),
        Some(Value::Null) => Ok(&[]),
        _ => Err(Error::MalformedElement(format!("'{field}' is not a list"))),
    }
}
