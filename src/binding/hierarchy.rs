//! Relationship types drawn as nesting instead of as edges.

use std::collections::HashMap;

use crate::model::GraphEdge;
use super::Labels;

/// Registered `(relationship type, reversed)` pairs.
///
/// By default the relationship's target becomes the parent of its source;
/// `reversed` makes the source the parent. When a type is registered both
/// ways, the earlier registration decides.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentConfigurations {
    entries: Vec<(String, bool)>,
}

impl ParentConfigurations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, types: impl Into<Labels>, reverse: bool) {
        for rel_type in types.into().iter() {
            let entry = (rel_type.to_owned(), reverse);
            if !self.entries.contains(&entry) {
                self.entries.push(entry);
            }
        }
    }

    /// Drop every entry of the given types, whatever their direction.
    pub fn remove(&mut self, types: impl Into<Labels>) {
        let types = types.into();
        self.entries.retain(|(t, _)| !types.contains(t));
    }

    /// `Some(reversed)` when `rel_type` is registered.
    pub fn reversed_for(&self, rel_type: &str) -> Option<bool> {
        self.entries.iter().find(|(t, _)| t == rel_type).map(|&(_, r)| r)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.entries.iter().map(|(t, r)| (t.as_str(), *r))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Split `edges` into the ones still drawn and a child → parent id map.
///
/// When several converted edges name the same child, the last one wins.
pub fn convert_parent_relationships(
    edges: Vec<GraphEdge>,
    parents: &ParentConfigurations,
) -> (Vec<GraphEdge>, HashMap<String, String>) {
    let mut node_to_parent = HashMap::new();
    let mut kept = Vec::with_capacity(edges.len());

    for edge in edges {
        let reversed = parents.reversed_for(edge.label());
        match reversed {
            Some(false) => { node_to_parent.insert(edge.start, edge.end); }
            Some(true) => { node_to_parent.insert(edge.end, edge.start); }
            None => kept.push(edge),
        }
    }

    tracing::debug!(converted = node_to_parent.len(), kept = kept.len(), "converted parent relationships");
    (kept, node_to_parent)
}
