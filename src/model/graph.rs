//! Normalized graph items handed to the renderer.

use serde::Serialize;
use super::{PropertyMap, Value};

/// Property key holding the node label / relationship type.
pub const LABEL_KEY: &str = "label";

/// A deduplicated node with a deterministic id (`"{label}_{primary key}"`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphNode {
    pub id: String,
    pub properties: PropertyMap,
}

impl GraphNode {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        let mut properties = PropertyMap::new();
        properties.insert(LABEL_KEY.into(), Value::String(label.into()));
        Self { id: id.into(), properties }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn label(&self) -> &str {
        label_in(&self.properties)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

/// A deduplicated relationship (`"{src_label}_{dst_label}_{offset}"`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphEdge {
    pub id: String,
    pub start: String,
    pub end: String,
    pub properties: PropertyMap,
}

impl GraphEdge {
    pub fn new(
        id: impl Into<String>,
        start: impl Into<String>,
        end: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        let mut properties = PropertyMap::new();
        properties.insert(LABEL_KEY.into(), Value::String(label.into()));
        Self { id: id.into(), start: start.into(), end: end.into(), properties }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    pub fn label(&self) -> &str {
        label_in(&self.properties)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

fn label_in(props: &PropertyMap) -> &str {
    props.get(LABEL_KEY).and_then(Value::as_str).unwrap_or_default()
}

/// Borrowed view of either item kind, as passed to mappings and dynamic bindings.
#[derive(Debug, Clone, Copy)]
pub enum ItemRef<'a> {
    Node(&'a GraphNode),
    Edge(&'a GraphEdge),
}

impl<'a> ItemRef<'a> {
    pub fn id(&self) -> &'a str {
        match self {
            ItemRef::Node(n) => &n.id,
            ItemRef::Edge(e) => &e.id,
        }
    }

    pub fn label(&self) -> &'a str {
        match self {
            ItemRef::Node(n) => n.label(),
            ItemRef::Edge(e) => e.label(),
        }
    }

    pub fn properties(&self) -> &'a PropertyMap {
        match self {
            ItemRef::Node(n) => &n.properties,
            ItemRef::Edge(e) => &e.properties,
        }
    }

    pub fn get(&self, key: &str) -> Option<&'a Value> {
        self.properties().get(key)
    }
}

impl<'a> From<&'a GraphNode> for ItemRef<'a> {
    fn from(n: &'a GraphNode) -> Self { ItemRef::Node(n) }
}

impl<'a> From<&'a GraphEdge> for ItemRef<'a> {
    fn from(e: &'a GraphEdge) -> Self { ItemRef::Edge(e) }
}

/// Output of the normalizer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GraphData {
    pub nodes: Vec<GraphNode>,
    pub edges: Vec<GraphEdge>,
}

impl GraphData {
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&GraphEdge> {
        self.edges.iter().find(|e| e.id == id)
    }
}
