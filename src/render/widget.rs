//! In-memory graph widget.
//!
//! Reference implementation of `Renderer`. It stores the graph and every
//! installed mapping, and `snapshot()` evaluates them into the JSON document
//! a front end would draw from.
//!
//! ## Limitations
//!
//! - **No drawing**: `show()` checks that every edge joins displayed nodes,
//!   then only records that the widget was displayed.
//! - **Layout by name**: the selected `Layout` is carried along, never run.

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde_json::{json, Map as JsonMap, Value as Json};

use crate::binding::Binding;
use crate::config::WidgetOptions;
use crate::model::{GraphEdge, GraphNode, ItemRef, Value};
use crate::{Error, Result};
use super::{mapping, null_mapping, EdgeAttribute, Layout, Mapping, NodeAttribute, Renderer};

/// Fallback color for items nobody colored.
pub const DEFAULT_COLOR: &str = "#15AFAC";
/// Fallback node size, `[width, height]`.
pub const DEFAULT_NODE_SIZE: [i64; 2] = [55, 55];

// ============================================================================
// GraphWidget
// ============================================================================

pub struct GraphWidget {
    options: WidgetOptions,
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    directed: bool,
    layout: Layout,
    node_mappings: HashMap<NodeAttribute, Mapping>,
    edge_mappings: HashMap<EdgeAttribute, Mapping>,
    node_parent_mapping: Mapping,
    heat_mapping: Mapping,
    node_cell_mapping: Option<Binding>,
    shown: bool,
}

impl GraphWidget {
    pub fn new(options: WidgetOptions) -> Self {
        let layout = options.layout;
        Self {
            options,
            nodes: Vec::new(),
            edges: Vec::new(),
            directed: false,
            layout,
            node_mappings: HashMap::new(),
            edge_mappings: HashMap::new(),
            node_parent_mapping: null_mapping(),
            heat_mapping: null_mapping(),
            node_cell_mapping: None,
            shown: false,
        }
    }

    pub fn options(&self) -> &WidgetOptions {
        &self.options
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    pub fn node_cell_mapping(&self) -> Option<&Binding> {
        self.node_cell_mapping.as_ref()
    }

    /// Installed mapping for `attribute`, or the default.
    pub fn node_mapping(&self, attribute: NodeAttribute) -> Mapping {
        self.node_mappings.get(&attribute)
            .cloned()
            .unwrap_or_else(|| self.default_node_mapping(attribute))
    }

    pub fn edge_mapping(&self, attribute: EdgeAttribute) -> Mapping {
        self.edge_mappings.get(&attribute)
            .cloned()
            .unwrap_or_else(|| self.default_edge_mapping(attribute))
    }

    pub fn heat_mapping(&self) -> Mapping {
        self.heat_mapping.clone()
    }

    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Evaluate `attribute` for the node with `id`.
    pub fn node_value(&self, id: &str, attribute: NodeAttribute) -> Option<Value> {
        let (index, node) = self.nodes.iter().enumerate().find(|(_, n)| n.id == id)?;
        Some(self.node_mapping(attribute)(index, ItemRef::Node(node)))
    }

    pub fn edge_value(&self, id: &str, attribute: EdgeAttribute) -> Option<Value> {
        let (index, edge) = self.edges.iter().enumerate().find(|(_, e)| e.id == id)?;
        Some(self.edge_mapping(attribute)(index, ItemRef::Edge(edge)))
    }

    /// Parent id of the node with `id`, if it has one.
    pub fn parent_of(&self, id: &str) -> Option<String> {
        let (index, node) = self.nodes.iter().enumerate().find(|(_, n)| n.id == id)?;
        match (self.node_parent_mapping)(index, ItemRef::Node(node)) {
            Value::Null => None,
            parent => Some(parent.to_string()),
        }
    }

    /// Every mapping evaluated for every item.
    pub fn snapshot(&self) -> Json {
        let nodes: Vec<Json> = self.nodes.iter().enumerate().map(|(i, node)| {
            let item = ItemRef::Node(node);
            let mut entry = item_entry(item);
            for attribute in NodeAttribute::ALL {
                entry.insert(attribute.key().into(), self.node_mapping(attribute)(i, item).to_json());
            }
            entry.insert("parent".into(), (self.node_parent_mapping)(i, item).to_json());
            entry.insert("heat".into(), (self.heat_mapping)(i, item).to_json());
            if let Some(cell) = &self.node_cell_mapping {
                entry.insert("cell".into(), cell.resolve(item).to_json());
            }
            Json::Object(entry)
        }).collect();

        let edges: Vec<Json> = self.edges.iter().enumerate().map(|(i, edge)| {
            let item = ItemRef::Edge(edge);
            let mut entry = item_entry(item);
            entry.insert("start".into(), Json::String(edge.start.clone()));
            entry.insert("end".into(), Json::String(edge.end.clone()));
            for attribute in EdgeAttribute::ALL {
                entry.insert(attribute.key().into(), self.edge_mapping(attribute)(i, item).to_json());
            }
            entry.insert("heat".into(), (self.heat_mapping)(i, item).to_json());
            Json::Object(entry)
        }).collect();

        json!({
            "directed": self.directed,
            "layout": self.layout.name(),
            "options": serde_json::to_value(&self.options).unwrap_or(Json::Null),
            "nodes": nodes,
            "edges": edges,
        })
    }
}

fn item_entry(item: ItemRef<'_>) -> JsonMap<String, Json> {
    let mut entry = JsonMap::new();
    entry.insert("id".into(), Json::String(item.id().to_owned()));
    entry.insert(
        "properties".into(),
        Json::Object(item.properties().iter().map(|(k, v)| (k.clone(), v.to_json())).collect()),
    );
    entry
}

impl fmt::Debug for GraphWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GraphWidget")
            .field("nodes", &self.nodes.len())
            .field("edges", &self.edges.len())
            .field("directed", &self.directed)
            .field("layout", &self.layout)
            .field("node_mappings", &self.node_mappings.len())
            .field("edge_mappings", &self.edge_mappings.len())
            .field("shown", &self.shown)
            .finish()
    }
}

// ============================================================================
// Renderer impl
// ============================================================================

impl Renderer for GraphWidget {
    fn create(options: &WidgetOptions) -> Self {
        Self::new(options.clone())
    }

    fn nodes(&self) -> &[GraphNode] { &self.nodes }
    fn set_nodes(&mut self, nodes: Vec<GraphNode>) { self.nodes = nodes; }
    fn edges(&self) -> &[GraphEdge] { &self.edges }
    fn set_edges(&mut self, edges: Vec<GraphEdge>) { self.edges = edges; }

    fn set_directed(&mut self, directed: bool) { self.directed = directed; }

    fn default_node_mapping(&self, attribute: NodeAttribute) -> Mapping {
        match attribute {
            NodeAttribute::Color => mapping(|_, _| Value::from(DEFAULT_COLOR)),
            NodeAttribute::Size => mapping(|_, _| Value::from(DEFAULT_NODE_SIZE.to_vec())),
            NodeAttribute::Styles => mapping(|_, _| Value::Map(Default::default())),
            NodeAttribute::ScaleFactor => mapping(|_, _| Value::Float(1.0)),
            NodeAttribute::Property => mapping(|_, item| Value::Map(item.properties().clone())),
            NodeAttribute::Label => mapping(|_, item| Value::from(item.label())),
            NodeAttribute::Coordinate
            | NodeAttribute::Type
            | NodeAttribute::Position
            | NodeAttribute::Layout => null_mapping(),
        }
    }

    fn default_edge_mapping(&self, attribute: EdgeAttribute) -> Mapping {
        match attribute {
            EdgeAttribute::Color => mapping(|_, _| Value::from(DEFAULT_COLOR)),
            EdgeAttribute::ThicknessFactor => mapping(|_, _| Value::Float(1.0)),
            EdgeAttribute::Styles => mapping(|_, _| Value::Map(Default::default())),
            EdgeAttribute::Property => mapping(|_, item| Value::Map(item.properties().clone())),
            EdgeAttribute::Label => mapping(|_, item| Value::from(item.label())),
        }
    }

    fn set_node_mapping(&mut self, attribute: NodeAttribute, mapping: Mapping) {
        self.node_mappings.insert(attribute, mapping);
    }

    fn set_edge_mapping(&mut self, attribute: EdgeAttribute, mapping: Mapping) {
        self.edge_mappings.insert(attribute, mapping);
    }

    fn node_parent_mapping(&self) -> Mapping { self.node_parent_mapping.clone() }
    fn set_node_parent_mapping(&mut self, mapping: Mapping) { self.node_parent_mapping = mapping; }

    fn default_heat_mapping(&self) -> Mapping { null_mapping() }
    fn set_heat_mapping(&mut self, mapping: Mapping) { self.heat_mapping = mapping; }

    fn set_node_cell_mapping(&mut self, mapping: Option<Binding>) { self.node_cell_mapping = mapping; }

    fn set_graph_layout(&mut self, layout: Layout) { self.layout = layout; }

    /// Fails when an edge names an endpoint that is not among the nodes.
    fn show(&mut self) -> Result<()> {
        let ids: HashSet<&str> = self.nodes.iter().map(|n| n.id.as_str()).collect();
        if let Some(edge) = self.edges.iter()
            .find(|e| !ids.contains(e.start.as_str()) || !ids.contains(e.end.as_str()))
        {
            return Err(Error::RenderError(format!(
                "edge {} connects {} and {}, which are not both displayed nodes",
                edge.id, edge.start, edge.end
            )));
        }

        tracing::info!(
            nodes = self.nodes.len(),
            edges = self.edges.len(),
            layout = %self.layout,
            "showing graph widget"
        );
        self.shown = true;
        Ok(())
    }
}
