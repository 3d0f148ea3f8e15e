//! # Renderer Trait
//!
//! The contract between the binding layer and the graph widget that draws.
//! The widget owns the node/edge collections for one display and exposes a
//! mapping slot per bindable attribute; this crate fills those slots.
//!
//! Every mapping uses the same `(index, item)` calling convention, defaults
//! included.

pub mod layout;
pub mod widget;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::binding::Binding;
use crate::config::WidgetOptions;
use crate::model::{GraphEdge, GraphNode, ItemRef, Value};
use crate::Result;

pub use layout::Layout;
pub use widget::GraphWidget;

/// Attribute mapping installed on the renderer.
pub type Mapping = Arc<dyn Fn(usize, ItemRef<'_>) -> Value + Send + Sync>;

/// Wrap a closure as a [`Mapping`].
pub fn mapping<F>(f: F) -> Mapping
where
    F: Fn(usize, ItemRef<'_>) -> Value + Send + Sync + 'static,
{
    Arc::new(f)
}

/// A mapping that always yields null.
pub fn null_mapping() -> Mapping {
    mapping(|_, _| Value::Null)
}

// ============================================================================
// Bindable attributes
// ============================================================================

/// Node attributes the renderer exposes a mapping for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeAttribute {
    Coordinate,
    Color,
    Size,
    Type,
    Styles,
    ScaleFactor,
    Position,
    Layout,
    Property,
    Label,
}

impl NodeAttribute {
    pub const ALL: [NodeAttribute; 10] = [
        NodeAttribute::Coordinate,
        NodeAttribute::Color,
        NodeAttribute::Size,
        NodeAttribute::Type,
        NodeAttribute::Styles,
        NodeAttribute::ScaleFactor,
        NodeAttribute::Position,
        NodeAttribute::Layout,
        NodeAttribute::Property,
        NodeAttribute::Label,
    ];

    /// Configuration key of the attribute.
    pub fn key(&self) -> &'static str {
        match self {
            NodeAttribute::Coordinate => "coordinate",
            NodeAttribute::Color => "color",
            NodeAttribute::Size => "size",
            NodeAttribute::Type => "type",
            NodeAttribute::Styles => "styles",
            NodeAttribute::ScaleFactor => "scale_factor",
            NodeAttribute::Position => "position",
            NodeAttribute::Layout => "layout",
            NodeAttribute::Property => "property",
            NodeAttribute::Label => "label",
        }
    }
}

/// Relationship attributes the renderer exposes a mapping for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeAttribute {
    Color,
    ThicknessFactor,
    Styles,
    Property,
    Label,
}

impl EdgeAttribute {
    pub const ALL: [EdgeAttribute; 5] = [
        EdgeAttribute::Color,
        EdgeAttribute::ThicknessFactor,
        EdgeAttribute::Styles,
        EdgeAttribute::Property,
        EdgeAttribute::Label,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            EdgeAttribute::Color => "color",
            EdgeAttribute::ThicknessFactor => "thickness_factor",
            EdgeAttribute::Styles => "styles",
            EdgeAttribute::Property => "property",
            EdgeAttribute::Label => "label",
        }
    }
}

// ============================================================================
// Renderer Trait
// ============================================================================

/// A graph widget that can be populated and shown.
pub trait Renderer {
    /// A fresh widget for one display.
    fn create(options: &WidgetOptions) -> Self
    where
        Self: Sized;

    fn nodes(&self) -> &[GraphNode];
    fn set_nodes(&mut self, nodes: Vec<GraphNode>);
    fn edges(&self) -> &[GraphEdge];
    fn set_edges(&mut self, edges: Vec<GraphEdge>);

    fn set_directed(&mut self, directed: bool);

    /// The built-in mapping for `attribute`.
    fn default_node_mapping(&self, attribute: NodeAttribute) -> Mapping;
    fn default_edge_mapping(&self, attribute: EdgeAttribute) -> Mapping;
    fn set_node_mapping(&mut self, attribute: NodeAttribute, mapping: Mapping);
    fn set_edge_mapping(&mut self, attribute: EdgeAttribute, mapping: Mapping);

    /// Node → parent node id (or null).
    fn node_parent_mapping(&self) -> Mapping;
    fn set_node_parent_mapping(&mut self, mapping: Mapping);

    fn default_heat_mapping(&self) -> Mapping;
    fn set_heat_mapping(&mut self, mapping: Mapping);

    /// Row/column hint for layouts that arrange nodes on a grid.
    fn set_node_cell_mapping(&mut self, mapping: Option<Binding>);

    fn set_graph_layout(&mut self, layout: Layout);

    fn show(&mut self) -> Result<()>;
}
