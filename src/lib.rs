//! # kuzu-graph-widget: Cypher results as interactive graphs
//!
//! Runs a Cypher query against a Kuzu connection, normalizes the result
//! into a deduplicated node/edge graph and binds per-label visual
//! configuration onto a graph widget.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `Connection` and `Renderer` are the two external
//!    contracts; the crate owns neither the database nor the drawing
//! 2. **Clean DTOs**: raw elements and normalized items are plain data
//! 3. **Normalization is all-or-nothing**: any failure aborts the display
//! 4. **Late binding**: configuration turns into mappings evaluated by the
//!    renderer per item
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use kuzu_graph_widget::{
//!     Binding, ItemConfiguration, KuzuGraphWidget, MemoryConnection, PropertyMap, WidgetOptions,
//! };
//!
//! # fn example() -> kuzu_graph_widget::Result<()> {
//! let connection = MemoryConnection::new();
//! let mut widget = KuzuGraphWidget::new(Some(connection), WidgetOptions::default());
//!
//! widget.add_node_configuration("Person", ItemConfiguration::new().text("name").size(Binding::constant(80)));
//! widget.add_parent_relationship_configuration("LIVES_IN", false);
//! widget.show_cypher("MATCH (a)-[r]->(b) RETURN a, r, b", None, PropertyMap::new())?;
//! # Ok(())
//! # }
//! ```

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod connection;
pub mod normalize;
pub mod binding;
pub mod render;
pub mod config;

// ============================================================================
// Re-exports
// ============================================================================

pub use model::{
    GraphData, GraphEdge, GraphNode, InternalId, ItemRef, PropertyMap, RawElement, Value,
};
pub use connection::{Connection, MemoryConnection, QueryCursor, Row, RowCursor, TableSchema};
pub use binding::{
    Binding, BindingConfigurator, ConfigurationTable, ItemConfiguration, Labels,
    ParentConfigurations, COLOR_PALETTE, WILDCARD,
};
pub use render::{EdgeAttribute, GraphWidget, Layout, Mapping, NodeAttribute, Renderer};
pub use config::WidgetOptions;
pub use normalize::normalize;

// ============================================================================
// Widget host
// ============================================================================

/// Visualizes Cypher queries resolved against a Kuzu connection.
///
/// Holds the connection, display options and the binding configuration.
/// Every `show_cypher` builds a fresh renderer of type `R`; the most recent
/// one stays reachable through [`graph_widget`](Self::graph_widget).
///
/// Not safe for concurrent `show_cypher` calls: serialize calls per host.
pub struct KuzuGraphWidget<C: Connection, R: Renderer = GraphWidget> {
    widget: Option<R>,
    connection: Option<C>,
    options: WidgetOptions,
    bindings: BindingConfigurator,
    node_cell_mapping: Option<Binding>,
}

impl<C: Connection> KuzuGraphWidget<C> {
    pub fn new(connection: Option<C>, options: WidgetOptions) -> Self {
        Self::with_renderer(connection, options)
    }

    /// Host with a connection and default options.
    pub fn with_connection(connection: C) -> Self {
        Self::new(Some(connection), WidgetOptions::default())
    }
}

impl<C: Connection, R: Renderer> KuzuGraphWidget<C, R> {
    /// Host drawing through a renderer type other than [`GraphWidget`].
    pub fn with_renderer(connection: Option<C>, options: WidgetOptions) -> Self {
        Self {
            widget: None,
            connection,
            options,
            bindings: BindingConfigurator::new(),
            node_cell_mapping: None,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn connection(&self) -> Option<&C> {
        self.connection.as_ref()
    }

    pub fn set_connection(&mut self, connection: C) {
        self.connection = Some(connection);
    }

    #[deprecated(note = "use `connection()` instead")]
    pub fn get_connection(&self) -> Option<&C> {
        tracing::warn!("get_connection() is deprecated. Use connection() instead.");
        self.connection()
    }

    /// The widget built by the most recent `show_cypher`.
    pub fn graph_widget(&self) -> Option<&R> {
        self.widget.as_ref()
    }

    pub fn options(&self) -> &WidgetOptions {
        &self.options
    }

    pub fn options_mut(&mut self) -> &mut WidgetOptions {
        &mut self.options
    }

    pub fn bindings(&self) -> &BindingConfigurator {
        &self.bindings
    }

    /// Row/column binding used by grid-aware layouts.
    pub fn node_cell_mapping(&self) -> Option<&Binding> {
        self.node_cell_mapping.as_ref()
    }

    pub fn set_node_cell_mapping(&mut self, mapping: impl Into<Binding>) {
        self.node_cell_mapping = Some(mapping.into());
    }

    pub fn clear_node_cell_mapping(&mut self) {
        self.node_cell_mapping = None;
    }

    #[deprecated(note = "use `node_cell_mapping()` instead")]
    pub fn get_node_cell_mapping(&self) -> Option<&Binding> {
        tracing::warn!("get_node_cell_mapping() is deprecated. Use node_cell_mapping() instead.");
        self.node_cell_mapping()
    }

    #[deprecated(note = "use `clear_node_cell_mapping()` instead")]
    pub fn del_node_cell_mapping(&mut self) {
        tracing::warn!("del_node_cell_mapping() is deprecated. Use clear_node_cell_mapping() instead.");
        self.clear_node_cell_mapping();
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Configure nodes with the given label(s); `*` addresses every label.
    pub fn add_node_configuration(&mut self, labels: impl Into<Labels>, config: ItemConfiguration) {
        self.bindings.add_node_configuration(labels, config);
    }

    /// Configure relationships of the given type(s); `*` addresses every type.
    pub fn add_relationship_configuration(&mut self, types: impl Into<Labels>, config: ItemConfiguration) {
        self.bindings.add_relationship_configuration(types, config);
    }

    /// Draw relationships of the given type(s) as nesting: the target node
    /// becomes the parent of the source, or the other way round with `reverse`.
    pub fn add_parent_relationship_configuration(&mut self, types: impl Into<Labels>, reverse: bool) {
        self.bindings.add_parent_relationship_configuration(types, reverse);
    }

    pub fn del_node_configuration(&mut self, labels: impl Into<Labels>) {
        self.bindings.del_node_configuration(labels);
    }

    pub fn del_relationship_configuration(&mut self, types: impl Into<Labels>) {
        self.bindings.del_relationship_configuration(types);
    }

    pub fn del_parent_relationship_configuration(&mut self, types: impl Into<Labels>) {
        self.bindings.del_parent_relationship_configuration(types);
    }

    // ========================================================================
    // Display
    // ========================================================================

    /// Run `cypher` and show its result as a graph.
    ///
    /// `layout` overrides the host default for this display only.
    pub fn show_cypher<P>(&mut self, cypher: &str, layout: Option<Layout>, params: P) -> Result<()>
    where
        P: Into<PropertyMap>,
    {
        let connection = self.connection.as_ref().ok_or(Error::NoConnection)?;

        let mut widget = R::create(&self.options);
        widget.set_directed(true);

        let graph = {
            let mut cursor = connection.execute(cypher, &params.into())?;
            normalize::normalize(connection, cursor.as_mut())?
        };
        widget.set_nodes(graph.nodes);
        widget.set_edges(graph.edges);

        self.bindings.apply(&mut widget);
        widget.set_graph_layout(layout.unwrap_or(self.options.layout));
        widget.set_node_cell_mapping(self.node_cell_mapping.clone());

        widget.show()?;
        self.widget = Some(widget);
        Ok(())
    }
}

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("No database connection provided. Initialize the widget with a valid Kuzu connection.")]
    NoConnection,

    #[error("Relationship {relationship} references node {endpoint}, which is not part of the result")]
    UnresolvedEndpoint { relationship: InternalId, endpoint: InternalId },

    #[error("Table '{0}' declares no primary key")]
    MissingPrimaryKey(String),

    #[error("Malformed graph element: {0}")]
    MalformedElement(String),

    #[error("Schema error: {0}")]
    SchemaError(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Unknown graph layout '{0}'")]
    InvalidLayout(String),

    #[error("Render error: {0}")]
    RenderError(String),
}

pub type Result<T> = std::result::Result<T, Error>;
