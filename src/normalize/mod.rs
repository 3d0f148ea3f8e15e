//! # Result Normalizer
//!
//! Turns a Kuzu result cursor into the widget's node/edge model.
//!
//! ```text
//! rows ──classify──▶ RawNode / RawRelationship / PathBundle
//!      ──dedup by (table, offset), first seen wins──▶ registry
//!      ──TABLE_INFO per distinct label──▶ GraphNode { "{label}_{pk}" }
//!                                         GraphEdge { "{src}_{dst}_{offset}" }
//! ```
//!
//! Every row is registered before any output is built: a relationship's
//! endpoints may only show up inside a later path bundle.

use hashbrown::HashMap;

use crate::connection::{Connection, QueryCursor, TableSchema};
use crate::model::*;
use crate::{Error, Result};

/// Normalize every row of `cursor`, resolving schemas through `connection`.
pub fn normalize<C>(connection: &C, cursor: &mut dyn QueryCursor) -> Result<GraphData>
where
    C: Connection + ?Sized,
{
    let mut registry = ElementRegistry::default();
    let mut rows = 0usize;
    while cursor.has_next() {
        for value in cursor.get_next()? {
            registry.register_value(&value)?;
        }
        rows += 1;
    }
    tracing::debug!(
        rows,
        nodes = registry.nodes.len(),
        relationships = registry.relationships.len(),
        "registered result elements"
    );
    registry.build(&mut SchemaCache::new(connection))
}

// ============================================================================
// Element registry
// ============================================================================

/// Deduplicated raw elements in first-seen order.
#[derive(Debug, Default)]
pub struct ElementRegistry {
    nodes: Vec<RawNode>,
    node_index: HashMap<InternalId, usize>,
    relationships: Vec<RawRelationship>,
    relationship_index: HashMap<InternalId, usize>,
}

impl ElementRegistry {
    /// Classify one row value and register what it contains.
    pub fn register_value(&mut self, value: &Value) -> Result<()> {
        match RawElement::classify(value)? {
            Some(RawElement::Node(node)) => self.register_node(node),
            Some(RawElement::Relationship(rel)) => self.register_relationship(rel),
            Some(RawElement::Path(bundle)) => {
                tracing::trace!(nodes = bundle.nodes.len(), hops = bundle.hops(), "unpacking path bundle");
                for node in bundle.nodes {
                    self.register_node(node);
                }
                for rel in bundle.relationships {
                    self.register_relationship(rel);
                }
            }
            None => {
                if !value.is_empty_element() {
                    tracing::trace!(kind = value.type_name(), "skipping non-graph value");
                }
            }
        }
        Ok(())
    }

    /// Later occurrences of a known identity are ignored.
    pub fn register_node(&mut self, node: RawNode) {
        if !self.node_index.contains_key(&node.id) {
            self.node_index.insert(node.id, self.nodes.len());
            self.nodes.push(node);
        }
    }

    pub fn register_relationship(&mut self, rel: RawRelationship) {
        if !self.relationship_index.contains_key(&rel.id) {
            self.relationship_index.insert(rel.id, self.relationships.len());
            self.relationships.push(rel);
        }
    }

    /// Produce the normalized graph.
    pub fn build<C>(&self, schemas: &mut SchemaCache<'_, C>) -> Result<GraphData>
    where
        C: Connection + ?Sized,
    {
        // InternalId → (derived id, label), for endpoint resolution
        let mut node_ids: HashMap<InternalId, (String, &str)> = HashMap::with_capacity(self.nodes.len());
        let mut nodes = Vec::with_capacity(self.nodes.len());

        for raw in &self.nodes {
            let schema = schemas.get(&raw.label)?;
            let primary_key = schema.primary_key()
                .ok_or_else(|| Error::MissingPrimaryKey(raw.label.clone()))?;
            let key_value = raw.get(primary_key).ok_or_else(|| Error::MalformedElement(format!(
                "node {} ({}) carries no value for primary key '{primary_key}'",
                raw.id, raw.label
            )))?;
            let id = format!("{}_{}", raw.label, key_value);

            node_ids.insert(raw.id, (id.clone(), raw.label.as_str()));
            nodes.push(GraphNode {
                id,
                properties: declared_properties(&raw.label, &raw.properties, schema),
            });
        }

        let mut edges = Vec::with_capacity(self.relationships.len());
        for rel in &self.relationships {
            let endpoint = |id: InternalId| {
                node_ids.get(&id).ok_or(Error::UnresolvedEndpoint { relationship: rel.id, endpoint: id })
            };
            let (start, src_label) = endpoint(rel.src)?;
            let (end, dst_label) = endpoint(rel.dst)?;
            let schema = schemas.get(&rel.label)?;

            edges.push(GraphEdge {
                id: format!("{src_label}_{dst_label}_{}", rel.id.offset),
                start: start.clone(),
                end: end.clone(),
                properties: declared_properties(&rel.label, &rel.properties, schema),
            });
        }

        tracing::debug!(nodes = nodes.len(), edges = edges.len(), "normalized query result");
        Ok(GraphData { nodes, edges })
    }
}

/// `label` plus the declared, non-underscore columns, dates as ISO strings.
fn declared_properties(label: &str, raw: &PropertyMap, schema: &TableSchema) -> PropertyMap {
    let mut properties = PropertyMap::with_capacity(raw.len() + 1);
    properties.insert(LABEL_KEY.into(), Value::from(label));
    for (key, value) in raw {
        if !key.starts_with('_') && schema.declares(key) {
            properties.insert(key.clone(), value.clone().into_widget_value());
        }
    }
    properties
}

// ============================================================================
// Schema cache
// ============================================================================

/// One `TABLE_INFO` round trip per distinct table for the lifetime of the cache.
pub struct SchemaCache<'c, C: Connection + ?Sized> {
    connection: &'c C,
    tables: HashMap<String, TableSchema>,
}

impl<'c, C: Connection + ?Sized> SchemaCache<'c, C> {
    pub fn new(connection: &'c C) -> Self {
        Self { connection, tables: HashMap::new() }
    }

    pub fn get(&mut self, table: &str) -> Result<&TableSchema> {
        if !self.tables.contains_key(table) {
            tracing::debug!(table, "resolving table schema");
            let schema = self.connection.table_info(table)?;
            self.tables.insert(table.to_owned(), schema);
        }
        self.tables.get(table)
            .ok_or_else(|| Error::SchemaError(format!("schema for '{table}' not cached")))
    }
}
