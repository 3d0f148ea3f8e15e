//! In-memory connection.
//!
//! This is the reference implementation of `Connection`. It holds a table
//! catalog (answering `TABLE_INFO` the way Kuzu lays its records out) and a
//! set of canned query results keyed by the exact query text.
//!
//! ## Limitations
//!
//! - **No query engine**: a query returns the rows registered for it, or
//!   fails. Parameters are recorded but not substituted.
//! - **Shared state**: clones share the catalog, results and query log, so a
//!   test can keep a handle after moving one into a widget.
//!
//! Use this connection for:
//! - Testing the normalizer and the binding layer without a database
//! - Replaying captured result sets

use std::collections::HashMap;
use std::sync::Arc;
use parking_lot::RwLock;

use crate::model::{PropertyMap, Value};
use crate::{Error, Result};
use super::{parse_table_info_query, Connection, QueryCursor, Row, RowCursor};

// ============================================================================
// MemoryConnection
// ============================================================================

/// In-memory stand-in for a Kuzu connection.
#[derive(Clone, Default)]
pub struct MemoryConnection {
    inner: Arc<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    tables: RwLock<HashMap<String, TableDef>>,
    results: RwLock<HashMap<String, Vec<Row>>>,
    /// Every executed query, in order, with its parameters.
    log: RwLock<Vec<(String, PropertyMap)>>,
}

#[derive(Debug, Clone)]
enum TableKind {
    Node { primary_key: String },
    Rel,
}

#[derive(Debug, Clone)]
struct TableDef {
    kind: TableKind,
    /// (name, type) in declaration order
    columns: Vec<(String, String)>,
}

impl MemoryConnection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a node table. `primary_key` must be one of `columns`.
    pub fn create_node_table(&self, name: &str, columns: &[(&str, &str)], primary_key: &str) -> Result<()> {
        if !columns.iter().any(|(c, _)| *c == primary_key) {
            return Err(Error::SchemaError(format!(
                "primary key '{primary_key}' is not a column of node table '{name}'"
            )));
        }
        self.insert_table(name, TableKind::Node { primary_key: primary_key.to_owned() }, columns)
    }

    /// Declare a relationship table.
    pub fn create_rel_table(&self, name: &str, columns: &[(&str, &str)]) -> Result<()> {
        self.insert_table(name, TableKind::Rel, columns)
    }

    fn insert_table(&self, name: &str, kind: TableKind, columns: &[(&str, &str)]) -> Result<()> {
        let mut tables = self.inner.tables.write();
        if tables.contains_key(name) {
            return Err(Error::SchemaError(format!("table '{name}' already exists")));
        }
        let columns = columns.iter().map(|(c, t)| (c.to_string(), t.to_string())).collect();
        tables.insert(name.to_owned(), TableDef { kind, columns });
        Ok(())
    }

    /// Register the rows `query` returns. Replaces any earlier registration.
    pub fn register_result(&self, query: impl Into<String>, rows: Vec<Row>) {
        self.inner.results.write().insert(query.into(), rows);
    }

    /// All executed query texts, in order.
    pub fn executed_queries(&self) -> Vec<String> {
        self.inner.log.read().iter().map(|(q, _)| q.clone()).collect()
    }

    /// Parameters passed with the most recent execution of `query`.
    pub fn last_params(&self, query: &str) -> Option<PropertyMap> {
        self.inner.log.read().iter().rev()
            .find(|(q, _)| q == query)
            .map(|(_, p)| p.clone())
    }

    /// How many `TABLE_INFO` lookups were issued for `table`.
    pub fn table_info_calls(&self, table: &str) -> usize {
        self.inner.log.read().iter()
            .filter(|(q, _)| parse_table_info_query(q) == Some(table))
            .count()
    }

    /// Kuzu record layout: `[property id, name, type, default, flag]`, where
    /// the flag is the primary-key bool for node tables and the storage
    /// direction for relationship tables.
    fn table_info_rows(&self, table: &str) -> Result<Vec<Row>> {
        let tables = self.inner.tables.read();
        let def = tables.get(table)
            .ok_or_else(|| Error::SchemaError(format!("table '{table}' does not exist")))?;
        let rows = def.columns.iter().enumerate().map(|(i, (name, ty))| {
            let flag = match &def.kind {
                TableKind::Node { primary_key } => Value::Bool(name == primary_key),
                TableKind::Rel => Value::from("both"),
            };
            vec![Value::Int(i as i64), Value::from(name.as_str()), Value::from(ty.as_str()), Value::from(""), flag]
        }).collect();
        Ok(rows)
    }
}

// ============================================================================
// Connection impl
// ============================================================================

impl Connection for MemoryConnection {
    fn execute(&self, query: &str, params: &PropertyMap) -> Result<Box<dyn QueryCursor>> {
        self.inner.log.write().push((query.to_owned(), params.clone()));

        let rows = match parse_table_info_query(query) {
            Some(table) => self.table_info_rows(table)?,
            None => self.inner.results.read().get(query).cloned()
                .ok_or_else(|| Error::QueryError(format!("no result registered for query: {query}")))?,
        };
        tracing::trace!(query, rows = rows.len(), "memory connection execute");
        Ok(Box::new(RowCursor::new(rows)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_info_lists_columns_in_order() {
        let conn = MemoryConnection::new();
        conn.create_node_table("Person", &[("name", "STRING"), ("id", "INT64")], "id").unwrap();
        let schema = conn.table_info("Person").unwrap();
        assert_eq!(schema.column_names().collect::<Vec<_>>(), vec!["name", "id"]);
        assert_eq!(schema.primary_key(), Some("id"));
        assert_eq!(conn.table_info_calls("Person"), 1);
    }

    #[test]
    fn test_primary_key_must_be_a_column() {
        let conn = MemoryConnection::new();
        let err = conn.create_node_table("Person", &[("name", "STRING")], "id").unwrap_err();
        assert!(matches!(err, Error::SchemaError(_)));
    }

    #[test]
    fn test_unknown_table_and_query_fail() {
        let conn = MemoryConnection::new();
        assert!(matches!(conn.table_info("Nope"), Err(Error::SchemaError(_))));
        assert!(matches!(
            conn.execute("MATCH (n) RETURN n", &PropertyMap::new()),
            Err(Error::QueryError(_))
        ));
    }

    #[test]
    fn test_canned_result_and_params_are_recorded() {
        let conn = MemoryConnection::new();
        conn.register_result("RETURN $x", vec![vec![Value::Int(1)]]);
        let mut params = PropertyMap::new();
        params.insert("x".into(), Value::Int(1));

        let mut cursor = conn.execute("RETURN $x", &params).unwrap();
        assert_eq!(cursor.collect_rows().unwrap(), vec![vec![Value::Int(1)]]);
        assert_eq!(conn.last_params("RETURN $x"), Some(params));
        assert_eq!(conn.executed_queries(), vec!["RETURN $x".to_string()]);
    }
}
