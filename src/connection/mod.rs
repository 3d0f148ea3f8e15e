//! # Connection Trait
//!
//! The contract between the widget and a Kuzu connection. The widget only
//! needs two things from the database: run a Cypher query and hand back a
//! row cursor, and describe a table's columns (which one is the primary key).
//!
//! ## Implementations
//!
//! | Connection | Module | Description |
//! |------------|--------|-------------|
//! | `MemoryConnection` | `memory` | Canned results + table catalog, for tests/embedding |

pub mod memory;

use std::collections::VecDeque;

use crate::model::{PropertyMap, Value};
use crate::{Error, Result};

pub use memory::MemoryConnection;

/// One result row: the returned columns in query order.
pub type Row = Vec<Value>;

// ============================================================================
// Cursor
// ============================================================================

/// Forward-only cursor over a query result, mirroring Kuzu's `QueryResult`.
pub trait QueryCursor {
    fn has_next(&mut self) -> bool;

    /// Next row. Errors when the cursor is exhausted or the fetch fails.
    fn get_next(&mut self) -> Result<Row>;

    /// Drain the remaining rows.
    fn collect_rows(&mut self) -> Result<Vec<Row>> {
        let mut rows = Vec::new();
        while self.has_next() {
            rows.push(self.get_next()?);
        }
        Ok(rows)
    }
}

/// Cursor over rows that are already materialized.
#[derive(Debug, Clone, Default)]
pub struct RowCursor {
    rows: VecDeque<Row>,
}

impl RowCursor {
    pub fn new(rows: impl IntoIterator<Item = Row>) -> Self {
        Self { rows: rows.into_iter().collect() }
    }

    pub fn remaining(&self) -> usize {
        self.rows.len()
    }
}

impl QueryCursor for RowCursor {
    fn has_next(&mut self) -> bool {
        !self.rows.is_empty()
    }

    fn get_next(&mut self) -> Result<Row> {
        self.rows.pop_front()
            .ok_or_else(|| Error::QueryError("cursor exhausted".into()))
    }
}

// ============================================================================
// Table schema
// ============================================================================

/// One declared column of a node or relationship table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    pub primary_key: bool,
}

/// Declared columns of a table, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TableSchema {
    pub table: String,
    pub columns: Vec<ColumnInfo>,
}

impl TableSchema {
    /// Parse `TABLE_INFO` records.
    ///
    /// Kuzu lays a record out as `[property id, name, type, default, flag]`;
    /// the column name is field 1 and the last field is `true` only on the
    /// primary key column. Relationship tables carry a non-boolean last field.
    pub fn from_cursor(table: &str, cursor: &mut dyn QueryCursor) -> Result<Self> {
        let mut columns = Vec::new();
        while cursor.has_next() {
            let record = cursor.get_next()?;
            let name = record.get(1)
                .and_then(Value::as_str)
                .ok_or_else(|| Error::SchemaError(format!(
                    "TABLE_INFO('{table}') record without a column name: {record:?}"
                )))?;
            let primary_key = matches!(record.last(), Some(Value::Bool(true)));
            columns.push(ColumnInfo { name: name.to_owned(), primary_key });
        }
        Ok(Self { table: table.to_owned(), columns })
    }

    /// The first column flagged as primary key.
    pub fn primary_key(&self) -> Option<&str> {
        self.columns.iter().find(|c| c.primary_key).map(|c| c.name.as_str())
    }

    pub fn declares(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c.name == column)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }
}

// ============================================================================
// Connection Trait
// ============================================================================

/// The database contract.
pub trait Connection {
    /// Run a Cypher query with named parameters.
    fn execute(&self, query: &str, params: &PropertyMap) -> Result<Box<dyn QueryCursor>>;

    /// Describe a node or relationship table.
    ///
    /// Default: `CALL TABLE_INFO('<table>') RETURN *`, parsed with
    /// [`TableSchema::from_cursor`].
    fn table_info(&self, table: &str) -> Result<TableSchema> {
        let query = table_info_query(table);
        let mut cursor = self.execute(&query, &PropertyMap::new())?;
        TableSchema::from_cursor(table, cursor.as_mut())
    }
}

/// The introspection statement for a table.
pub fn table_info_query(table: &str) -> String {
    format!("CALL TABLE_INFO('{table}') RETURN *")
}

/// Extract the table name from a `table_info_query` statement.
pub fn parse_table_info_query(query: &str) -> Option<&str> {
    let rest = query.trim().strip_prefix("CALL TABLE_INFO('")?;
    let end = rest.find("')")?;
    Some(&rest[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: i64, name: &str, ty: &str, last: Value) -> Row {
        vec![Value::Int(id), Value::from(name), Value::from(ty), Value::from(""), last]
    }

    #[test]
    fn test_schema_from_records() {
        let mut cursor = RowCursor::new(vec![
            record(0, "name", "STRING", Value::Bool(false)),
            record(1, "id", "INT64", Value::Bool(true)),
            record(2, "age", "INT64", Value::Bool(false)),
        ]);
        let schema = TableSchema::from_cursor("Person", &mut cursor).unwrap();
        assert_eq!(schema.primary_key(), Some("id"));
        assert!(schema.declares("name"));
        assert!(schema.declares("age"));
        assert!(!schema.declares("_id"));
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn test_rel_schema_has_no_primary_key() {
        let mut cursor = RowCursor::new(vec![record(1, "since", "INT64", Value::from("both"))]);
        let schema = TableSchema::from_cursor("KNOWS", &mut cursor).unwrap();
        assert_eq!(schema.primary_key(), None);
        assert_eq!(schema.column_names().collect::<Vec<_>>(), vec!["since"]);
    }

    #[test]
    fn test_table_info_query_roundtrip() {
        let q = table_info_query("City");
        assert_eq!(q, "CALL TABLE_INFO('City') RETURN *");
        assert_eq!(parse_table_info_query(&q), Some("City"));
        assert_eq!(parse_table_info_query("MATCH (n) RETURN n"), None);
    }

    #[test]
    fn test_exhausted_cursor_errors() {
        let mut cursor = RowCursor::default();
        assert!(!cursor.has_next());
        assert!(matches!(cursor.get_next(), Err(Error::QueryError(_))));
    }
}
