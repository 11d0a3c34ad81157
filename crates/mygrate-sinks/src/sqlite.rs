//! SQLite destination.
//!
//! Supports both the destructive [`ReplaceSink`] load (drop, recreate,
//! insert) and the [`RowSink`] append/upsert path. Each table is written in
//! its own transaction; nothing spans the three tables.

use crate::{sql, ReplaceSink, RowSink, SinkError};
use mygrate_core::types::{Row, SqlValue};
use mygrate_core::{ConflictPolicy, Dialect};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection};
use std::path::Path;
use tracing::{debug, info};

pub struct SqliteStore {
    conn: Connection,
}

fn to_sqlite(value: SqlValue) -> Value {
    match value {
        SqlValue::Text(s) => Value::Text(s),
        SqlValue::Integer(n) => Value::Integer(n),
        SqlValue::Null => Value::Null,
    }
}

impl SqliteStore {
    /// Open (or create) the database file at `path`.
    pub fn open(path: &Path) -> Result<Self, SinkError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| SinkError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let conn = Connection::open(path).map_err(|source| SinkError::Sqlite {
            table: path.display().to_string(),
            source,
        })?;
        debug!(path = %path.display(), "opened sqlite destination");
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, SinkError> {
        let conn = Connection::open_in_memory().map_err(|source| SinkError::Sqlite {
            table: ":memory:".to_string(),
            source,
        })?;
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Number of rows currently in `table`.
    pub fn row_count(&self, table: &str) -> Result<i64, SinkError> {
        self.conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| row.get(0))
            .map_err(|source| SinkError::Sqlite {
                table: table.to_string(),
                source,
            })
    }

    fn load<R: Row>(&mut self, rows: &[R], replace: bool, policy: ConflictPolicy) -> Result<usize, SinkError> {
        let schema = R::SCHEMA;
        let err = |source| SinkError::Sqlite {
            table: schema.name.to_string(),
            source,
        };

        let tx = self.conn.transaction().map_err(err)?;
        if replace {
            tx.execute_batch(&format!("DROP TABLE IF EXISTS {}", schema.name))
                .map_err(err)?;
        }
        tx.execute_batch(&sql::create_table(schema, !replace))
            .map_err(err)?;
        {
            let mut stmt = tx
                .prepare(&sql::parameterised_insert(schema, policy, Dialect::Sqlite))
                .map_err(err)?;
            for row in rows {
                stmt.execute(params_from_iter(row.values().into_iter().map(to_sqlite)))
                    .map_err(err)?;
            }
        }
        tx.commit().map_err(err)?;
        Ok(rows.len())
    }
}

impl ReplaceSink for SqliteStore {
    fn replace_table<R: Row>(&mut self, rows: &[R]) -> Result<usize, SinkError> {
        let n = self.load(rows, true, ConflictPolicy::Insert)?;
        info!(table = R::SCHEMA.name, rows = n, "replaced table");
        Ok(n)
    }
}

impl RowSink for SqliteStore {
    fn write_rows<R: Row>(&mut self, rows: &[R], policy: ConflictPolicy) -> Result<usize, SinkError> {
        let n = self.load(rows, false, policy)?;
        info!(table = R::SCHEMA.name, rows = n, %policy, "appended rows");
        Ok(n)
    }
}
