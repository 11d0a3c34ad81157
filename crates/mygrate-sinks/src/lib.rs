//! mygrate-sinks — destinations for the derived tables.
//!
//! Writing is split into two capabilities:
//!
//! - [`RowSink`] appends rows, optionally upserting on primary-key conflict.
//!   Implemented by [`SqlFileSink`] and [`SqliteStore`].
//! - [`ReplaceSink`] drops and recreates the destination table before
//!   loading it. Only [`SqliteStore`] implements it.

pub mod file;
pub mod sql;
pub mod sqlite;

pub use file::SqlFileSink;
pub use sqlite::SqliteStore;

use mygrate_core::types::{Row, Tables};
use mygrate_core::ConflictPolicy;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("database error on {table}: {source}")]
    Sqlite {
        table: String,
        #[source]
        source: rusqlite::Error,
    },
}

/// Append / upsert capability.
pub trait RowSink {
    /// Write `rows` to the table named by `R::SCHEMA`, returning how many
    /// rows were written.
    fn write_rows<R: Row>(&mut self, rows: &[R], policy: ConflictPolicy) -> Result<usize, SinkError>;
}

/// Destructive load: previous contents of the table are discarded.
pub trait ReplaceSink {
    /// Drop the table named by `R::SCHEMA`, recreate it, and load `rows`.
    fn replace_table<R: Row>(&mut self, rows: &[R]) -> Result<usize, SinkError>;
}

/// Write events, orders and tickets (parents before children).
pub fn write_tables<S: RowSink>(
    sink: &mut S,
    tables: &Tables,
    policy: ConflictPolicy,
) -> Result<(), SinkError> {
    sink.write_rows(&tables.events, policy)?;
    sink.write_rows(&tables.orders, policy)?;
    sink.write_rows(&tables.tickets, policy)?;
    Ok(())
}

/// Replace events, orders and tickets (parents before children).
pub fn replace_tables<S: ReplaceSink>(sink: &mut S, tables: &Tables) -> Result<(), SinkError> {
    sink.replace_table(&tables.events)?;
    sink.replace_table(&tables.orders)?;
    sink.replace_table(&tables.tickets)?;
    Ok(())
}
