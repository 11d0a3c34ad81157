//! SQL file sink — one `<table>_insert.sql` file per table.
//!
//! Files are truncated on open, so each run fully rewrites its output. A
//! failure mid-write leaves a partial file behind.

use crate::{sql, RowSink, SinkError};
use mygrate_core::types::Row;
use mygrate_core::{ConflictPolicy, Dialect};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

pub struct SqlFileSink {
    dir: PathBuf,
    dialect: Dialect,
    written: Vec<PathBuf>,
}

impl SqlFileSink {
    /// Create the sink, creating `dir` if needed.
    pub fn new(dir: impl Into<PathBuf>, dialect: Dialect) -> Result<Self, SinkError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(|source| SinkError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self {
            dir,
            dialect,
            written: Vec::new(),
        })
    }

    pub fn path_for(&self, table: &str) -> PathBuf {
        self.dir.join(format!("{table}_insert.sql"))
    }

    /// Files written so far, in write order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl RowSink for SqlFileSink {
    fn write_rows<R: Row>(&mut self, rows: &[R], policy: ConflictPolicy) -> Result<usize, SinkError> {
        let table = R::SCHEMA.name;
        let path = self.path_for(table);
        let io_err = |source| SinkError::Io {
            path: path.clone(),
            source,
        };

        let file = File::create(&path).map_err(io_err)?;
        let mut out = BufWriter::new(file);
        let n = write_statements(&mut out, table, rows, policy, self.dialect).map_err(io_err)?;
        out.flush().map_err(io_err)?;

        info!(table, rows = n, path = %path.display(), "wrote sql file");
        self.written.push(path);
        Ok(n)
    }
}

/// Write one newline-terminated statement per row to `out`.
pub fn write_statements<W: Write, R: Row>(
    out: &mut W,
    table: &str,
    rows: &[R],
    policy: ConflictPolicy,
    dialect: Dialect,
) -> io::Result<usize> {
    let mut n = 0;
    for stmt in sql::render_statements(table, rows, policy, dialect) {
        writeln!(out, "{stmt}")?;
        n += 1;
    }
    Ok(n)
}
