//! Pipeline entry point: configuration in, written tables out.
//!
//! [`run`] is what the binary calls. The `migrate_*` helpers take records
//! that are already in memory and a sink, so callers can drive the
//! transform without touching the filesystem.

use anyhow::Context;
use mygrate_core::types::{RawOrder, RawTicket, Tables};
use mygrate_core::{extract_now, Config, ConflictPolicy, OutputMode};
use mygrate_sinks::{ReplaceSink, RowSink, SqlFileSink, SqliteStore};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use tracing::info;

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub events: usize,
    pub orders: usize,
    pub tickets: usize,
    pub mode: OutputMode,
    /// Only meaningful for [`OutputMode::SqlFiles`]; direct loads always replace.
    pub conflict: Option<ConflictPolicy>,
    /// Output directory or database file.
    pub destination: PathBuf,
    /// SQL files written, in write order. Empty for direct loads.
    pub files: Vec<PathBuf>,
}

impl RunSummary {
    fn new(tables: &Tables, mode: OutputMode, destination: PathBuf) -> Self {
        Self {
            events: tables.events.len(),
            orders: tables.orders.len(),
            tickets: tables.tickets.len(),
            mode,
            conflict: None,
            destination,
            files: Vec::new(),
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} events, {} orders, {} tickets -> {} ({})",
            self.events,
            self.orders,
            self.tickets,
            self.destination.display(),
            self.mode
        )?;
        if let Some(policy) = self.conflict {
            write!(f, ", {policy}")?;
        }
        Ok(())
    }
}

/// Read both extracts named by `config`.
pub fn load_sources(config: &Config) -> anyhow::Result<(Vec<RawOrder>, Vec<RawTicket>)> {
    let orders_path = config.orders_path();
    let tickets_path = config.tickets_path();

    let orders = mygrate_sources::read_orders(&orders_path)
        .with_context(|| format!("failed to read orders from {}", orders_path.display()))?;
    let tickets = mygrate_sources::read_tickets(&tickets_path)
        .with_context(|| format!("failed to read tickets from {}", tickets_path.display()))?;

    info!(orders = orders.len(), tickets = tickets.len(), "loaded extracts");
    Ok((orders, tickets))
}

/// Run the whole migration described by `config`.
pub fn run(config: &Config) -> anyhow::Result<RunSummary> {
    info!(
        root = %config.paths.root.display(),
        mode = %config.output.mode,
        "starting migration"
    );
    let (orders, tickets) = load_sources(config)?;

    match config.output.mode {
        OutputMode::SqlFiles => {
            let dir = config.output_dir();
            let mut sink = SqlFileSink::new(&dir, config.output.dialect)
                .with_context(|| format!("failed to prepare output directory {}", dir.display()))?;
            let tables = migrate_to_sink(&orders, &tickets, &mut sink, config.output.conflict)?;

            let mut summary = RunSummary::new(&tables, OutputMode::SqlFiles, dir);
            summary.conflict = Some(config.output.conflict);
            summary.files = sink.written().to_vec();
            Ok(summary)
        }
        OutputMode::DirectLoad => {
            let path = config.database_path();
            let mut store = SqliteStore::open(&path)
                .with_context(|| format!("failed to open database {}", path.display()))?;
            let tables = migrate_replacing(&orders, &tickets, &mut store)?;
            Ok(RunSummary::new(&tables, OutputMode::DirectLoad, path))
        }
    }
}

/// Extract and append/upsert into `sink`.
pub fn migrate_to_sink<S: RowSink>(
    orders: &[RawOrder],
    tickets: &[RawTicket],
    sink: &mut S,
    policy: ConflictPolicy,
) -> anyhow::Result<Tables> {
    let tables = extract_now(orders, tickets).context("failed to derive tables")?;
    mygrate_sinks::write_tables(sink, &tables, policy).context("failed to write tables")?;
    Ok(tables)
}

/// Extract and replace the destination tables wholesale.
pub fn migrate_replacing<S: ReplaceSink>(
    orders: &[RawOrder],
    tickets: &[RawTicket],
    sink: &mut S,
) -> anyhow::Result<Tables> {
    let tables = extract_now(orders, tickets).context("failed to derive tables")?;
    mygrate_sinks::replace_tables(sink, &tables).context("failed to load tables")?;
    Ok(tables)
}
