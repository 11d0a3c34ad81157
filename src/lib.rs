//! mygrate — ticketing data migration.
//!
//! Reads the flat orders / tickets CSV extracts, derives the normalized
//! `events`, `orders` and `tickets` tables, and either writes one SQL file
//! per table or loads the tables straight into a SQLite database.
//!
//! # Architecture
//!
//! ```text
//! mygrate-sources ──► mygrate-core::extract ──► mygrate-sinks
//!   (csv readers)       (normalize + relate)      (sql files | sqlite)
//! ```
//!
//! Everything is single-threaded and runs in one pass; the first error
//! aborts the run.

pub mod pipeline;

pub use mygrate_core::{Config, ConflictPolicy, Dialect, OutputMode};
pub use pipeline::{run, RunSummary};
