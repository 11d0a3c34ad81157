//! mygrate-core — ticketing migration core library.
//!
//! This crate holds everything that does not touch a file or a database:
//! the data model, the field normalizers, the entity extractor, and the
//! configuration / error types shared by the source and sink crates.
//!
//! # Architecture
//!
//! ```text
//! Sources ──► Extractor ──► Sinks
//! (csv)       (this crate)   (sql files | sqlite)
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod normalizer;
pub mod types;

pub use config::{Config, ConflictPolicy, Dialect, OutputMode};
pub use error::MigrateError;
pub use extract::{extract, extract_now};
pub use types::{Event, Order, RawOrder, RawTicket, Row, SqlValue, TableSchema, Tables, Ticket};
