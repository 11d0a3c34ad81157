//! mygrate-sources — CSV extract readers for mygrate.
//!
//! Each reader opens one extract, checks that every required column is
//! present in the header row, and returns untouched [`mygrate_core::RawOrder`] /
//! [`mygrate_core::RawTicket`] records in file order. Values are not parsed
//! here; that is the extractor's job.

pub mod orders;
pub mod reader;
pub mod tickets;

pub use orders::{read_orders, read_orders_from_reader};
pub use tickets::{read_tickets, read_tickets_from_reader};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("failed to open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed csv in {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },
    #[error("{file} is missing required column {column:?}")]
    MissingColumn { file: String, column: &'static str },
}
