//! Tickets extract (`source_tickets.csv`).
//!
//! Required columns: `TID, OID, utc_timestamp, cost, fee, barcode`.

use crate::reader::{self, Columns};
use crate::SourceError;
use mygrate_core::RawTicket;
use std::io::Read;
use std::path::Path;

const FILE: &str = "tickets";

struct Layout {
    tid: usize,
    oid: usize,
    utc_timestamp: usize,
    cost: usize,
    fee: usize,
    barcode: usize,
}

fn resolve(cols: &Columns<'_>) -> Result<Layout, SourceError> {
    Ok(Layout {
        tid: cols.required("TID")?,
        oid: cols.required("OID")?,
        utc_timestamp: cols.required("utc_timestamp")?,
        cost: cols.required("cost")?,
        fee: cols.required("fee")?,
        barcode: cols.required("barcode")?,
    })
}

/// Read the tickets extract at `path`.
pub fn read_tickets(path: &Path) -> Result<Vec<RawTicket>, SourceError> {
    read_tickets_from_reader(reader::open(path)?)
}

pub fn read_tickets_from_reader<R: Read>(input: R) -> Result<Vec<RawTicket>, SourceError> {
    reader::read_rows(input, FILE, resolve, |l, rec| RawTicket {
        tid: rec.get(l.tid),
        oid: rec.get(l.oid),
        utc_timestamp: rec.get(l.utc_timestamp),
        cost: rec.get(l.cost),
        fee: rec.get(l.fee),
        barcode: rec.get(l.barcode),
        line: rec.line,
    })
}
