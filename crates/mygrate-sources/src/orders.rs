//! Orders extract (`source_orders.csv`).
//!
//! Required columns: `EID, OID, cost, fee, country, address1, address3`.
//! `address2` may be missing entirely or left empty per row.

use crate::reader::{self, Columns};
use crate::SourceError;
use mygrate_core::RawOrder;
use std::io::Read;
use std::path::Path;

const FILE: &str = "orders";

struct Layout {
    eid: usize,
    oid: usize,
    cost: usize,
    fee: usize,
    country: usize,
    address1: usize,
    address2: Option<usize>,
    address3: usize,
}

fn resolve(cols: &Columns<'_>) -> Result<Layout, SourceError> {
    Ok(Layout {
        eid: cols.required("EID")?,
        oid: cols.required("OID")?,
        cost: cols.required("cost")?,
        fee: cols.required("fee")?,
        country: cols.required("country")?,
        address1: cols.required("address1")?,
        address2: cols.optional("address2"),
        address3: cols.required("address3")?,
    })
}

/// Read the orders extract at `path`.
pub fn read_orders(path: &Path) -> Result<Vec<RawOrder>, SourceError> {
    read_orders_from_reader(reader::open(path)?)
}

pub fn read_orders_from_reader<R: Read>(input: R) -> Result<Vec<RawOrder>, SourceError> {
    reader::read_rows(input, FILE, resolve, |l, rec| RawOrder {
        eid: rec.get(l.eid),
        oid: rec.get(l.oid),
        cost: rec.get(l.cost),
        fee: rec.get(l.fee),
        country: rec.get(l.country),
        address1: rec.get_opt(Some(l.address1)),
        address2: rec.get_opt(l.address2),
        address3: rec.get(l.address3),
        line: rec.line,
    })
}
