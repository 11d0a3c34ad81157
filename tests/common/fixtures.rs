//! CSV fixtures and scratch migration roots.
//!
//! [`MigrationRoot`] lays out `input/source_orders.csv` and
//! `input/source_tickets.csv` under a temporary directory so the pipeline can
//! run exactly as it would in production, rooted somewhere disposable.

use mygrate_core::{Config, RawOrder, RawTicket};
use std::path::{Path, PathBuf};

/// The canonical single-order example as it appears in the extracts.
pub const ORDERS_CSV: &str = "\
EID,OID,cost,fee,country,address1,address2,address3
1,100,10,2,Hong Kong,A,B,C
";

pub const TICKETS_CSV: &str = "\
TID,OID,utc_timestamp,cost,fee,barcode
1,100,0,1,0.5,X
";

/// A slightly larger extract: two events, three orders (one without
/// address2), four tickets.
pub const MULTI_ORDERS_CSV: &str = "\
EID,OID,cost,fee,country,address1,address2,address3
1,100,10,2,Hong Kong,A,B,C
2,101,19.99,0,china,\"Flat 3, Block B\",,Floor 2
1,102,0,0,Atlantis,,Suite 5,Floor 9
";

pub const MULTI_TICKETS_CSV: &str = "\
TID,OID,utc_timestamp,cost,fee,barcode
1,100,0,1,0.5,X
2,101,1700000000,5,0.25,Y
3,101,1700000001,5,0.25,Z
4,102,86400,0,0,O'HARE
";

fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Render raw orders back into extract form.
pub fn orders_csv(orders: &[RawOrder]) -> String {
    let mut out = String::from("EID,OID,cost,fee,country,address1,address2,address3\n");
    for o in orders {
        let fields = [
            o.eid.as_str(),
            o.oid.as_str(),
            o.cost.as_str(),
            o.fee.as_str(),
            o.country.as_str(),
            o.address1.as_deref().unwrap_or(""),
            o.address2.as_deref().unwrap_or(""),
            o.address3.as_str(),
        ];
        out.push_str(&fields.map(csv_field).join(","));
        out.push('\n');
    }
    out
}

/// Render raw tickets back into extract form.
pub fn tickets_csv(tickets: &[RawTicket]) -> String {
    let mut out = String::from("TID,OID,utc_timestamp,cost,fee,barcode\n");
    for t in tickets {
        let fields = [
            t.tid.as_str(),
            t.oid.as_str(),
            t.utc_timestamp.as_str(),
            t.cost.as_str(),
            t.fee.as_str(),
            t.barcode.as_str(),
        ];
        out.push_str(&fields.map(csv_field).join(","));
        out.push('\n');
    }
    out
}

/// A temporary migration root with an `input/` directory.
pub struct MigrationRoot {
    dir: tempfile::TempDir,
}

impl MigrationRoot {
    pub fn new(orders_csv: &str, tickets_csv: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp root");
        let input = dir.path().join("input");
        std::fs::create_dir_all(&input).expect("create input dir");
        std::fs::write(input.join("source_orders.csv"), orders_csv).expect("write orders");
        std::fs::write(input.join("source_tickets.csv"), tickets_csv).expect("write tickets");
        Self { dir }
    }

    /// The canonical one-order, one-ticket example.
    pub fn single() -> Self {
        Self::new(ORDERS_CSV, TICKETS_CSV)
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config(&self) -> Config {
        Config::rooted_at(self.path())
    }

    pub fn output(&self, file: &str) -> PathBuf {
        self.path().join("output").join(file)
    }

    pub fn read_output(&self, file: &str) -> String {
        std::fs::read_to_string(self.output(file))
            .unwrap_or_else(|e| panic!("read output/{file}: {e}"))
    }
}
