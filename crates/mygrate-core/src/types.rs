//! Core types for mygrate-core.
//!
//! This module defines the records read from the source extracts
//! ([`RawOrder`], [`RawTicket`]), the three derived entities ([`Event`],
//! [`Order`], [`Ticket`]), and the [`Row`] / [`TableSchema`] description that
//! the sinks use to turn any derived entity into SQL.

use std::fmt;

// ---------------------------------------------------------------------------
// Source records
// ---------------------------------------------------------------------------

/// One row of the orders extract, exactly as read (trimmed, not parsed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOrder {
    /// External event identifier (`EID`).
    pub eid: String,
    /// External order identifier (`OID`).
    pub oid: String,
    pub cost: String,
    pub fee: String,
    /// Free-form country name, e.g. `"Hong Kong"`.
    pub country: String,
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub address3: String,
    /// 1-based line in the source file, used in error messages.
    pub line: u64,
}

/// One row of the tickets extract, exactly as read (trimmed, not parsed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTicket {
    /// External ticket identifier (`TID`).
    pub tid: String,
    /// External order identifier (`OID`) of the owning order.
    pub oid: String,
    /// Seconds since the Unix epoch (`utc_timestamp`).
    pub utc_timestamp: String,
    pub cost: String,
    pub fee: String,
    pub barcode: String,
    pub line: u64,
}

// ---------------------------------------------------------------------------
// Derived entities
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: String,
    pub event_id: String,
    pub created: String,
    pub completed: String,
    /// Total of cost and fee in minor currency units.
    pub price: i64,
    pub address1: Option<String>,
    /// Address lines 2 and 3 merged with `", "`.
    pub address2: String,
    pub country_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    pub id: String,
    pub order_id: String,
    pub created: String,
    pub barcode: String,
    /// Total of cost and fee in minor currency units.
    pub price: i64,
}

/// The three derived tables produced by one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tables {
    pub events: Vec<Event>,
    pub orders: Vec<Order>,
    pub tickets: Vec<Ticket>,
}

// ---------------------------------------------------------------------------
// Cell values and table schemas
// ---------------------------------------------------------------------------

/// A single cell of a derived row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlValue {
    Text(String),
    Integer(i64),
    Null,
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        SqlValue::Text(value.to_string())
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        SqlValue::Integer(value)
    }
}

impl From<Option<&str>> for SqlValue {
    fn from(value: Option<&str>) -> Self {
        value.map_or(SqlValue::Null, SqlValue::from)
    }
}

/// Storage type of a column in the destination schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Integer,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Text => write!(f, "TEXT"),
            ColumnType::Integer => write!(f, "INTEGER"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub kind: ColumnType,
    pub primary_key: bool,
    pub nullable: bool,
}

impl Column {
    const fn key(name: &'static str) -> Self {
        Self { name, kind: ColumnType::Text, primary_key: true, nullable: false }
    }

    const fn required(name: &'static str, kind: ColumnType) -> Self {
        Self { name, kind, primary_key: false, nullable: false }
    }

    const fn optional(name: &'static str, kind: ColumnType) -> Self {
        Self { name, kind, primary_key: false, nullable: true }
    }
}

/// Destination table name plus its columns in output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [Column],
}

impl TableSchema {
    pub fn column_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|c| c.name)
    }

    pub fn primary_key(&self) -> Option<&'static str> {
        self.columns.iter().find(|c| c.primary_key).map(|c| c.name)
    }
}

pub const EVENTS: TableSchema = TableSchema {
    name: "events",
    columns: &[
        Column::key("id"),
        Column::required("name", ColumnType::Text),
    ],
};

pub const ORDERS: TableSchema = TableSchema {
    name: "orders",
    columns: &[
        Column::key("id"),
        Column::required("event_id", ColumnType::Text),
        Column::required("created", ColumnType::Text),
        Column::required("completed", ColumnType::Text),
        Column::required("price", ColumnType::Integer),
        Column::optional("address1", ColumnType::Text),
        Column::required("address2", ColumnType::Text),
        Column::required("country_code", ColumnType::Text),
    ],
};

pub const TICKETS: TableSchema = TableSchema {
    name: "tickets",
    columns: &[
        Column::key("id"),
        Column::required("order_id", ColumnType::Text),
        Column::required("created", ColumnType::Text),
        Column::required("barcode", ColumnType::Text),
        Column::required("price", ColumnType::Integer),
    ],
};

/// A derived entity that can be written to a destination table.
///
/// `values()` must yield exactly one cell per column of `SCHEMA`, in the
/// same order.
pub trait Row {
    const SCHEMA: &'static TableSchema;

    fn values(&self) -> Vec<SqlValue>;
}

impl Row for Event {
    const SCHEMA: &'static TableSchema = &EVENTS;

    fn values(&self) -> Vec<SqlValue> {
        vec![self.id.as_str().into(), self.name.as_str().into()]
    }
}

impl Row for Order {
    const SCHEMA: &'static TableSchema = &ORDERS;

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.as_str().into(),
            self.event_id.as_str().into(),
            self.created.as_str().into(),
            self.completed.as_str().into(),
            self.price.into(),
            self.address1.as_deref().into(),
            self.address2.as_str().into(),
            self.country_code.as_str().into(),
        ]
    }
}

impl Row for Ticket {
    const SCHEMA: &'static TableSchema = &TICKETS;

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.id.as_str().into(),
            self.order_id.as_str().into(),
            self.created.as_str().into(),
            self.barcode.as_str().into(),
            self.price.into(),
        ]
    }
}
