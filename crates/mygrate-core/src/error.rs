use thiserror::Error;

/// Failures raised while normalizing fields or resolving relationships.
///
/// Every variant aborts the run; there is no row-level recovery.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MigrateError {
    #[error("invalid number {value:?} in {field}")]
    InvalidNumber { field: String, value: String },
    #[error("invalid unix timestamp {value:?}")]
    InvalidTimestamp { value: String },
    #[error("order {oid} on line {line} references event {eid}, which was never created")]
    UnmappedEvent { eid: String, oid: String, line: u64 },
    #[error("ticket {tid} on line {line} references order {oid}, which is not in the orders extract")]
    UnmappedOrder { tid: String, oid: String, line: u64 },
}

impl MigrateError {
    /// Attach the source column and line to a bare number failure.
    pub(crate) fn in_field(self, field: &str, line: u64) -> Self {
        match self {
            MigrateError::InvalidNumber { value, .. } => MigrateError::InvalidNumber {
                field: format!("{field} (line {line})"),
                value,
            },
            other => other,
        }
    }
}
