//! Field normalizers — pure conversions from raw extract values into the
//! canonical forms stored in the destination schema.
//!
//! Nothing here touches I/O. Failures are reported as [`MigrateError`] so the
//! extractor can abort the run with the offending value.

use crate::error::MigrateError;
use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Format used for every timestamp written to the destination.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S+0000";

/// Returned by [`country_to_code`] for any name outside the fixed table.
pub const UNKNOWN_COUNTRY: &str = "UNKNOWN";

static COUNTRY_CODES: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "hong kong" => "HK",
    "china" => "CN",
    "macau" => "MO",
};

/// Map a country name to its two-letter code, case-insensitively.
///
/// Only exact (lower-cased) matches count; anything else is
/// [`UNKNOWN_COUNTRY`].
pub fn country_to_code(name: &str) -> &'static str {
    COUNTRY_CODES
        .get(name.to_lowercase().as_str())
        .copied()
        .unwrap_or(UNKNOWN_COUNTRY)
}

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Convert integer seconds since the Unix epoch into a `+0000` timestamp.
pub fn epoch_to_timestamp(value: &str) -> Result<String, MigrateError> {
    let invalid = || MigrateError::InvalidTimestamp { value: value.to_string() };
    let secs = value.trim().parse::<i64>().map_err(|_| invalid())?;
    let ts = DateTime::from_timestamp(secs, 0).ok_or_else(invalid)?;
    Ok(format_timestamp(ts))
}

pub fn parse_decimal(value: &str) -> Result<Decimal, MigrateError> {
    Decimal::from_str(value.trim()).map_err(|_| MigrateError::InvalidNumber {
        field: "price".to_string(),
        value: value.to_string(),
    })
}

/// Multiply by 100 and truncate toward zero.
pub fn decimal_to_minor_units(value: Decimal) -> Result<i64, MigrateError> {
    value
        .checked_mul(Decimal::ONE_HUNDRED)
        .and_then(|cents| cents.trunc().to_i64())
        .ok_or_else(|| MigrateError::InvalidNumber {
            field: "price".to_string(),
            value: value.to_string(),
        })
}

/// Parse a decimal amount and convert it to minor currency units.
///
/// `"19.99"` becomes `1999`; negative amounts stay negative.
pub fn price_to_minor_units(value: &str) -> Result<i64, MigrateError> {
    decimal_to_minor_units(parse_decimal(value)?)
}

/// Merge the second and third address lines.
pub fn merge_address(address2: Option<&str>, address3: &str) -> String {
    match address2 {
        Some(line2) if !line2.is_empty() => format!("{line2}, {address3}"),
        _ => address3.to_string(),
    }
}

/// A fresh random (v4) UUID in hyphenated form.
pub fn new_identifier() -> String {
    uuid::Uuid::new_v4().to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
