//! Entity extractor — turns the raw orders and tickets extracts into the
//! `events`, `orders` and `tickets` tables.
//!
//! Events come first (one per distinct `EID`, in first-seen order), then one
//! order per raw order, then one ticket per raw ticket. External identifiers
//! are only used to resolve foreign keys and never reach the output.

use crate::error::MigrateError;
use crate::normalizer::{
    country_to_code, decimal_to_minor_units, epoch_to_timestamp, format_timestamp,
    merge_address, new_identifier, parse_decimal,
};
use crate::types::{Event, Order, RawOrder, RawTicket, Tables, Ticket};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Run [`extract`] stamping orders with the current time.
pub fn extract_now(orders: &[RawOrder], tickets: &[RawTicket]) -> Result<Tables, MigrateError> {
    extract(orders, tickets, Utc::now())
}

/// Derive the three output tables.
///
/// `processed_at` fills both `created` and `completed` on every order; the
/// extracts carry no order timestamps of their own.
pub fn extract(
    orders: &[RawOrder],
    tickets: &[RawTicket],
    processed_at: DateTime<Utc>,
) -> Result<Tables, MigrateError> {
    let (events, event_ids) = derive_events(orders);
    debug!(events = events.len(), "derived events");

    let stamp = format_timestamp(processed_at);
    let derived_orders = orders
        .iter()
        .map(|raw| derive_order(raw, &event_ids, &stamp))
        .collect::<Result<Vec<_>, _>>()?;

    let mut order_ids: HashMap<&str, &str> = HashMap::with_capacity(orders.len());

    for (raw, order) in orders.iter().zip(&derived_orders) {
        if order_ids.insert(raw.oid.as_str(), order.id.as_str()).is_some() {
            warn!(oid = %raw.oid, line = raw.line, "duplicate order id in extract; later row wins");
        }
    }
    debug!(orders = derived_orders.len(), "derived orders");

    let derived_tickets = tickets
        .iter()
        .map(|raw| derive_ticket(raw, &order_ids))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(tickets = derived_tickets.len(), "derived tickets");

    info!(
        events = events.len(),
        orders = derived_orders.len(),
        tickets = derived_tickets.len(),
        "extraction complete"
    );

    Ok(Tables {
        events,
        orders: derived_orders,
        tickets: derived_tickets,
    })
}

fn derive_events(orders: &[RawOrder]) -> (Vec<Event>, HashMap<&str, String>) {
    let mut events = Vec::new();
    let mut ids: HashMap<&str, String> = HashMap::new();
    for raw in orders {
        if ids.contains_key(raw.eid.as_str()) {
            continue;
        }
        let event = Event {
            id: new_identifier(),
            name: format!("Event {}", raw.eid),
        };
        ids.insert(raw.eid.as_str(), event.id.clone());
        events.push(event);
    }
    (events, ids)
}

fn derive_order(
    raw: &RawOrder,
    event_ids: &HashMap<&str, String>,
    stamp: &str,
) -> Result<Order, MigrateError> {
    let event_id = event_ids
        .get(raw.eid.as_str())
        .ok_or_else(|| MigrateError::UnmappedEvent {
            eid: raw.eid.clone(),
            oid: raw.oid.clone(),
            line: raw.line,
        })?;

    Ok(Order {
        id: new_identifier(),
        event_id: event_id.clone(),
        created: stamp.to_string(),
        completed: stamp.to_string(),
        price: total_price(&raw.cost, &raw.fee, raw.line)?,
        address1: raw.address1.clone(),
        address2: merge_address(raw.address2.as_deref(), &raw.address3),
        country_code: country_to_code(&raw.country).to_string(),
    })
}

fn derive_ticket(raw: &RawTicket, order_ids: &HashMap<&str, &str>) -> Result<Ticket, MigrateError> {
    let order_id = order_ids
        .get(raw.oid.as_str())
        .ok_or_else(|| MigrateError::UnmappedOrder {
            tid: raw.tid.clone(),
            oid: raw.oid.clone(),
            line: raw.line,
        })?;

    Ok(Ticket {
        id: new_identifier(),
        order_id: order_id.to_string(),
        created: epoch_to_timestamp(&raw.utc_timestamp)?,
        barcode: raw.barcode.clone(),
        price: total_price(&raw.cost, &raw.fee, raw.line)?,
    })
}

fn total_price(cost: &str, fee: &str, line: u64) -> Result<i64, MigrateError> {
    let cost = parse_decimal(cost).map_err(|e| e.in_field("cost", line))?;
    let fee = parse_decimal(fee).map_err(|e| e.in_field("fee", line))?;
    let total = cost
        .checked_add(fee)
        .ok_or_else(|| MigrateError::InvalidNumber {
            field: format!("cost + fee (line {line})"),
            value: format!("{cost} + {fee}"),
        })?;
    decimal_to_minor_units(total).map_err(|e| e.in_field("cost + fee", line))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
