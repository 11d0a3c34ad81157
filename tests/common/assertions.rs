//! Domain-specific assertions for mygrate harnesses.
//!
//! These check the relationships between the raw extracts and the derived
//! tables, with failure messages that name the external identifier that
//! went wrong.

use mygrate_core::{RawOrder, RawTicket, Tables};
use std::collections::{HashMap, HashSet};

/// Assert that a rendered statement targets `table` and is a single line
/// ending in `;`.
#[macro_export]
macro_rules! assert_statement {
    ($stmt:expr, $table:expr) => {{
        let stmt: &str = &$stmt;
        let prefix = format!("INSERT INTO {} (", $table);
        if !stmt.starts_with(&prefix) || !stmt.ends_with(';') || stmt.contains('\n') {
            panic!(
                "assert_statement! failed:\n  expected a single `{}...;` statement\n  actual: {:?}",
                prefix, stmt
            );
        }
    }};
}

/// Every derived order/ticket points at the entity created from the same
/// external identifier, and there is exactly one event per distinct EID.
///
/// Assumes OIDs are unique in `orders` unless the caller expects last-wins.
pub fn assert_referential_integrity(orders: &[RawOrder], tickets: &[RawTicket], tables: &Tables) {
    let distinct_eids: HashSet<&str> = orders.iter().map(|o| o.eid.as_str()).collect();
    assert_eq!(
        tables.events.len(),
        distinct_eids.len(),
        "one event per distinct EID"
    );
    assert_eq!(tables.orders.len(), orders.len(), "one order per raw order");
    assert_eq!(tables.tickets.len(), tickets.len(), "one ticket per raw ticket");

    let event_names: HashMap<&str, &str> = tables
        .events
        .iter()
        .map(|e| (e.id.as_str(), e.name.as_str()))
        .collect();
    for (raw, order) in orders.iter().zip(&tables.orders) {
        let name = event_names
            .get(order.event_id.as_str())
            .unwrap_or_else(|| panic!("order for OID {} has dangling event_id {}", raw.oid, order.event_id));
        assert_eq!(*name, format!("Event {}", raw.eid), "order for OID {}", raw.oid);
    }

    // Last row wins for repeated OIDs.
    let mut order_by_oid: HashMap<&str, &str> = HashMap::new();
    for (raw, order) in orders.iter().zip(&tables.orders) {
        order_by_oid.insert(raw.oid.as_str(), order.id.as_str());
    }
    for (raw, ticket) in tickets.iter().zip(&tables.tickets) {
        let expected = order_by_oid
            .get(raw.oid.as_str())
            .unwrap_or_else(|| panic!("ticket {} references unknown OID {}", raw.tid, raw.oid));
        assert_eq!(ticket.order_id, *expected, "ticket {} (OID {})", raw.tid, raw.oid);
    }
}

/// Collect every synthetic id in `tables`.
pub fn all_ids(tables: &Tables) -> HashSet<String> {
    tables
        .events
        .iter()
        .map(|e| e.id.clone())
        .chain(tables.orders.iter().map(|o| o.id.clone()))
        .chain(tables.tickets.iter().map(|t| t.id.clone()))
        .collect()
}
