//! Test builders — ergonomic constructors for raw order and ticket records.
//!
//! These builders are designed for readability in test assertions, not for
//! production use. Defaults match the canonical single-order example
//! (cost 10 + fee 2, Hong Kong, address lines A / B / C).

use fake::faker::address::en::{BuildingNumber, CityName, StreetName};
use fake::Fake;
use mygrate_core::{RawOrder, RawTicket};

// ---------------------------------------------------------------------------
// RawOrderBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`RawOrder`] fixtures.
///
/// # Example
///
/// ```rust
/// let order = RawOrderBuilder::new("1", "100")
///     .country("Macau")
///     .address2(None)
///     .build();
/// ```
pub struct RawOrderBuilder {
    order: RawOrder,
}

impl RawOrderBuilder {
    pub fn new(eid: impl Into<String>, oid: impl Into<String>) -> Self {
        Self {
            order: RawOrder {
                eid: eid.into(),
                oid: oid.into(),
                cost: "10".to_string(),
                fee: "2".to_string(),
                country: "Hong Kong".to_string(),
                address1: Some("A".to_string()),
                address2: Some("B".to_string()),
                address3: "C".to_string(),
                line: 2,
            },
        }
    }

    pub fn cost(mut self, cost: impl Into<String>) -> Self {
        self.order.cost = cost.into();
        self
    }

    pub fn fee(mut self, fee: impl Into<String>) -> Self {
        self.order.fee = fee.into();
        self
    }

    pub fn country(mut self, country: impl Into<String>) -> Self {
        self.order.country = country.into();
        self
    }

    pub fn address1(mut self, line: Option<&str>) -> Self {
        self.order.address1 = line.map(str::to_string);
        self
    }

    pub fn address2(mut self, line: Option<&str>) -> Self {
        self.order.address2 = line.map(str::to_string);
        self
    }

    pub fn address3(mut self, line: impl Into<String>) -> Self {
        self.order.address3 = line.into();
        self
    }

    pub fn line(mut self, line: u64) -> Self {
        self.order.line = line;
        self
    }

    /// Replace the address lines with generated street data.
    pub fn fake_address(mut self) -> Self {
        let number: String = BuildingNumber().fake();
        let street: String = StreetName().fake();
        self.order.address1 = Some(format!("{number} {street}"));
        self.order.address2 = Some(format!("Unit {}", (1..40u32).fake::<u32>()));
        self.order.address3 = CityName().fake();
        self
    }

    pub fn build(self) -> RawOrder {
        self.order
    }
}

// ---------------------------------------------------------------------------
// RawTicketBuilder
// ---------------------------------------------------------------------------

/// Fluent builder for [`RawTicket`] fixtures. Defaults: epoch 0, cost 1 +
/// fee 0.5, barcode `X`.
pub struct RawTicketBuilder {
    ticket: RawTicket,
}

impl RawTicketBuilder {
    pub fn new(tid: impl Into<String>, oid: impl Into<String>) -> Self {
        Self {
            ticket: RawTicket {
                tid: tid.into(),
                oid: oid.into(),
                utc_timestamp: "0".to_string(),
                cost: "1".to_string(),
                fee: "0.5".to_string(),
                barcode: "X".to_string(),
                line: 2,
            },
        }
    }

    pub fn utc_timestamp(mut self, ts: impl Into<String>) -> Self {
        self.ticket.utc_timestamp = ts.into();
        self
    }

    pub fn cost(mut self, cost: impl Into<String>) -> Self {
        self.ticket.cost = cost.into();
        self
    }

    pub fn fee(mut self, fee: impl Into<String>) -> Self {
        self.ticket.fee = fee.into();
        self
    }

    pub fn barcode(mut self, barcode: impl Into<String>) -> Self {
        self.ticket.barcode = barcode.into();
        self
    }

    pub fn line(mut self, line: u64) -> Self {
        self.ticket.line = line;
        self
    }

    pub fn build(self) -> RawTicket {
        self.ticket
    }
}

// ---------------------------------------------------------------------------
// Corpus helpers
// ---------------------------------------------------------------------------

/// `n` orders spread over `events` distinct EIDs, with unique OIDs
/// (`1000 + i`) and generated addresses.
pub fn build_orders(n: usize, events: usize) -> Vec<RawOrder> {
    (0..n)
        .map(|i| {
            RawOrderBuilder::new((i % events.max(1) + 1).to_string(), (1000 + i).to_string())
                .fake_address()
                .line(i as u64 + 2)
                .build()
        })
        .collect()
}

/// `per_order` tickets for every order in `orders`.
pub fn build_tickets(orders: &[RawOrder], per_order: usize) -> Vec<RawTicket> {
    orders
        .iter()
        .flat_map(|o| std::iter::repeat(o.oid.clone()).take(per_order))
        .enumerate()
        .map(|(i, oid)| {
            RawTicketBuilder::new((i + 1).to_string(), oid)
                .utc_timestamp((1_700_000_000 + i as i64).to_string())
                .barcode(format!("BC{i:06}"))
                .line(i as u64 + 2)
                .build()
        })
        .collect()
}
