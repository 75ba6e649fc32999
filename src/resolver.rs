//! Order reference resolution
//!
//! Executions (`E`, `C`) only carry an order reference number. The resolver
//! remembers the security and price of every order added during the pass so
//! executions can be attributed to a stock and, for `E`, priced.

use crate::add_order::AddOrder;
use crate::common::{ItchError, Price, Side};
use crate::order::OrderReplace;
use crate::ticker::Ticker;
use log::trace;
use std::collections::HashMap;

/// An order as seen on its Add Order (or replacement) message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderRecord {
    pub timestamp: u64,
    pub reference: u64,
    pub side: Side,
    pub shares: u32,
    pub stock: Ticker,
    pub price: Price,
}

impl From<&AddOrder> for OrderRecord {
    fn from(order: &AddOrder) -> Self {
        Self {
            timestamp: order.timestamp(),
            reference: order.reference,
            side: order.side,
            shares: order.shares,
            stock: order.stock,
            price: order.price,
        }
    }
}

/// Reference-number to order map, scoped to one pass
#[derive(Debug, Default)]
pub struct ReferenceResolver {
    orders: HashMap<u64, OrderRecord>,
}

impl ReferenceResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an order, replacing any earlier order with the same reference.
    ///
    /// The feed only reuses a reference once the earlier order has left the
    /// book, so the overwrite is not checked.
    pub fn record_order(&mut self, order: OrderRecord) {
        trace!("Order {} {} @ {}", order.reference, order.stock, order.price);
        self.orders.insert(order.reference, order);
    }

    /// Security and original price of an order.
    ///
    /// # Returns
    /// `(stock, price)` or `UnresolvedReference` if the order was never added.
    pub fn resolve(&self, reference: u64) -> Result<(Ticker, Price), ItchError> {
        self.orders
            .get(&reference)
            .map(|order| (order.stock, order.price))
            .ok_or(ItchError::UnresolvedReference { reference })
    }

    /// Full record of an order, if known.
    pub fn get(&self, reference: u64) -> Option<&OrderRecord> {
        self.orders.get(&reference)
    }

    /// Register the replacement of an order under its new reference.
    ///
    /// The new order inherits side and stock from the original; shares and
    /// price come from the replace message. The original stays resolvable
    /// until evicted.
    pub fn replace(&mut self, replace: &OrderReplace) -> Result<OrderRecord, ItchError> {
        let original = self
            .orders
            .get(&replace.original_reference)
            .ok_or(ItchError::UnresolvedReference {
                reference: replace.original_reference,
            })?;

        let record = OrderRecord {
            timestamp: replace.timestamp(),
            reference: replace.new_reference,
            side: original.side,
            shares: replace.shares,
            stock: original.stock,
            price: replace.price,
        };
        self.record_order(record);
        Ok(record)
    }

    /// Forget an order that has left the book.
    pub fn evict(&mut self, reference: u64) -> Option<OrderRecord> {
        self.orders.remove(&reference)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
