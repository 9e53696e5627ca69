use indexmap::map::{Values, ValuesMut};
use indexmap::IndexMap;
use tracing::warn;

use crate::codec::{CodecError, PickTicketCodec};
use crate::models::Order;
use crate::types::PickTicketNumber;

/// A collection of orders keyed by pick ticket number, in insertion order.
///
/// This is the document handed to the partner: `serialize_all` produces the file contents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderBatch {
    orders: IndexMap<PickTicketNumber, Order>
}

impl OrderBatch {
    pub fn new() -> Self {
        Self {
            orders: IndexMap::new()
        }
    }

    /// Adds an order, replacing any order already held under the same pick ticket number.
    ///
    /// A replaced order keeps its original position. The replaced order is returned.
    pub fn insert(&mut self, order: Order) -> Option<Order> {
        let pick_ticket_number = order.pick_ticket_number();
        let previous = self.orders.insert(pick_ticket_number.clone(), order);

        if previous.is_some() {
            warn!("Pick ticket [{pick_ticket_number}] was already in the batch and has been replaced");
        }

        previous
    }

    pub fn get(&self, pick_ticket_number: &str) -> Option<&Order> {
        self.orders.get(pick_ticket_number)
    }

    pub fn iter(&self) -> Values<'_, PickTicketNumber, Order> {
        self.orders.values()
    }

    pub fn iter_mut(&mut self) -> ValuesMut<'_, PickTicketNumber, Order> {
        self.orders.values_mut()
    }

    pub fn size(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn line_item_count(&self) -> usize {
        self.iter().map(|order| order.products().len()).sum()
    }

    /// Encodes every order, in iteration order, into a single pick ticket document.
    pub fn serialize_all(&self) -> Result<String, CodecError> {
        self.iter().map(PickTicketCodec::encode).collect()
    }

    /// Structured view of the batch, used for diagnostics.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.iter().collect::<Vec<_>>())
    }
}

impl FromIterator<Order> for OrderBatch {
    fn from_iter<I: IntoIterator<Item = Order>>(orders: I) -> Self {
        let mut batch = OrderBatch::new();

        for order in orders {
            batch.insert(order);
        }

        batch
    }
}

impl<'a> IntoIterator for &'a OrderBatch {
    type Item = &'a Order;
    type IntoIter = Values<'a, PickTicketNumber, Order>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
