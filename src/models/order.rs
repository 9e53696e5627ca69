use serde::Serialize;

use crate::models::{AddressRole, LineItem, PostalAddress};
use crate::types::{pick_ticket_number, PickTicketNumber};

/// One customer transaction, the unit the partner calls a pick ticket.
///
/// Orders are built once, either from a validated JSON payload (see `Order::from_json`) or by the
/// codec from a header record and its detail records. After construction the only permitted
/// change is resolving the display name of each line item.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    order_number: String,
    /// Either ISO-8601 or `MM/DD/YYYY`, kept as received. Normalized only on the way out.
    order_date: String,
    shipping_method: String,
    customer: PostalAddress,
    recipient: PostalAddress,
    products: Vec<LineItem>
}

impl Order {
    pub fn new(
        order_number: impl Into<String>,
        order_date: impl Into<String>,
        shipping_method: impl Into<String>,
        customer: PostalAddress,
        recipient: PostalAddress,
        products: Vec<LineItem>
    ) -> Self {
        Self {
            order_number: order_number.into(),
            order_date: order_date.into(),
            shipping_method: shipping_method.into(),
            customer,
            recipient,
            products
        }
    }

    pub fn order_number(&self) -> &str {
        &self.order_number
    }

    pub fn order_date(&self) -> &str {
        &self.order_date
    }

    pub fn shipping_method(&self) -> &str {
        &self.shipping_method
    }

    pub fn customer(&self) -> &PostalAddress {
        &self.customer
    }

    pub fn recipient(&self) -> &PostalAddress {
        &self.recipient
    }

    pub fn address(&self, role: AddressRole) -> &PostalAddress {
        match role {
            AddressRole::Customer => &self.customer,
            AddressRole::Recipient => &self.recipient
        }
    }

    pub fn products(&self) -> &[LineItem] {
        &self.products
    }

    /// Mutable access to the line items so enrichment can resolve display names.
    pub fn line_items_mut(&mut self) -> &mut [LineItem] {
        &mut self.products
    }

    pub fn pick_ticket_number(&self) -> PickTicketNumber {
        pick_ticket_number(&self.order_number)
    }

    /// An order without an order number was never populated and cannot be encoded.
    pub fn is_populated(&self) -> bool {
        !self.order_number.is_empty()
    }
}
