mod errors;
mod order_store;

use rust_decimal::Decimal;

use crate::models::PostalAddress;
use crate::types::{LineNumber, PickTicketNumber, RecordId};

pub use errors::StoreError;
pub use order_store::InMemoryOrderStore;

#[derive(Debug, Clone, PartialEq)]
pub struct OrderRow {
    pub pick_ticket_number: PickTicketNumber,
    pub order_number: String,
    pub customer_id: RecordId,
    pub recipient_id: RecordId,
    pub shipping_method: String,
    pub order_date: String
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductRow {
    pub sku: String,
    pub name: Option<String>,
    pub unit_price: Decimal
}

#[derive(Debug, Clone, PartialEq)]
pub struct LineItemRow {
    pub pick_ticket_number: PickTicketNumber,
    pub line_number: LineNumber,
    pub sku: String,
    pub quantity: Decimal,
    pub units_to_ship: Decimal
}

/// The relational store orders are persisted to.
///
/// Writes are staged until `commit`. A failed upload calls `rollback`, which discards every write
/// staged since the last commit.
pub trait OrderStore: Send + Sync + 'static {
    fn upsert_customer(&self, address: &PostalAddress) -> Result<RecordId, StoreError>;
    fn upsert_recipient(&self, address: &PostalAddress) -> Result<RecordId, StoreError>;
    fn upsert_order(&self, order: &OrderRow) -> Result<(), StoreError>;
    fn upsert_product(&self, sku: &str, name: Option<&str>, unit_price: Decimal) -> Result<(), StoreError>;
    fn upsert_line_item(&self, line_item: &LineItemRow) -> Result<(), StoreError>;
    fn commit(&self) -> Result<(), StoreError>;
    fn rollback(&self);
}
