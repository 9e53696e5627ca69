use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use dashmap::DashMap;
use rust_decimal::Decimal;
use tracing::debug;

use crate::models::{AddressRole, PostalAddress};
use crate::storage::{LineItemRow, OrderRow, OrderStore, ProductRow, StoreError};
use crate::types::{LineNumber, PickTicketNumber, RecordId};

#[derive(Debug, Clone)]
enum StagedWrite {
    Customer(RecordId, PostalAddress),
    Recipient(RecordId, PostalAddress),
    Order(OrderRow),
    Product(ProductRow),
    LineItem(LineItemRow)
}

impl StagedWrite {
    fn new_address(role: AddressRole, record_id: RecordId, address: PostalAddress) -> Self {
        match role {
            AddressRole::Customer => StagedWrite::Customer(record_id, address),
            AddressRole::Recipient => StagedWrite::Recipient(record_id, address)
        }
    }

    fn address(&self, role: AddressRole) -> Option<(RecordId, &PostalAddress)> {
        match (self, role) {
            (StagedWrite::Customer(record_id, address), AddressRole::Customer)
            | (StagedWrite::Recipient(record_id, address), AddressRole::Recipient) => Some((*record_id, address)),
            _ => None
        }
    }
}

/// An in-process `OrderStore` with the same keys and references as the relational schema.
///
/// Customers and recipients are deduplicated by address, orders are keyed by pick ticket number,
/// products by SKU and line items by pick ticket number and line number. Line items must reference
/// an order and a product that exist, either committed or staged.
pub struct InMemoryOrderStore {
    customers: DashMap<PostalAddress, RecordId>,
    recipients: DashMap<PostalAddress, RecordId>,
    orders: DashMap<PickTicketNumber, OrderRow>,
    products: DashMap<String, ProductRow>,
    line_items: DashMap<(PickTicketNumber, LineNumber), LineItemRow>,
    staged: Mutex<Vec<StagedWrite>>,
    next_id: AtomicU64
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self {
            customers: DashMap::new(),
            recipients: DashMap::new(),
            orders: DashMap::new(),
            products: DashMap::new(),
            line_items: DashMap::new(),
            staged: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1)
        }
    }

    pub fn order(&self, pick_ticket_number: &str) -> Option<OrderRow> {
        self.orders.get(pick_ticket_number).map(|row| row.value().clone())
    }

    pub fn product(&self, sku: &str) -> Option<ProductRow> {
        self.products.get(sku).map(|row| row.value().clone())
    }

    pub fn address(&self, role: AddressRole, record_id: RecordId) -> Option<PostalAddress> {
        self.addresses(role).iter()
            .find(|entry| *entry.value() == record_id)
            .map(|entry| entry.key().clone())
    }

    /// Committed line items of one order, by line number.
    pub fn line_items(&self, pick_ticket_number: &str) -> Vec<LineItemRow> {
        let mut rows: Vec<LineItemRow> = self.line_items.iter()
            .filter(|row| row.key().0 == pick_ticket_number)
            .map(|row| row.value().clone())
            .collect();

        rows.sort_by_key(|row| row.line_number);
        rows
    }

    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    pub fn line_item_count(&self) -> usize {
        self.line_items.len()
    }

    pub fn staged_count(&self) -> usize {
        self.staged().len()
    }

    fn staged(&self) -> MutexGuard<'_, Vec<StagedWrite>> {
        self.staged.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn addresses(&self, role: AddressRole) -> &DashMap<PostalAddress, RecordId> {
        match role {
            AddressRole::Customer => &self.customers,
            AddressRole::Recipient => &self.recipients
        }
    }

    fn upsert_address(&self, role: AddressRole, address: &PostalAddress) -> RecordId {
        if let Some(record_id) = self.addresses(role).get(address) {
            return *record_id
        }

        let mut staged = self.staged();

        let existing = staged.iter()
            .filter_map(|write| write.address(role))
            .find(|(_, staged_address)| *staged_address == address)
            .map(|(record_id, _)| record_id);

        if let Some(record_id) = existing {
            return record_id
        }

        let record_id = self.next_id.fetch_add(1, Ordering::Relaxed);
        staged.push(StagedWrite::new_address(role, record_id, address.clone()));

        record_id
    }

    fn order_exists(&self, staged: &[StagedWrite], pick_ticket_number: &str) -> bool {
        self.orders.contains_key(pick_ticket_number) || staged.iter().any(|write| {
            matches!(write, StagedWrite::Order(row) if row.pick_ticket_number == pick_ticket_number)
        })
    }

    fn product_exists(&self, staged: &[StagedWrite], sku: &str) -> bool {
        self.products.contains_key(sku) || staged.iter().any(|write| {
            matches!(write, StagedWrite::Product(row) if row.sku == sku)
        })
    }

    fn address_exists(&self, staged: &[StagedWrite], role: AddressRole, record_id: RecordId) -> bool {
        self.addresses(role).iter().any(|entry| *entry.value() == record_id)
            || staged.iter().filter_map(|write| write.address(role)).any(|(id, _)| id == record_id)
    }
}

impl Default for InMemoryOrderStore {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderStore for InMemoryOrderStore {
    fn upsert_customer(&self, address: &PostalAddress) -> Result<RecordId, StoreError> {
        Ok(self.upsert_address(AddressRole::Customer, address))
    }

    fn upsert_recipient(&self, address: &PostalAddress) -> Result<RecordId, StoreError> {
        Ok(self.upsert_address(AddressRole::Recipient, address))
    }

    fn upsert_order(&self, order: &OrderRow) -> Result<(), StoreError> {
        let mut staged = self.staged();

        for (role, record_id) in [(AddressRole::Customer, order.customer_id), (AddressRole::Recipient, order.recipient_id)] {
            if !self.address_exists(&staged, role, record_id) {
                return Err(StoreError::UnknownAddress {
                    pick_ticket_number: order.pick_ticket_number.clone(),
                    role,
                    record_id
                })
            }
        }

        staged.push(StagedWrite::Order(order.clone()));

        Ok(())
    }

    fn upsert_product(&self, sku: &str, name: Option<&str>, unit_price: Decimal) -> Result<(), StoreError> {
        self.staged().push(StagedWrite::Product(ProductRow {
            sku: sku.to_string(),
            name: name.map(str::to_string),
            unit_price
        }));

        Ok(())
    }

    fn upsert_line_item(&self, line_item: &LineItemRow) -> Result<(), StoreError> {
        let mut staged = self.staged();

        if !self.order_exists(&staged, &line_item.pick_ticket_number) {
            return Err(StoreError::UnknownOrder {
                pick_ticket_number: line_item.pick_ticket_number.clone(),
                line_number: line_item.line_number
            })
        }

        if !self.product_exists(&staged, &line_item.sku) {
            return Err(StoreError::UnknownProduct {
                pick_ticket_number: line_item.pick_ticket_number.clone(),
                line_number: line_item.line_number,
                sku: line_item.sku.clone()
            })
        }

        staged.push(StagedWrite::LineItem(line_item.clone()));

        Ok(())
    }

    fn commit(&self) -> Result<(), StoreError> {
        let writes: Vec<StagedWrite> = self.staged().drain(..).collect();
        debug!("Committing {} staged write(s)", writes.len());

        for write in writes {
            match write {
                StagedWrite::Customer(record_id, address) => {
                    self.customers.insert(address, record_id);
                }
                StagedWrite::Recipient(record_id, address) => {
                    self.recipients.insert(address, record_id);
                }
                StagedWrite::Order(row) => {
                    self.orders.insert(row.pick_ticket_number.clone(), row);
                }
                StagedWrite::Product(mut row) => {
                    //NOTE: An unresolved name never erases a name resolved by an earlier upload
                    if row.name.is_none() {
                        row.name = self.product(&row.sku).and_then(|existing| existing.name);
                    }

                    self.products.insert(row.sku.clone(), row);
                }
                StagedWrite::LineItem(row) => {
                    self.line_items.insert((row.pick_ticket_number.clone(), row.line_number), row);
                }
            }
        }

        Ok(())
    }

    fn rollback(&self) {
        let discarded = self.staged().drain(..).count();
        debug!("Rolled back {discarded} staged write(s)");
    }
}
