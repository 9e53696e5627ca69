use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::errors::ValidationError;

/// A single product line on an order.
///
/// Line numbers are not stored here; they are assigned by position when the order is encoded.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    sku: String,
    quantity: Decimal,
    #[serde(rename = "price")]
    unit_price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    display_name: Option<String>
}

impl LineItem {
    pub fn new(sku: impl Into<String>, quantity: Decimal, unit_price: Decimal) -> Self {
        Self {
            sku: sku.into(),
            quantity,
            unit_price,
            display_name: None
        }
    }

    pub fn sku(&self) -> &str {
        &self.sku
    }

    /// The quantity exactly as received, fractional part included.
    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    /// The whole number of units the partner ships: the quantity truncated toward zero.
    pub fn units_to_ship(&self) -> Decimal {
        self.quantity.trunc()
    }

    /// The catalog name for this SKU, absent until enrichment resolves it.
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Records the catalog name for this line. A name can only be resolved once.
    pub fn resolve_display_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        if self.display_name.is_some() {
            return Err(ValidationError::DisplayNameAlreadyResolved { sku: self.sku.clone() })
        }

        self.display_name = Some(name.into());

        Ok(())
    }
}
