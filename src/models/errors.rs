use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::AddressRole;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Order payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Expected [{field}] to be a JSON object")]
    NotAnObject {
        field: String
    },
    #[error("Expected [{field}] to be a JSON array")]
    NotAnArray {
        field: String
    },
    #[error("Missing key [{key}] in order")]
    MissingKey {
        key: &'static str
    },
    #[error("The {role} address is missing key [{key}]")]
    MissingAddressKey {
        role: AddressRole,
        key: &'static str
    },
    #[error("Product [{position}] is missing key [{key}]")]
    MissingProductKey {
        position: usize,
        key: &'static str
    },
    #[error("Order payload has an invalid value: {0}")]
    InvalidPayload(#[source] serde_json::Error),
    #[error("Product [{position}] has a negative [{key}]: {value}")]
    NegativeValue {
        position: usize,
        key: &'static str,
        value: Decimal
    },
    #[error("Order number must not be empty")]
    EmptyOrderNumber,
    #[error("Display name for sku [{sku}] has already been resolved")]
    DisplayNameAlreadyResolved {
        sku: String
    }
}

impl ValidationError {
    pub fn not_an_object(field: &str) -> Self {
        Self::NotAnObject { field: field.to_string() }
    }

    pub fn not_an_array(field: &str) -> Self {
        Self::NotAnArray { field: field.to_string() }
    }

    pub fn negative_value(position: usize, key: &'static str, value: Decimal) -> Self {
        Self::NegativeValue { position, key, value }
    }
}
