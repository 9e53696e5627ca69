use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::{Map, Number, Value};

use crate::models::errors::ValidationError;
use crate::models::{AddressField, AddressRole, LineItem, Order, PostalAddress};

const ORDER_KEYS: [&str; 6] = ["orderNumber", "orderDate", "shippingMethod", "customer", "recipient", "products"];
const PRODUCT_KEYS: [&str; 3] = ["sku", "quantity", "price"];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderPayload {
    order_number: Scalar,
    order_date: Scalar,
    shipping_method: Scalar,
    customer: AddressPayload,
    recipient: AddressPayload,
    products: Vec<ProductPayload>
}

#[derive(Debug, Deserialize)]
struct AddressPayload {
    name: Scalar,
    address: Scalar,
    city: Scalar,
    state: Scalar,
    country: Scalar,
    zip: Scalar
}

#[derive(Debug, Deserialize)]
struct ProductPayload {
    sku: Scalar,
    quantity: Decimal,
    price: Decimal
}

//NOTE: Upstream systems are not consistent about numbers versus strings (zip codes and order numbers
//      in particular), so both are accepted for text fields.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Number(Number)
}

impl From<Scalar> for String {
    fn from(scalar: Scalar) -> Self {
        match scalar {
            Scalar::Text(text) => text,
            Scalar::Number(number) => number.to_string()
        }
    }
}

impl From<AddressPayload> for PostalAddress {
    fn from(payload: AddressPayload) -> Self {
        PostalAddress {
            name: payload.name.into(),
            address: payload.address.into(),
            city: payload.city.into(),
            state: payload.state.into(),
            country: payload.country.into(),
            zip: payload.zip.into()
        }
    }
}

impl ProductPayload {
    fn into_line_item(self, position: usize) -> Result<LineItem, ValidationError> {
        for (key, amount) in [("quantity", self.quantity), ("price", self.price)] {
            if amount < Decimal::ZERO {
                return Err(ValidationError::negative_value(position, key, amount))
            }
        }

        Ok(LineItem::new(self.sku, self.quantity, self.price))
    }
}

impl Order {
    /// Builds an order from raw JSON bytes.
    pub fn from_json_slice(payload: &[u8]) -> Result<Self, ValidationError> {
        let value: Value = serde_json::from_slice(payload)?;
        Self::from_json(&value)
    }

    /// Builds an order from an inbound JSON payload.
    ///
    /// Every required key is checked before any value is read so that a payload is either
    /// accepted whole or rejected whole.
    ///
    /// # Errors
    /// Returns `ValidationError` if:
    /// - A top level, address or product key is missing.
    /// - A value has the wrong JSON type or is not numeric where a number is required.
    /// - A quantity or price is negative, or the order number is empty.
    pub fn from_json(value: &Value) -> Result<Self, ValidationError> {
        let order = value.as_object().ok_or_else(|| ValidationError::not_an_object("order"))?;

        check_keys(order)?;

        let payload = OrderPayload::deserialize(value).map_err(ValidationError::InvalidPayload)?;
        let order_number = String::from(payload.order_number);

        if order_number.is_empty() {
            return Err(ValidationError::EmptyOrderNumber)
        }

        let products = payload.products.into_iter()
            .enumerate()
            .map(|(index, product)| product.into_line_item(index + 1))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Order::new(
            order_number,
            String::from(payload.order_date),
            String::from(payload.shipping_method),
            payload.customer.into(),
            payload.recipient.into(),
            products
        ))
    }
}

fn check_keys(order: &Map<String, Value>) -> Result<(), ValidationError> {
    for key in ORDER_KEYS {
        if !order.contains_key(key) {
            return Err(ValidationError::MissingKey { key })
        }
    }

    for role in [AddressRole::Customer, AddressRole::Recipient] {
        let address = order[role.key()].as_object()
            .ok_or_else(|| ValidationError::not_an_object(role.key()))?;

        for field in AddressField::ALL {
            if !address.contains_key(field.key()) {
                return Err(ValidationError::MissingAddressKey { role, key: field.key() })
            }
        }
    }

    let products = order["products"].as_array()
        .ok_or_else(|| ValidationError::not_an_array("products"))?;

    for (position, product) in products.iter().enumerate() {
        let product = product.as_object()
            .ok_or_else(|| ValidationError::not_an_object("products"))?;

        for key in PRODUCT_KEYS {
            if !product.contains_key(key) {
                return Err(ValidationError::MissingProductKey { position: position + 1, key })
            }
        }
    }

    Ok(())
}
