mod address;
mod errors;
mod line_item;
mod order;
mod payload;

pub use address::{AddressField, AddressRole, PostalAddress};
pub use errors::ValidationError;
pub use line_item::LineItem;
pub use order::Order;
