mod order_date;

pub use order_date::{normalize_order_date, ISO_DATE_FORMAT, PARTNER_DATE_FORMAT};

/// Prefix the partner expects in front of every order number to form the pick ticket key.
pub const PICK_TICKET_PREFIX: &str = "C";

pub type PickTicketNumber = String;
pub type LineNumber = u32;
pub type RecordId = u64;

/// Derives the partner-visible pick ticket number (`"C" + order number`).
pub fn pick_ticket_number(order_number: &str) -> PickTicketNumber {
    format!("{PICK_TICKET_PREFIX}{order_number}")
}
