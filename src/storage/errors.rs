use thiserror::Error;

use crate::models::AddressRole;
use crate::types::{LineNumber, PickTicketNumber, RecordId};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Order [{pick_ticket_number}] references unknown {role} [{record_id}]")]
    UnknownAddress {
        pick_ticket_number: PickTicketNumber,
        role: AddressRole,
        record_id: RecordId
    },
    #[error("Line [{line_number}] of order [{pick_ticket_number}] references unknown order")]
    UnknownOrder {
        pick_ticket_number: PickTicketNumber,
        line_number: LineNumber
    },
    #[error("Line [{line_number}] of order [{pick_ticket_number}] references unknown product [{sku}]")]
    UnknownProduct {
        pick_ticket_number: PickTicketNumber,
        line_number: LineNumber,
        sku: String
    },
    #[error("Order store is unavailable: {0}")]
    Unavailable(String)
}
