use thiserror::Error;

use crate::types::PickTicketNumber;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("The order has not been populated yet")]
    NotPopulated,
    #[error("Record on line [{line}] is not a pick ticket header: found tag [{tag}]")]
    MalformedHeader {
        line: u64,
        tag: String
    },
    #[error("Record on line [{line}] is not a pick ticket detail: found tag [{tag}]")]
    MalformedDetail {
        line: u64,
        tag: String
    },
    #[error("Record on line [{line}] has no column [{index}] for field [{field}]")]
    MissingColumn {
        line: u64,
        index: usize,
        field: &'static str
    },
    #[error("Invalid value [{value}] for field [{field}] on line [{line}]")]
    InvalidField {
        line: u64,
        field: &'static str,
        value: String
    },
    #[error("Header on line [{line}] is keyed [{pick_ticket_number}] but carries order number [{order_number}]")]
    PickTicketMismatch {
        line: u64,
        pick_ticket_number: PickTicketNumber,
        order_number: String
    },
    #[error("Pick ticket [{pick_ticket_number}] has detail records but no header record")]
    MissingHeader {
        pick_ticket_number: PickTicketNumber
    },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error)
}
