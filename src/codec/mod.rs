mod decoder;
mod encoder;
mod errors;
pub mod schema;

use csv::StringRecord;
use tracing::debug;

use crate::batch::OrderBatch;
use crate::models::Order;

pub use decoder::{DecodeMode, DecodedBatch, DetailRecord, HeaderRecord, RejectedTicket};
pub use errors::CodecError;

/// Converts orders to and from the partner's fixed-column pick ticket CSV.
///
/// Encoding is the same in every mode. The decode mode only decides how detail rows with an
/// unexpected record-type tag are treated (see `DecodeMode`).
#[derive(Debug, Clone, Copy, Default)]
pub struct PickTicketCodec {
    mode: DecodeMode
}

impl PickTicketCodec {
    pub fn new(mode: DecodeMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> DecodeMode {
        self.mode
    }

    /// Encodes one order as a header line followed by one detail line per product.
    ///
    /// Every line, the last included, is terminated by `\n`. Line numbers are assigned from the
    /// position of each product, starting at 1.
    ///
    /// # Errors
    /// Returns `CodecError::NotPopulated` if the order has no order number.
    pub fn encode(order: &Order) -> Result<String, CodecError> {
        if !order.is_populated() {
            return Err(CodecError::NotPopulated)
        }

        let pick_ticket_number = order.pick_ticket_number();
        let mut output = encoder::encode_header(order);
        output.push('\n');

        for (line_number, item) in (1..).zip(order.products()) {
            output.push_str(&encoder::encode_detail(&pick_ticket_number, line_number, item));
            output.push('\n');
        }

        debug!("Encoded pick ticket [{pick_ticket_number}] with {} detail record(s)", order.products().len());

        Ok(output)
    }

    /// Decodes a whole pick ticket file, grouping its records into orders.
    ///
    /// Pick tickets set aside by a permissive decode are logged and left out of the batch.
    pub fn decode(&self, input: &[u8]) -> Result<OrderBatch, CodecError> {
        self.decode_with_rejections(input).map(|decoded| decoded.batch)
    }

    /// Decodes a whole pick ticket file and reports the pick tickets that could not be rebuilt.
    ///
    /// A pick ticket is rejected when one of its records is missing a mapped column, has a
    /// non-numeric line number, quantity or price, or is a header whose key is not `"C"` + its
    /// order number. It is also rejected when it has details but no header. In permissive mode
    /// such tickets are returned in `DecodedBatch::rejected` and the other tickets are kept.
    ///
    /// # Errors
    /// Returns `CodecError` if the CSV cannot be read or a record has no pick ticket number. In
    /// strict mode, also on the first rejected pick ticket or a detail record not tagged `PTD`.
    pub fn decode_with_rejections(&self, input: &[u8]) -> Result<DecodedBatch, CodecError> {
        decoder::decode_batch(input, self.mode)
    }

    /// Reads a single record that is expected to be a header.
    pub fn decode_header(record: &StringRecord) -> Result<HeaderRecord, CodecError> {
        HeaderRecord::from_record(record)
    }

    /// Reads a single record that is expected to be a detail.
    pub fn decode_detail(record: &StringRecord) -> Result<DetailRecord, CodecError> {
        DetailRecord::from_record(record)
    }
}
