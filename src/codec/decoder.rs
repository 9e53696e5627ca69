use std::collections::BTreeMap;
use std::str::FromStr;

use csv::{ReaderBuilder, StringRecord};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use tracing::{debug, error, warn};

use crate::batch::OrderBatch;
use crate::codec::errors::CodecError;
use crate::codec::schema::{DetailField, HeaderField, DETAIL_TAG, HEADER_TAG};
use crate::models::{LineItem, Order, PostalAddress};
use crate::types::{pick_ticket_number, LineNumber, PickTicketNumber};

/// How strictly a batch decode treats the rows it reads.
///
/// A row whose first column is `PTH` is always a header. In `Permissive` mode every other row is
/// treated as a detail, which tolerates files from producers that leave the tag blank or use
/// their own, and a pick ticket that cannot be rebuilt is set aside while the rest of the file
/// is still decoded. `Strict` additionally requires detail rows to carry the `PTD` tag and fails
/// the whole file on the first problem.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DecodeMode {
    #[default]
    Permissive,
    Strict
}

/// The mapped columns of one header record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderRecord {
    pub pick_ticket_number: PickTicketNumber,
    pub order_number: String,
    pub order_date: String,
    pub customer: PostalAddress,
    pub recipient: PostalAddress,
    pub shipping_method: String
}

impl HeaderRecord {
    /// Reads a record that must be a header.
    pub fn from_record(record: &StringRecord) -> Result<Self, CodecError> {
        let tag = record.get(0).unwrap_or_default();

        if tag != HEADER_TAG {
            return Err(CodecError::MalformedHeader { line: line_of(record), tag: tag.to_string() })
        }

        let mut header = HeaderRecord::default();

        for field in HeaderField::ALL {
            let value = column(record, field.index(), field.name())?.to_string();

            match field {
                HeaderField::PickTicketNumber => header.pick_ticket_number = value,
                HeaderField::OrderNumber => header.order_number = value,
                HeaderField::OrderDate => header.order_date = value,
                HeaderField::SoldTo(part) => header.customer.set(part, value),
                HeaderField::ShipTo(part) => header.recipient.set(part, value),
                HeaderField::ShippingMethod => header.shipping_method = value
            }
        }

        if header.pick_ticket_number != pick_ticket_number(&header.order_number) {
            return Err(CodecError::PickTicketMismatch {
                line: line_of(record),
                pick_ticket_number: header.pick_ticket_number,
                order_number: header.order_number
            })
        }

        Ok(header)
    }
}

/// The mapped columns of one detail record.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailRecord {
    pub pick_ticket_number: PickTicketNumber,
    pub line_number: LineNumber,
    pub sku: String,
    pub quantity: Decimal,
    pub units_to_ship: Decimal,
    pub unit_price: Decimal
}

impl DetailRecord {
    /// Reads a record that must be a detail.
    pub fn from_record(record: &StringRecord) -> Result<Self, CodecError> {
        let tag = record.get(0).unwrap_or_default();

        if tag != DETAIL_TAG {
            return Err(CodecError::MalformedDetail { line: line_of(record), tag: tag.to_string() })
        }

        Self::extract(record)
    }

    /// Reads the detail columns without looking at the record-type tag.
    pub fn extract(record: &StringRecord) -> Result<Self, CodecError> {
        let line_number = detail_column(record, DetailField::LineNumber)?;

        Ok(Self {
            pick_ticket_number: detail_column(record, DetailField::PickTicketNumber)?.to_string(),
            line_number: line_number.trim().parse()
                .map_err(|_| invalid_field(record, DetailField::LineNumber.name(), line_number))?,
            sku: detail_column(record, DetailField::Sku)?.to_string(),
            quantity: decimal_column(record, DetailField::Quantity)?,
            units_to_ship: decimal_column(record, DetailField::UnitsToShip)?,
            unit_price: decimal_column(record, DetailField::UnitPrice)?
        })
    }

    pub fn into_line_item(self) -> LineItem {
        LineItem::new(self.sku, self.quantity, self.unit_price)
    }
}

/// The outcome of decoding a whole file.
#[derive(Debug, Default)]
pub struct DecodedBatch {
    pub batch: OrderBatch,
    /// Pick tickets set aside by a permissive decode, in order of first appearance.
    pub rejected: Vec<RejectedTicket>
}

#[derive(Debug)]
pub struct RejectedTicket {
    pub pick_ticket_number: PickTicketNumber,
    pub error: CodecError
}

/// Header and details collected for one pick ticket number while a file is being read.
#[derive(Debug, Default)]
struct TicketAssembly {
    header: Option<HeaderRecord>,
    details: BTreeMap<LineNumber, DetailRecord>,
    rejection: Option<CodecError>
}

impl TicketAssembly {
    fn read(&mut self, record: &StringRecord, mode: DecodeMode) -> Result<(), CodecError> {
        if record.get(0) == Some(HEADER_TAG) {
            let header = HeaderRecord::from_record(record)?;
            let pick_ticket_number = header.pick_ticket_number.clone();
            debug!("Read header for pick ticket [{pick_ticket_number}]");

            if self.header.replace(header).is_some() {
                warn!("Duplicate header for pick ticket [{pick_ticket_number}], keeping the last one");
            }
        } else {
            let detail = match mode {
                DecodeMode::Permissive => DetailRecord::extract(record)?,
                DecodeMode::Strict => DetailRecord::from_record(record)?
            };
            let pick_ticket_number = detail.pick_ticket_number.clone();
            let line_number = detail.line_number;
            debug!("Read detail [{line_number}] for pick ticket [{pick_ticket_number}]");

            if self.details.insert(line_number, detail).is_some() {
                warn!("Duplicate line [{line_number}] for pick ticket [{pick_ticket_number}], keeping the last one");
            }
        }

        Ok(())
    }

    fn into_order(self, pick_ticket_number: &str) -> Result<Order, CodecError> {
        if let Some(error) = self.rejection {
            return Err(error)
        }

        let header = self.header.ok_or_else(|| CodecError::MissingHeader {
            pick_ticket_number: pick_ticket_number.to_string()
        })?;
        let products = self.details.into_values().map(DetailRecord::into_line_item).collect();

        Ok(Order::new(
            header.order_number,
            header.order_date,
            header.shipping_method,
            header.customer,
            header.recipient,
            products
        ))
    }
}

pub(super) fn decode_batch(input: &[u8], mode: DecodeMode) -> Result<DecodedBatch, CodecError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(input);

    //NOTE: Keyed by the pick ticket number in column 2, in order of first appearance. Headers and
    //      details for one ticket may arrive in any relative order.
    let mut tickets = IndexMap::<PickTicketNumber, TicketAssembly>::new();

    for result in reader.records() {
        let record = result?;

        if is_blank(&record) {
            continue;
        }

        let key = HeaderField::PickTicketNumber;
        let pick_ticket_number = column(&record, key.index(), key.name())?.to_string();
        let assembly = tickets.entry(pick_ticket_number).or_default();

        if assembly.rejection.is_some() {
            continue;
        }

        if let Err(error) = assembly.read(&record, mode) {
            if mode == DecodeMode::Strict {
                return Err(error)
            }

            assembly.rejection = Some(error);
        }
    }

    let mut decoded = DecodedBatch::default();

    for (pick_ticket_number, assembly) in tickets {
        match assembly.into_order(&pick_ticket_number) {
            Ok(order) => {
                decoded.batch.insert(order);
            }
            Err(error) if mode == DecodeMode::Permissive => {
                error!("Pick ticket [{pick_ticket_number}] was set aside: {error}");
                decoded.rejected.push(RejectedTicket { pick_ticket_number, error });
            }
            Err(error) => return Err(error)
        }
    }

    Ok(decoded)
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|position| position.line()).unwrap_or_default()
}

fn column<'a>(record: &'a StringRecord, index: usize, field: &'static str) -> Result<&'a str, CodecError> {
    record.get(index).ok_or_else(|| CodecError::MissingColumn { line: line_of(record), index, field })
}

fn detail_column(record: &StringRecord, field: DetailField) -> Result<&str, CodecError> {
    column(record, field.index(), field.name())
}

fn decimal_column(record: &StringRecord, field: DetailField) -> Result<Decimal, CodecError> {
    let value = detail_column(record, field)?;

    Decimal::from_str(value.trim()).map_err(|_| invalid_field(record, field.name(), value))
}

fn invalid_field(record: &StringRecord, field: &'static str, value: &str) -> CodecError {
    CodecError::InvalidField {
        line: line_of(record),
        field,
        value: value.to_string()
    }
}
