use crate::codec::schema::{DetailField, HeaderField, DETAIL_CONSTANTS, DETAIL_WIDTH, HEADER_CONSTANTS, HEADER_WIDTH};
use crate::models::{AddressRole, LineItem, Order};
use crate::types::{normalize_order_date, LineNumber};

pub(super) fn encode_header(order: &Order) -> String {
    let mut columns = blank_record(HEADER_WIDTH, &HEADER_CONSTANTS);

    for field in HeaderField::ALL {
        columns[field.index()] = header_value(order, field);
    }

    columns.join(",")
}

pub(super) fn encode_detail(pick_ticket_number: &str, line_number: LineNumber, item: &LineItem) -> String {
    let mut columns = blank_record(DETAIL_WIDTH, &DETAIL_CONSTANTS);

    for field in DetailField::ALL {
        columns[field.index()] = match field {
            DetailField::PickTicketNumber => pick_ticket_number.to_string(),
            DetailField::LineNumber => line_number.to_string(),
            DetailField::Sku => item.sku().to_string(),
            DetailField::Quantity | DetailField::UnitsToShip => item.units_to_ship().to_string(),
            DetailField::UnitPrice => item.unit_price().to_string()
        };
    }

    columns.join(",")
}

fn blank_record(width: usize, constants: &[(usize, &str)]) -> Vec<String> {
    let mut columns = vec![String::new(); width];

    for (index, value) in constants {
        columns[*index] = value.to_string();
    }

    columns
}

fn header_value(order: &Order, field: HeaderField) -> String {
    let value = match field {
        HeaderField::PickTicketNumber => order.pick_ticket_number(),
        HeaderField::OrderNumber => order.order_number().to_string(),
        HeaderField::OrderDate => normalize_order_date(order.order_date()),
        HeaderField::SoldTo(part) => order.address(AddressRole::Customer).get(part).to_string(),
        HeaderField::ShipTo(part) => order.address(AddressRole::Recipient).get(part).to_string(),
        HeaderField::ShippingMethod => order.shipping_method().to_string()
    };

    if field.is_quoted() {
        format!("\"{value}\"")
    } else {
        value
    }
}
