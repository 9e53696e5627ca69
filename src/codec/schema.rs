//! Column layout of the partner's pick ticket records.
//!
//! Every positional index used by the codec lives in this module. A record is a fixed number
//! of comma separated columns; a column's position, not a header row, decides what it holds.
//! Columns that are neither mapped nor constant are written as empty strings.

use crate::models::AddressField;

pub const HEADER_TAG: &str = "PTH";
pub const DETAIL_TAG: &str = "PTD";

pub const HEADER_WIDTH: usize = 62;
pub const DETAIL_WIDTH: usize = 27;

/// Literal values written into every header record regardless of the order.
pub const HEADER_CONSTANTS: [(usize, &str); 10] = [
    (0, HEADER_TAG),
    (1, "I"),
    (4, "C"),
    (9, "75"),
    (35, "PGD"),
    (37, "HN"),
    (38, "PGD"),
    (39, "PP"),
    (45, "Y"),
    (49, "PT")
];

/// Literal values written into every detail record regardless of the line item.
pub const DETAIL_CONSTANTS: [(usize, &str); 5] = [
    (0, DETAIL_TAG),
    (1, "I"),
    (4, "A"),
    (17, "HN"),
    (18, "PGD")
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderField {
    PickTicketNumber,
    OrderNumber,
    OrderDate,
    SoldTo(AddressField),
    ShipTo(AddressField),
    ShippingMethod
}

impl HeaderField {
    pub const ALL: [HeaderField; 16] = [
        HeaderField::PickTicketNumber,
        HeaderField::OrderNumber,
        HeaderField::OrderDate,
        HeaderField::SoldTo(AddressField::Name),
        HeaderField::SoldTo(AddressField::Address),
        HeaderField::SoldTo(AddressField::City),
        HeaderField::SoldTo(AddressField::State),
        HeaderField::SoldTo(AddressField::Country),
        HeaderField::SoldTo(AddressField::Zip),
        HeaderField::ShipTo(AddressField::Name),
        HeaderField::ShipTo(AddressField::Address),
        HeaderField::ShipTo(AddressField::City),
        HeaderField::ShipTo(AddressField::State),
        HeaderField::ShipTo(AddressField::Country),
        HeaderField::ShipTo(AddressField::Zip),
        HeaderField::ShippingMethod
    ];

    pub const fn index(self) -> usize {
        match self {
            HeaderField::PickTicketNumber => 2,
            HeaderField::OrderNumber => 3,
            HeaderField::OrderDate => 5,
            HeaderField::SoldTo(AddressField::Name) => 12,
            HeaderField::SoldTo(AddressField::Address) => 13,
            HeaderField::SoldTo(AddressField::City) => 14,
            HeaderField::SoldTo(AddressField::State) => 15,
            HeaderField::SoldTo(AddressField::Country) => 16,
            HeaderField::SoldTo(AddressField::Zip) => 17,
            HeaderField::ShipTo(AddressField::Name) => 19,
            HeaderField::ShipTo(AddressField::Address) => 20,
            HeaderField::ShipTo(AddressField::City) => 21,
            HeaderField::ShipTo(AddressField::State) => 22,
            HeaderField::ShipTo(AddressField::Country) => 23,
            HeaderField::ShipTo(AddressField::Zip) => 24,
            HeaderField::ShippingMethod => 32
        }
    }

    /// The partner's name for the column.
    pub const fn name(self) -> &'static str {
        match self {
            HeaderField::PickTicketNumber => "pick_ticket_num",
            HeaderField::OrderNumber => "order_num",
            HeaderField::OrderDate => "order_date",
            HeaderField::SoldTo(AddressField::Name) => "sold_to_name",
            HeaderField::SoldTo(AddressField::Address) => "sold_to_address",
            HeaderField::SoldTo(AddressField::City) => "sold_to_city",
            HeaderField::SoldTo(AddressField::State) => "sold_to_state",
            HeaderField::SoldTo(AddressField::Country) => "sold_to_country",
            HeaderField::SoldTo(AddressField::Zip) => "sold_to_zip",
            HeaderField::ShipTo(AddressField::Name) => "ship_to_name",
            HeaderField::ShipTo(AddressField::Address) => "ship_to_address",
            HeaderField::ShipTo(AddressField::City) => "ship_to_city",
            HeaderField::ShipTo(AddressField::State) => "ship_to_state",
            HeaderField::ShipTo(AddressField::Country) => "ship_to_country",
            HeaderField::ShipTo(AddressField::Zip) => "ship_to_zip",
            HeaderField::ShippingMethod => "ship_method"
        }
    }

    /// Looks a column up by its partner name, e.g. `"sold_to_zip"`.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }

    /// Name and street lines are wrapped in double quotes so embedded commas cannot shift columns.
    pub const fn is_quoted(self) -> bool {
        matches!(
            self,
            HeaderField::SoldTo(AddressField::Name | AddressField::Address)
                | HeaderField::ShipTo(AddressField::Name | AddressField::Address)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetailField {
    PickTicketNumber,
    LineNumber,
    Sku,
    Quantity,
    UnitsToShip,
    UnitPrice
}

impl DetailField {
    pub const ALL: [DetailField; 6] = [
        DetailField::PickTicketNumber,
        DetailField::LineNumber,
        DetailField::Sku,
        DetailField::Quantity,
        DetailField::UnitsToShip,
        DetailField::UnitPrice
    ];

    pub const fn index(self) -> usize {
        match self {
            DetailField::PickTicketNumber => 2,
            DetailField::LineNumber => 3,
            DetailField::Sku => 5,
            DetailField::Quantity => 10,
            DetailField::UnitsToShip => 11,
            DetailField::UnitPrice => 14
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            DetailField::PickTicketNumber => "pick_ticket_num",
            DetailField::LineNumber => "line_num",
            DetailField::Sku => "sku",
            DetailField::Quantity => "quantity",
            DetailField::UnitsToShip => "units_to_ship",
            DetailField::UnitPrice => "unit_price"
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.name() == name)
    }
}
