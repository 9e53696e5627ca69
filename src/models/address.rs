use std::fmt;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// One component of a postal address block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressField {
    Name,
    Address,
    City,
    State,
    Country,
    Zip
}

impl AddressField {
    pub const ALL: [AddressField; 6] = [
        AddressField::Name,
        AddressField::Address,
        AddressField::City,
        AddressField::State,
        AddressField::Country,
        AddressField::Zip
    ];

    /// The JSON key used for this component in an order payload.
    pub const fn key(self) -> &'static str {
        match self {
            AddressField::Name => "name",
            AddressField::Address => "address",
            AddressField::City => "city",
            AddressField::State => "state",
            AddressField::Country => "country",
            AddressField::Zip => "zip"
        }
    }
}

/// A postal address, used identically for the customer (sold to) and recipient (ship to) roles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostalAddress {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub zip: String
}

impl PostalAddress {
    pub fn get(&self, field: AddressField) -> &str {
        match field {
            AddressField::Name => &self.name,
            AddressField::Address => &self.address,
            AddressField::City => &self.city,
            AddressField::State => &self.state,
            AddressField::Country => &self.country,
            AddressField::Zip => &self.zip
        }
    }

    pub fn set(&mut self, field: AddressField, value: String) {
        match field {
            AddressField::Name => self.name = value,
            AddressField::Address => self.address = value,
            AddressField::City => self.city = value,
            AddressField::State => self.state = value,
            AddressField::Country => self.country = value,
            AddressField::Zip => self.zip = value
        }
    }
}

/// Which party an address block belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressRole {
    Customer,
    Recipient
}

impl AddressRole {
    pub const fn key(self) -> &'static str {
        match self {
            AddressRole::Customer => "customer",
            AddressRole::Recipient => "recipient"
        }
    }
}

impl Display for AddressRole {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.key())
    }
}
