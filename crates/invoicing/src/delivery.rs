//! Delivery / pickup details.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryKind {
    Delivery,
    Pickup,
}

impl DeliveryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryKind::Delivery => "delivery",
            DeliveryKind::Pickup => "pickup",
        }
    }

    /// Heading of the delivery section on the rendered invoice.
    pub fn section_heading(&self) -> &'static str {
        match self {
            DeliveryKind::Delivery => "Delivery Information",
            DeliveryKind::Pickup => "Pickup Information",
        }
    }

    pub fn requires_address(&self) -> bool {
        matches!(self, DeliveryKind::Delivery)
    }
}

/// Raw form state. Pickup reuses the date/time fields; the address is only
/// meaningful for deliveries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeliveryFields {
    pub kind: Option<DeliveryKind>,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub address: Option<String>,
}

impl DeliveryFields {
    /// The address, if it contains anything but whitespace.
    pub fn address(&self) -> Option<&str> {
        self.address
            .as_deref()
            .map(str::trim)
            .filter(|address| !address.is_empty())
    }
}

/// Complete, validated delivery details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryInfo {
    kind: DeliveryKind,
    date: NaiveDate,
    time: NaiveTime,
    address: Option<String>,
}

impl DeliveryInfo {
    pub fn pickup(date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            kind: DeliveryKind::Pickup,
            date,
            time,
            address: None,
        }
    }

    pub fn delivery(date: NaiveDate, time: NaiveTime, address: impl Into<String>) -> Self {
        Self {
            kind: DeliveryKind::Delivery,
            date,
            time,
            address: Some(address.into()),
        }
    }

    pub fn kind(&self) -> DeliveryKind {
        self.kind
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn time(&self) -> NaiveTime {
        self.time
    }

    /// Always `Some` for deliveries, always `None` for pickups.
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }
}
