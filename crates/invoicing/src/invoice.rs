use core::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use billbook_core::{CustomerId, DomainError, InvoiceId, Money};
use billbook_parties::Customer;

use crate::delivery::DeliveryKind;
use crate::ledger::LineItem;

/// Invoice lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Editable, possibly incomplete record.
    Draft,
    /// Submitted, complete record.
    Final,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Final => "final",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    Card,
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
    Online,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card",
            PaymentMethod::BankTransfer => "Bank Transfer",
            PaymentMethod::Online => "Online",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    Paid,
    #[serde(rename = "Partially Paid")]
    PartiallyPaid,
    #[default]
    Due,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "Paid",
            PaymentStatus::PartiallyPaid => "Partially Paid",
            PaymentStatus::Due => "Due",
        }
    }
}

/// Status filter for the invoice list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(InvoiceStatus),
}

impl StatusFilter {
    /// Value of the `status` query parameter, if any.
    pub fn as_query(&self) -> Option<&'static str> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Only(status) => Some(status.as_str()),
        }
    }

    pub fn matches(&self, status: InvoiceStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => *wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(StatusFilter::All),
            "draft" => Ok(StatusFilter::Only(InvoiceStatus::Draft)),
            "final" => Ok(StatusFilter::Only(InvoiceStatus::Final)),
            other => Err(DomainError::validation(format!(
                "status filter must be one of: all, draft, final (got {other:?})"
            ))),
        }
    }
}

/// Line item as exchanged with the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub item_name: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub total_price: Money,
}

impl From<&LineItem> for InvoiceItem {
    fn from(item: &LineItem) -> Self {
        Self {
            id: None,
            item_name: item.name().to_string(),
            quantity: item.quantity(),
            unit_price: item.unit_price(),
            total_price: item.line_total(),
        }
    }
}

/// A persisted invoice as returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    /// Human-facing invoice number generated by the backend.
    pub invoice_id: String,
    pub order_id: String,
    #[serde(with = "crate::wire::date")]
    pub invoice_date: NaiveDate,
    #[serde(with = "crate::wire::date")]
    pub ordered_date: NaiveDate,
    pub customer_id: CustomerId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<Customer>,
    #[serde(default)]
    pub items: Vec<InvoiceItem>,
    pub subtotal: Money,
    #[serde(default)]
    pub discount: Option<Money>,
    #[serde(default)]
    pub delivery_charge: Option<Money>,
    #[serde(default)]
    pub tax: Option<Money>,
    pub grand_total: Money,
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub advance_payment: Option<Money>,
    pub balance_amount: Money,
    #[serde(default)]
    pub delivery_type: Option<DeliveryKind>,
    #[serde(default, with = "crate::wire::option_date")]
    pub delivery_date: Option<NaiveDate>,
    #[serde(default, with = "crate::wire::option_time")]
    pub delivery_time: Option<NaiveTime>,
    #[serde(default)]
    pub delivery_address: Option<String>,
    pub status: InvoiceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Invoice {
    /// Customer name for list rows; `N/A` when the backend did not embed one.
    pub fn customer_name(&self) -> &str {
        self.customer
            .as_ref()
            .map(|customer| customer.name.as_str())
            .unwrap_or("N/A")
    }

    pub fn is_draft(&self) -> bool {
        self.status == InvoiceStatus::Draft
    }
}
