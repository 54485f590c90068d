//! Submit-time validation.
//!
//! Rules run in a fixed order and the first failure wins. Nothing here runs
//! while the user is typing; the only live check is the date-order warning
//! exposed by the draft.

use chrono::NaiveDate;
use thiserror::Error;

use billbook_parties::{CustomerRef, UnresolvedCustomer};

use crate::delivery::{DeliveryFields, DeliveryInfo, DeliveryKind};
use crate::draft::InvoiceDraft;

/// Why a draft cannot be submitted. Messages are shown to the user as-is.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Ordered date is required")]
    MissingOrderedDate,

    #[error("Ordered date must be less than or equal to invoice date")]
    DateOrder {
        ordered: NaiveDate,
        invoice: NaiveDate,
    },

    #[error("Please add at least one item")]
    NoItems,

    #[error("Please select Delivery or Pickup")]
    MissingDeliveryType,

    #[error("Pickup Date and Time are required")]
    PickupScheduleRequired,

    #[error("Delivery Date and Time are required")]
    DeliveryScheduleRequired,

    #[error("Delivery Address is required")]
    DeliveryAddressRequired,

    #[error("Please select or enter a customer name")]
    CustomerRequired,
}

impl ValidationError {
    /// Form field the message belongs to, for inline display.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingOrderedDate | ValidationError::DateOrder { .. } => "ordered_date",
            ValidationError::NoItems => "items",
            ValidationError::MissingDeliveryType => "delivery_type",
            ValidationError::PickupScheduleRequired | ValidationError::DeliveryScheduleRequired => {
                "delivery_date"
            }
            ValidationError::DeliveryAddressRequired => "delivery_address",
            ValidationError::CustomerRequired => "customer",
        }
    }
}

impl From<UnresolvedCustomer> for ValidationError {
    fn from(_: UnresolvedCustomer) -> Self {
        ValidationError::CustomerRequired
    }
}

/// The parts of a draft that validation turns from optional into definite.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedInvoice {
    pub ordered_date: NaiveDate,
    pub delivery: DeliveryInfo,
    pub customer: CustomerRef,
}

/// Equal dates pass; only the calendar day is compared.
pub fn check_date_order(ordered: NaiveDate, invoice: NaiveDate) -> Result<(), ValidationError> {
    if ordered > invoice {
        Err(ValidationError::DateOrder { ordered, invoice })
    } else {
        Ok(())
    }
}

fn validate_delivery(fields: &DeliveryFields) -> Result<DeliveryInfo, ValidationError> {
    let kind = fields.kind.ok_or(ValidationError::MissingDeliveryType)?;
    match kind {
        DeliveryKind::Pickup => match (fields.date, fields.time) {
            (Some(date), Some(time)) => Ok(DeliveryInfo::pickup(date, time)),
            _ => Err(ValidationError::PickupScheduleRequired),
        },
        DeliveryKind::Delivery => {
            let (Some(date), Some(time)) = (fields.date, fields.time) else {
                return Err(ValidationError::DeliveryScheduleRequired);
            };
            let address = fields.address().ok_or(ValidationError::DeliveryAddressRequired)?;
            Ok(DeliveryInfo::delivery(date, time, address))
        }
    }
}

/// Run every rule against `draft`. Applies to draft and final saves alike.
pub fn validate(draft: &InvoiceDraft) -> Result<ValidatedInvoice, ValidationError> {
    let ordered_date = draft
        .ordered_date()
        .ok_or(ValidationError::MissingOrderedDate)?;
    check_date_order(ordered_date, draft.invoice_date())?;

    if draft.items().is_empty() {
        return Err(ValidationError::NoItems);
    }

    let delivery = validate_delivery(draft.delivery())?;
    let customer = draft.customer().resolve()?;

    Ok(ValidatedInvoice {
        ordered_date,
        delivery,
        customer,
    })
}
