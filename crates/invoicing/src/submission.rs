//! Create-invoice payload.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;

use billbook_core::{CustomerId, Money};
use billbook_parties::{CustomerRef, NewCustomer};

use crate::delivery::DeliveryKind;
use crate::draft::InvoiceDraft;
use crate::invoice::{InvoiceItem, InvoiceStatus, PaymentMethod, PaymentStatus};
use crate::validation::ValidatedInvoice;

/// Body of `POST /invoices`.
///
/// Exactly one of `customer_id` / `customer` is set: an existing customer
/// travels as its id, a new one as a name the backend creates or reuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceSubmission {
    #[serde(serialize_with = "crate::wire::date::serialize")]
    pub invoice_date: NaiveDate,
    #[serde(serialize_with = "crate::wire::date::serialize")]
    pub ordered_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<CustomerId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<NewCustomer>,
    pub items: Vec<InvoiceItem>,
    pub subtotal: Money,
    pub discount: Money,
    pub delivery_charge: Money,
    pub tax: Money,
    pub grand_total: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    pub payment_status: PaymentStatus,
    pub advance_payment: Money,
    pub balance_amount: Money,
    pub delivery_type: DeliveryKind,
    #[serde(serialize_with = "crate::wire::date::serialize")]
    pub delivery_date: NaiveDate,
    #[serde(serialize_with = "crate::wire::time::serialize")]
    pub delivery_time: NaiveTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delivery_address: Option<String>,
    pub status: InvoiceStatus,
}

impl InvoiceSubmission {
    pub fn build(draft: &InvoiceDraft, validated: ValidatedInvoice, status: InvoiceStatus) -> Self {
        let (customer_id, customer) = match validated.customer {
            CustomerRef::Existing { id, .. } => (Some(id), None),
            CustomerRef::Draft { name } => (None, Some(NewCustomer::named(name))),
        };
        let pricing = draft.pricing();
        let delivery = validated.delivery;

        Self {
            invoice_date: draft.invoice_date(),
            ordered_date: validated.ordered_date,
            customer_id,
            customer,
            items: draft.items().iter().map(InvoiceItem::from).collect(),
            subtotal: pricing.subtotal,
            discount: pricing.discount,
            delivery_charge: pricing.delivery_charge,
            tax: pricing.tax,
            grand_total: pricing.grand_total,
            payment_method: draft.payment_method(),
            payment_status: draft.payment_status(),
            advance_payment: draft.adjustments().advance_payment,
            balance_amount: pricing.balance_amount,
            delivery_type: delivery.kind(),
            delivery_date: delivery.date(),
            delivery_time: delivery.time(),
            delivery_address: delivery.address().map(str::to_string),
            status,
        }
    }
}
