//! Invoice list and detail views.

use serde::Serialize;

use billbook_core::{InvoiceId, Money};
use billbook_invoicing::format::{
    long_date, payment_status_badge_class, short_date, status_badge_class, time_12h,
};
use billbook_invoicing::{Invoice, StatusFilter};

use crate::api::InvoiceApi;
use crate::error::{ClientError, ClientResult};

/// One row of the invoice table, fully formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceRow {
    pub id: InvoiceId,
    pub invoice_id: String,
    pub order_id: String,
    pub customer_name: String,
    pub invoice_date: String,
    pub grand_total: String,
    pub payment_status: String,
    pub payment_badge_class: String,
    pub status: String,
    pub status_badge_class: String,
}

impl From<&Invoice> for InvoiceRow {
    fn from(invoice: &Invoice) -> Self {
        Self {
            id: invoice.id,
            invoice_id: invoice.invoice_id.clone(),
            order_id: invoice.order_id.clone(),
            customer_name: invoice.customer_name().to_string(),
            invoice_date: short_date(invoice.invoice_date),
            grand_total: invoice.grand_total.to_string(),
            payment_status: invoice.payment_status.as_str().to_string(),
            payment_badge_class: payment_status_badge_class(invoice.payment_status),
            status: invoice.status.as_str().to_string(),
            status_badge_class: status_badge_class(invoice.status),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailLine {
    pub item_name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub total: String,
}

/// Schedule block of the rendered invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailSchedule {
    pub heading: &'static str,
    pub date: Option<String>,
    pub time: Option<String>,
    pub address: Option<String>,
}

/// Everything the invoice document shows, formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvoiceDetail {
    pub invoice_id: String,
    pub order_id: String,
    pub invoice_date: String,
    pub ordered_date: String,
    pub status: String,
    pub customer_code: String,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub customer_address: Option<String>,
    pub lines: Vec<DetailLine>,
    pub subtotal: String,
    pub discount: String,
    pub delivery_charge: String,
    pub tax: String,
    pub grand_total: String,
    pub advance_payment: String,
    pub balance_amount: String,
    pub payment_method: Option<String>,
    pub payment_status: String,
    pub schedule: Option<DetailSchedule>,
}

fn amount(value: Option<Money>) -> String {
    value.unwrap_or(Money::ZERO).to_string()
}

impl From<&Invoice> for InvoiceDetail {
    fn from(invoice: &Invoice) -> Self {
        let customer = invoice.customer.as_ref();
        let schedule = invoice.delivery_type.map(|kind| DetailSchedule {
            heading: kind.section_heading(),
            date: invoice.delivery_date.map(long_date),
            time: invoice.delivery_time.map(time_12h),
            address: invoice
                .delivery_address
                .clone()
                .filter(|_| kind.requires_address()),
        });

        Self {
            invoice_id: invoice.invoice_id.clone(),
            order_id: invoice.order_id.clone(),
            invoice_date: long_date(invoice.invoice_date),
            ordered_date: long_date(invoice.ordered_date),
            status: invoice.status.as_str().to_uppercase(),
            customer_code: customer
                .map(|c| c.display_code())
                .unwrap_or_else(|| "N/A".to_string()),
            customer_name: invoice.customer_name().to_string(),
            customer_phone: customer.and_then(|c| c.phone.clone()),
            customer_email: customer.and_then(|c| c.email.clone()),
            customer_address: customer.and_then(|c| c.address.clone()),
            lines: invoice
                .items
                .iter()
                .map(|item| DetailLine {
                    item_name: item.item_name.clone(),
                    quantity: item.quantity,
                    unit_price: item.unit_price.to_string(),
                    total: item.total_price.to_string(),
                })
                .collect(),
            subtotal: invoice.subtotal.to_string(),
            discount: amount(invoice.discount),
            delivery_charge: amount(invoice.delivery_charge),
            tax: amount(invoice.tax),
            grand_total: invoice.grand_total.to_string(),
            advance_payment: amount(invoice.advance_payment),
            balance_amount: invoice.balance_amount.to_string(),
            payment_method: invoice.payment_method.map(|m| m.as_str().to_string()),
            payment_status: invoice.payment_status.as_str().to_string(),
            schedule,
        }
    }
}

pub async fn load_list(api: &dyn InvoiceApi, filter: StatusFilter) -> ClientResult<Vec<InvoiceRow>> {
    let invoices = api.list(filter).await?;
    tracing::debug!(count = invoices.len(), filter = ?filter, "invoices loaded");
    Ok(invoices.iter().map(InvoiceRow::from).collect())
}

/// Fetch one invoice. The raw record is returned alongside its display form
/// so callers can export it.
pub async fn load_detail(api: &dyn InvoiceApi, id: InvoiceId) -> ClientResult<(Invoice, InvoiceDetail)> {
    let invoice = api.get(id).await.map_err(|e| match e {
        ClientError::NotFound(_) => ClientError::NotFound(format!("invoice {id}")),
        other => other,
    })?;
    let detail = InvoiceDetail::from(&invoice);
    Ok((invoice, detail))
}

pub async fn delete(api: &dyn InvoiceApi, id: InvoiceId) -> ClientResult<()> {
    api.delete(id).await?;
    tracing::info!(%id, "invoice deleted");
    Ok(())
}
