//! Display formatting for invoice lists and the rendered invoice.
//!
//! Amounts format through `Money`'s `Display` (`$25.00`).

use chrono::{NaiveDate, NaiveTime, Timelike};

use crate::invoice::{InvoiceStatus, PaymentStatus};

/// `May 01, 2024` (invoice list).
pub fn short_date(date: NaiveDate) -> String {
    date.format("%b %d, %Y").to_string()
}

/// `September 03, 2024` (invoice document).
pub fn long_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

/// 12-hour clock without leading zero: `2:30 PM`, `12:05 AM`.
pub fn time_12h(time: NaiveTime) -> String {
    let (is_pm, hour) = time.hour12();
    format!("{}:{:02} {}", hour, time.minute(), if is_pm { "PM" } else { "AM" })
}

/// CSS classes for the status badge, e.g. `status-badge status-final`.
pub fn status_badge_class(status: InvoiceStatus) -> String {
    format!("status-badge status-{}", status.as_str())
}

/// CSS classes for the payment badge, e.g. `payment-status-badge status-partially-paid`.
pub fn payment_status_badge_class(status: PaymentStatus) -> String {
    format!(
        "payment-status-badge status-{}",
        status.as_str().to_lowercase().replace(' ', "-")
    )
}
