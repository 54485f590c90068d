//! Invoicing domain module.
//!
//! This crate contains the invoice-building rules: line items and their
//! totals, the pricing summary, delivery/pickup details, submit-time
//! validation and the payload sent to the backend. It is deterministic domain
//! logic (no IO, no HTTP, no storage).

pub mod delivery;
pub mod draft;
pub mod format;
pub mod invoice;
pub mod ledger;
pub mod pricing;
pub mod submission;
pub mod validation;

mod wire;

pub use delivery::{DeliveryFields, DeliveryInfo, DeliveryKind};
pub use draft::InvoiceDraft;
pub use invoice::{Invoice, InvoiceItem, InvoiceStatus, PaymentMethod, PaymentStatus, StatusFilter};
pub use ledger::{ItemInput, ItemLedger, LedgerError, LineItem};
pub use pricing::{compute_snapshot, Adjustments, PricingSnapshot};
pub use submission::InvoiceSubmission;
pub use validation::{validate, ValidatedInvoice, ValidationError};
