//! The invoice being built in the creation flow.
//!
//! Every mutation goes through a method on [`InvoiceDraft`], and every method
//! that touches rows or adjustments recomputes the pricing snapshot before it
//! returns. The snapshot therefore never lags behind the inputs.

use chrono::{NaiveDate, NaiveTime};

use billbook_core::Money;
use billbook_parties::{Customer, CustomerSelection};

use crate::delivery::{DeliveryFields, DeliveryKind};
use crate::invoice::{InvoiceStatus, PaymentMethod, PaymentStatus};
use crate::ledger::{ItemInput, ItemLedger, LedgerError, LineItem};
use crate::pricing::{compute_snapshot, Adjustments, PricingSnapshot};
use crate::submission::InvoiceSubmission;
use crate::validation::{self, check_date_order, ValidatedInvoice, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvoiceDraft {
    invoice_date: NaiveDate,
    ordered_date: Option<NaiveDate>,
    customer: CustomerSelection,
    ledger: ItemLedger,
    adjustments: Adjustments,
    payment_method: Option<PaymentMethod>,
    payment_status: PaymentStatus,
    delivery: DeliveryFields,
    pricing: PricingSnapshot,
}

impl InvoiceDraft {
    /// Empty draft; invoice and ordered dates both default to `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            invoice_date: today,
            ordered_date: Some(today),
            customer: CustomerSelection::new(),
            ledger: ItemLedger::new(),
            adjustments: Adjustments::default(),
            payment_method: None,
            payment_status: PaymentStatus::Due,
            delivery: DeliveryFields::default(),
            pricing: PricingSnapshot::default(),
        }
    }

    fn recompute(&mut self) {
        self.pricing = compute_snapshot(self.ledger.items(), &self.adjustments);
    }

    // ---- dates -----------------------------------------------------------

    pub fn invoice_date(&self) -> NaiveDate {
        self.invoice_date
    }

    pub fn ordered_date(&self) -> Option<NaiveDate> {
        self.ordered_date
    }

    pub fn set_invoice_date(&mut self, date: NaiveDate) {
        self.invoice_date = date;
    }

    pub fn set_ordered_date(&mut self, date: Option<NaiveDate>) {
        self.ordered_date = date;
    }

    /// Live inline warning for the ordered-date field. Never blocks typing.
    pub fn date_order_warning(&self) -> Option<ValidationError> {
        self.ordered_date
            .and_then(|ordered| check_date_order(ordered, self.invoice_date).err())
    }

    // ---- customer --------------------------------------------------------

    pub fn customer(&self) -> &CustomerSelection {
        &self.customer
    }

    /// Keystroke in the customer field. Returns `true` if it un-bound a
    /// previously selected customer.
    pub fn customer_input(&mut self, text: impl Into<String>) -> bool {
        self.customer.on_input(text)
    }

    pub fn select_customer(&mut self, customer: Customer) {
        self.customer.select(customer);
    }

    // ---- items -----------------------------------------------------------

    pub fn items(&self) -> &[LineItem] {
        self.ledger.items()
    }

    pub fn ledger(&self) -> &ItemLedger {
        &self.ledger
    }

    pub fn add_item(&mut self, input: ItemInput) -> Result<usize, LedgerError> {
        self.edit_items(|ledger| ledger.add(input))
    }

    pub fn update_item(&mut self, index: usize, input: ItemInput) -> Result<(), LedgerError> {
        self.edit_items(|ledger| ledger.update(index, input))
    }

    pub fn remove_item(&mut self, index: usize) -> Result<LineItem, LedgerError> {
        self.edit_items(|ledger| ledger.remove(index))
    }

    /// Any other ledger operation (entry-form buffer, commit, edit toggling).
    pub fn edit_items<R>(&mut self, f: impl FnOnce(&mut ItemLedger) -> R) -> R {
        let result = f(&mut self.ledger);
        self.recompute();
        result
    }

    // ---- pricing & payment ----------------------------------------------

    pub fn adjustments(&self) -> &Adjustments {
        &self.adjustments
    }

    pub fn pricing(&self) -> &PricingSnapshot {
        &self.pricing
    }

    pub fn set_adjustments(&mut self, adjustments: Adjustments) {
        self.adjustments = adjustments;
        self.recompute();
    }

    pub fn set_discount(&mut self, amount: Money) {
        self.adjustments.discount = amount;
        self.recompute();
    }

    pub fn set_delivery_charge(&mut self, amount: Money) {
        self.adjustments.delivery_charge = amount;
        self.recompute();
    }

    pub fn set_tax(&mut self, amount: Money) {
        self.adjustments.tax = amount;
        self.recompute();
    }

    pub fn set_advance_payment(&mut self, amount: Money) {
        self.adjustments.advance_payment = amount;
        self.recompute();
    }

    pub fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment_method
    }

    pub fn set_payment_method(&mut self, method: Option<PaymentMethod>) {
        self.payment_method = method;
    }

    pub fn payment_status(&self) -> PaymentStatus {
        self.payment_status
    }

    pub fn set_payment_status(&mut self, status: PaymentStatus) {
        self.payment_status = status;
    }

    // ---- delivery --------------------------------------------------------

    pub fn delivery(&self) -> &DeliveryFields {
        &self.delivery
    }

    pub fn set_delivery_kind(&mut self, kind: Option<DeliveryKind>) {
        self.delivery.kind = kind;
    }

    pub fn set_delivery_date(&mut self, date: Option<NaiveDate>) {
        self.delivery.date = date;
    }

    pub fn set_delivery_time(&mut self, time: Option<NaiveTime>) {
        self.delivery.time = time;
    }

    pub fn set_delivery_address(&mut self, address: Option<String>) {
        self.delivery.address = address;
    }

    // ---- submit ----------------------------------------------------------

    pub fn validate(&self) -> Result<ValidatedInvoice, ValidationError> {
        validation::validate(self)
    }

    /// Validate and build the create payload with the requested status.
    ///
    /// The draft is left untouched either way, so a failed save can be fixed
    /// and retried.
    pub fn prepare_submission(&self, status: InvoiceStatus) -> Result<InvoiceSubmission, ValidationError> {
        let validated = self.validate()?;
        Ok(InvoiceSubmission::build(self, validated, status))
    }
}
