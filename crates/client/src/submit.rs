//! Saving invoices.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use billbook_core::InvoiceId;
use billbook_invoicing::{Invoice, InvoiceDraft, InvoiceStatus, InvoiceSubmission};

use crate::api::InvoiceApi;
use crate::error::{ClientError, ClientResult};

/// At most one save in flight at a time.
#[derive(Debug, Default)]
pub struct SubmitGate {
    busy: AtomicBool,
}

/// Held for the duration of a save; releases the gate on drop.
#[derive(Debug)]
pub struct SubmitPermit<'a> {
    gate: &'a SubmitGate,
}

impl SubmitGate {
    pub fn try_acquire(&self) -> Option<SubmitPermit<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| SubmitPermit { gate: self })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

impl Drop for SubmitPermit<'_> {
    fn drop(&mut self) {
        self.gate.busy.store(false, Ordering::Release);
    }
}

/// Validates a draft and sends it to the backend.
///
/// The draft is only borrowed: on any failure it is still there, unchanged,
/// for the user to fix and resubmit.
pub struct InvoiceSubmitter {
    api: Arc<dyn InvoiceApi>,
    gate: SubmitGate,
}

impl InvoiceSubmitter {
    pub fn new(api: Arc<dyn InvoiceApi>) -> Self {
        Self {
            api,
            gate: SubmitGate::default(),
        }
    }

    pub fn is_submitting(&self) -> bool {
        self.gate.is_busy()
    }

    /// Create a new invoice from `draft` with the given status.
    pub async fn submit(&self, draft: &InvoiceDraft, status: InvoiceStatus) -> ClientResult<Invoice> {
        let api = Arc::clone(&self.api);
        self.guarded(draft, status, |submission| async move {
            api.create(&submission).await
        })
        .await
    }

    /// Overwrite invoice `id` with the contents of `draft`.
    pub async fn resubmit(
        &self,
        id: InvoiceId,
        draft: &InvoiceDraft,
        status: InvoiceStatus,
    ) -> ClientResult<Invoice> {
        let api = Arc::clone(&self.api);
        self.guarded(draft, status, |submission| async move {
            api.update(id, &submission).await
        })
        .await
    }

    async fn guarded<F, Fut>(&self, draft: &InvoiceDraft, status: InvoiceStatus, send: F) -> ClientResult<Invoice>
    where
        F: FnOnce(InvoiceSubmission) -> Fut,
        Fut: Future<Output = ClientResult<Invoice>>,
    {
        let _permit = self.gate.try_acquire().ok_or(ClientError::SubmitInProgress)?;

        let submission = draft.prepare_submission(status)?;
        tracing::info!(
            status = status.as_str(),
            items = submission.items.len(),
            grand_total = %submission.grand_total,
            "saving invoice"
        );

        match send(submission).await {
            Ok(invoice) => {
                tracing::info!(id = %invoice.id, invoice_id = %invoice.invoice_id, "invoice saved");
                Ok(invoice)
            }
            Err(e) => {
                tracing::warn!(error = %e, "invoice save failed");
                Err(e)
            }
        }
    }
}
