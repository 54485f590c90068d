//! The create-invoice screen: a draft plus its customer autocomplete.

use chrono::NaiveDate;

use billbook_invoicing::{Invoice, InvoiceDraft, InvoiceStatus};
use billbook_parties::SearchKey;

use crate::error::ClientResult;
use crate::search::SearchController;
use crate::submit::InvoiceSubmitter;

/// Keeps the customer text of the draft and the autocomplete in step.
#[derive(Debug)]
pub struct InvoiceForm {
    draft: InvoiceDraft,
    search: SearchController,
    error: Option<String>,
}

impl InvoiceForm {
    pub fn new(today: NaiveDate, search: SearchController) -> Self {
        Self {
            draft: InvoiceDraft::new(today),
            search,
            error: None,
        }
    }

    /// A form dated with the local calendar day.
    pub fn for_today(search: SearchController) -> Self {
        Self::new(chrono::Local::now().date_naive(), search)
    }

    pub fn draft(&self) -> &InvoiceDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut InvoiceDraft {
        &mut self.draft
    }

    pub fn search(&self) -> &SearchController {
        &self.search
    }

    /// Last save error, shown above the form.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn customer_input(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.draft.customer_input(text.clone());
        self.search.input(text);
    }

    /// Click on suggestion `index`. Returns `true` if a customer was bound.
    pub fn select_suggestion(&mut self, index: usize) -> bool {
        match self.search.select(index) {
            Some(customer) => {
                self.draft.select_customer(customer);
                true
            }
            None => false,
        }
    }

    pub fn customer_key(&mut self, key: SearchKey) -> bool {
        match self.search.key(key) {
            Some(customer) => {
                self.draft.select_customer(customer);
                true
            }
            None => false,
        }
    }

    /// Save as draft or final. Failures are kept for display and the draft is
    /// left as it was.
    pub async fn save(&mut self, submitter: &InvoiceSubmitter, status: InvoiceStatus) -> ClientResult<Invoice> {
        self.error = None;
        let result = submitter.submit(&self.draft, status).await;
        if let Err(e) = &result {
            self.error = Some(e.to_string());
        }
        result
    }
}
