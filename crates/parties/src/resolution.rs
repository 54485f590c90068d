//! Deciding which customer an invoice belongs to.
//!
//! The customer field is free text that can additionally be *bound* to a
//! customer picked from the suggestions. At submit time the pair resolves to
//! either an existing customer id or a name the backend should create.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use billbook_core::CustomerId;

use crate::customer::Customer;

/// The customer an invoice refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CustomerRef {
    /// A customer that already exists on the backend.
    Existing { id: CustomerId, name: String },
    /// A name for the backend to create (or reuse) on submit.
    Draft { name: String },
}

impl CustomerRef {
    pub fn name(&self) -> &str {
        match self {
            CustomerRef::Existing { name, .. } | CustomerRef::Draft { name } => name,
        }
    }
}

/// No customer was picked and the name field is blank.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("Please select or enter a customer name")]
pub struct UnresolvedCustomer;

/// Free-text customer input plus the customer it is bound to, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerSelection {
    text: String,
    bound: Option<Customer>,
}

impl CustomerSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn bound(&self) -> Option<&Customer> {
        self.bound.as_ref()
    }

    /// Apply a keystroke. Returns `true` if the edit un-bound the customer.
    ///
    /// Un-binding happens here, before any search is scheduled, so that typing
    /// over a selected customer's name turns the field back into a new name.
    pub fn on_input(&mut self, text: impl Into<String>) -> bool {
        self.text = text.into();
        let diverged = self
            .bound
            .as_ref()
            .is_some_and(|customer| customer.name != self.text);
        if diverged {
            if let Some(customer) = self.bound.take() {
                tracing::debug!(customer_id = %customer.id, "customer unbound by typing");
            }
        }
        diverged
    }

    /// Bind to a picked customer; the text becomes the customer's name.
    pub fn select(&mut self, customer: Customer) {
        self.text = customer.name.clone();
        self.bound = Some(customer);
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.bound = None;
    }

    /// Decide what the submission should carry.
    pub fn resolve(&self) -> Result<CustomerRef, UnresolvedCustomer> {
        match &self.bound {
            Some(customer) if customer.name == self.text => Ok(CustomerRef::Existing {
                id: customer.id,
                name: customer.name.clone(),
            }),
            _ => {
                let name = self.text.trim();
                if name.is_empty() {
                    Err(UnresolvedCustomer)
                } else {
                    Ok(CustomerRef::Draft {
                        name: name.to_string(),
                    })
                }
            }
        }
    }
}
