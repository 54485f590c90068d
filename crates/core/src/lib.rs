//! `billbook-core`: shared domain primitives.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identifiers, money, and the shared domain error.

pub mod error;
pub mod id;
pub mod money;

pub use error::{DomainError, DomainResult};
pub use id::{CustomerId, InvoiceId, UserId};
pub use money::Money;
