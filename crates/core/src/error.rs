//! Errors raised while parsing or checking shared primitives.

use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

/// Input that does not form a valid domain value.
///
/// Transport, storage and "record not found" failures are client concerns
/// and never show up here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Malformed or out-of-range input, e.g. an amount or a status filter.
    #[error("{0}")]
    Validation(String),

    /// Identifiers are positive integers assigned by the backend.
    #[error("invalid {kind}: {reason}")]
    InvalidId { kind: &'static str, reason: String },
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(kind: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidId {
            kind,
            reason: reason.into(),
        }
    }
}
