//! Client error types.

use thiserror::Error;

use billbook_auth::AuthError;
use billbook_invoicing::{LedgerError, ValidationError};

#[derive(Debug, Error)]
pub enum ClientError {
    /// The draft failed a submit-time rule; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// HTTP request or response decoding failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend could not be reached.
    #[error("network error: {0}")]
    Network(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("an invoice is already being saved")]
    SubmitInProgress,

    #[error("export failed: {0}")]
    Export(String),
}

impl ClientError {
    /// `true` for failures the user can fix in the form before retrying.
    pub fn is_user_correctable(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Ledger(_))
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
