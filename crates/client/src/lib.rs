//! `billbook-client`
//!
//! Application layer of the invoicing app: wires the pure domain crates to
//! the backend and to the rendering engine.
//!
//! - [`api`]: collaborator traits, [`http`]: their REST implementation
//! - [`search`]: debounced, race-safe customer autocomplete
//! - [`form`] / [`submit`]: create-invoice flow with a duplicate-submit guard
//! - [`listing`]: invoice list and detail views
//! - [`export`]: PDF / image export
//! - [`auth`]: login / logout against a persisted [`billbook_auth::Session`]

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod export;
pub mod form;
pub mod http;
pub mod listing;
pub mod search;
pub mod submit;

pub use api::{
    AuthApi, CustomerApi, InvoiceApi, InvoiceRenderer, LoginResponse, PagePlacement, PdfDocument,
    PdfWriter, RasterImage,
};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use export::{ExportedFile, Exporter};
pub use form::InvoiceForm;
pub use http::HttpApi;
pub use listing::{InvoiceDetail, InvoiceRow};
pub use search::SearchController;
pub use submit::{InvoiceSubmitter, SubmitGate};
