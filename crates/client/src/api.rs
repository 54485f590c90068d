//! Collaborator interfaces.
//!
//! The domain crates never perform I/O. Everything that talks to the backend
//! or a rendering engine sits behind one of these traits so tests can plug in
//! in-memory fakes.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use billbook_auth::User;
use billbook_core::{CustomerId, InvoiceId};
use billbook_invoicing::{Invoice, InvoiceSubmission, StatusFilter};
use billbook_parties::{Customer, NewCustomer};

use crate::error::ClientResult;

/// Body returned by `POST /login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: User,
}

#[async_trait]
pub trait CustomerApi: Send + Sync {
    async fn search(&self, query: &str) -> ClientResult<Vec<Customer>>;
    async fn list(&self) -> ClientResult<Vec<Customer>>;
    async fn get(&self, id: CustomerId) -> ClientResult<Customer>;
    async fn create(&self, customer: &NewCustomer) -> ClientResult<Customer>;
}

#[async_trait]
pub trait InvoiceApi: Send + Sync {
    async fn list(&self, filter: StatusFilter) -> ClientResult<Vec<Invoice>>;
    async fn get(&self, id: InvoiceId) -> ClientResult<Invoice>;
    async fn create(&self, submission: &InvoiceSubmission) -> ClientResult<Invoice>;
    async fn update(&self, id: InvoiceId, submission: &InvoiceSubmission) -> ClientResult<Invoice>;
    async fn delete(&self, id: InvoiceId) -> ClientResult<()>;
}

#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a token. A 401 surfaces as
    /// [`AuthError::InvalidCredentials`](billbook_auth::AuthError::InvalidCredentials).
    async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse>;

    /// Invalidate `token` on the server.
    async fn logout(&self, token: &str) -> ClientResult<()>;
}

/// Encoded raster of a rendered invoice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub width_px: u32,
    pub height_px: u32,
    pub bytes: Vec<u8>,
}

/// Where one copy of the image goes on a PDF page, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagePlacement {
    pub page: usize,
    pub x_mm: f64,
    pub y_mm: f64,
    pub width_mm: f64,
    pub height_mm: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PdfDocument {
    pub page_count: usize,
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait InvoiceRenderer: Send + Sync {
    async fn render_to_image(&self, invoice: &Invoice) -> ClientResult<RasterImage>;
}

pub trait PdfWriter: Send + Sync {
    fn write_pdf(&self, image: &RasterImage, placements: &[PagePlacement]) -> ClientResult<PdfDocument>;
}
