//! In-memory collaborators shared by the integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;

use billbook_auth::{AuthError, User};
use billbook_client::{
    AuthApi, ClientError, ClientResult, CustomerApi, InvoiceApi, InvoiceRenderer, LoginResponse,
    PagePlacement, PdfDocument, PdfWriter, RasterImage,
};
use billbook_core::{CustomerId, InvoiceId, UserId};
use billbook_invoicing::{Invoice, InvoiceSubmission, StatusFilter};
use billbook_parties::{Customer, NewCustomer};

pub fn customer(id: i64, name: &str) -> Customer {
    Customer::new(CustomerId::new(id), name)
}

// ---- customers ---------------------------------------------------------

#[derive(Default)]
pub struct FakeCustomers {
    pub customers: Vec<Customer>,
    delays: Mutex<HashMap<String, Duration>>,
    failing: Mutex<bool>,
    calls: Mutex<Vec<String>>,
}

impl FakeCustomers {
    pub fn with(customers: Vec<Customer>) -> Self {
        Self {
            customers,
            ..Self::default()
        }
    }

    /// Make searches for `query` take `delay` to answer.
    pub fn delay(&self, query: &str, delay: Duration) {
        self.delays.lock().unwrap().insert(query.to_string(), delay);
    }

    pub fn fail(&self) {
        *self.failing.lock().unwrap() = true;
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CustomerApi for FakeCustomers {
    async fn search(&self, query: &str) -> ClientResult<Vec<Customer>> {
        self.calls.lock().unwrap().push(query.to_string());
        let delay = self
            .delays
            .lock()
            .unwrap()
            .get(query)
            .copied()
            .unwrap_or(Duration::from_millis(10));
        tokio::time::sleep(delay).await;

        if *self.failing.lock().unwrap() {
            return Err(ClientError::Network("connection refused".into()));
        }
        let needle = query.to_lowercase();
        Ok(self
            .customers
            .iter()
            .filter(|c| c.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn list(&self) -> ClientResult<Vec<Customer>> {
        Ok(self.customers.clone())
    }

    async fn get(&self, id: CustomerId) -> ClientResult<Customer> {
        self.customers
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound(format!("customer {id}")))
    }

    async fn create(&self, customer: &NewCustomer) -> ClientResult<Customer> {
        Ok(Customer::new(CustomerId::new(999), customer.name.clone()))
    }
}

// ---- invoices ----------------------------------------------------------

pub fn invoice(id: i64, status: &str, customer: Option<(i64, &str)>) -> Invoice {
    let customer = customer.map(|(id, name)| json!({"id": id, "name": name}));
    serde_json::from_value(json!({
        "id": id,
        "invoice_id": format!("INV-{id:04}"),
        "order_id": format!("ORD-{id:04}"),
        "invoice_date": "2024-05-01",
        "ordered_date": "2024-04-28",
        "customer_id": 4,
        "customer": customer,
        "items": [
            {"item_name": "Cake", "quantity": 2, "unit_price": "10.00", "total_price": "20.00"}
        ],
        "subtotal": "20.00",
        "delivery_charge": "5.00",
        "grand_total": "25.00",
        "payment_method": "Cash",
        "payment_status": "Partially Paid",
        "advance_payment": "10.00",
        "balance_amount": "15.00",
        "delivery_type": "delivery",
        "delivery_date": "2024-05-02",
        "delivery_time": "09:05:00",
        "delivery_address": "Mannar Road, Puttalam",
        "status": status
    }))
    .unwrap()
}

#[derive(Default)]
pub struct FakeInvoices {
    invoices: Vec<Invoice>,
    create_delay: Duration,
    reject_with: Option<u16>,
    created: Mutex<Vec<InvoiceSubmission>>,
    deleted: Mutex<Vec<InvoiceId>>,
}

impl FakeInvoices {
    pub fn with(invoices: Vec<Invoice>) -> Self {
        Self {
            invoices,
            ..Self::default()
        }
    }

    /// Saves take `delay` to answer.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            create_delay: delay,
            ..Self::default()
        }
    }

    /// Saves fail with `status`.
    pub fn rejecting(status: u16) -> Self {
        Self {
            reject_with: Some(status),
            ..Self::default()
        }
    }

    pub fn created(&self) -> Vec<InvoiceSubmission> {
        self.created.lock().unwrap().clone()
    }

    pub fn deleted(&self) -> Vec<InvoiceId> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl InvoiceApi for FakeInvoices {
    async fn list(&self, filter: StatusFilter) -> ClientResult<Vec<Invoice>> {
        Ok(self
            .invoices
            .iter()
            .filter(|inv| filter.matches(inv.status))
            .cloned()
            .collect())
    }

    async fn get(&self, id: InvoiceId) -> ClientResult<Invoice> {
        self.invoices
            .iter()
            .find(|inv| inv.id == id)
            .cloned()
            .ok_or_else(|| ClientError::NotFound("No query results".into()))
    }

    async fn create(&self, submission: &InvoiceSubmission) -> ClientResult<Invoice> {
        tokio::time::sleep(self.create_delay).await;
        if let Some(status) = self.reject_with {
            return Err(ClientError::Api {
                status,
                body: "server error".into(),
            });
        }
        let mut created = self.created.lock().unwrap();
        created.push(submission.clone());
        Ok(invoice(created.len() as i64, submission.status.as_str(), Some((4, "Alex"))))
    }

    async fn update(&self, id: InvoiceId, submission: &InvoiceSubmission) -> ClientResult<Invoice> {
        Ok(invoice(id.get(), submission.status.as_str(), Some((4, "Alex"))))
    }

    async fn delete(&self, id: InvoiceId) -> ClientResult<()> {
        self.deleted.lock().unwrap().push(id);
        Ok(())
    }
}

// ---- auth --------------------------------------------------------------

pub const PASSWORD: &str = "secret";

pub fn owner() -> User {
    User {
        id: UserId::new(1),
        name: "Owner".into(),
        email: "owner@example.com".into(),
    }
}

#[derive(Default)]
pub struct FakeAuth {
    pub logout_fails: bool,
    pub logouts: AtomicUsize,
}

#[async_trait]
impl AuthApi for FakeAuth {
    async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        if email == owner().email && password == PASSWORD {
            Ok(LoginResponse {
                access_token: "tok-1".into(),
                user: owner(),
            })
        } else {
            Err(ClientError::Auth(AuthError::InvalidCredentials))
        }
    }

    async fn logout(&self, _token: &str) -> ClientResult<()> {
        self.logouts.fetch_add(1, Ordering::SeqCst);
        if self.logout_fails {
            Err(ClientError::Network("offline".into()))
        } else {
            Ok(())
        }
    }
}

// ---- rendering ---------------------------------------------------------

pub struct FakeRenderer {
    pub width_px: u32,
    pub height_px: u32,
}

#[async_trait]
impl InvoiceRenderer for FakeRenderer {
    async fn render_to_image(&self, _invoice: &Invoice) -> ClientResult<RasterImage> {
        Ok(RasterImage {
            width_px: self.width_px,
            height_px: self.height_px,
            bytes: b"JFIF".to_vec(),
        })
    }
}

#[derive(Default)]
pub struct FakePdf {
    pub placements: Mutex<Vec<PagePlacement>>,
}

impl PdfWriter for FakePdf {
    fn write_pdf(&self, _image: &RasterImage, placements: &[PagePlacement]) -> ClientResult<PdfDocument> {
        *self.placements.lock().unwrap() = placements.to_vec();
        Ok(PdfDocument {
            page_count: placements.len(),
            bytes: b"%PDF-1.7".to_vec(),
        })
    }
}
