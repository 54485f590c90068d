//! REST adapter over `reqwest`.

use std::sync::RwLock;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use billbook_auth::AuthError;
use billbook_core::{CustomerId, InvoiceId};
use billbook_invoicing::{Invoice, InvoiceSubmission, StatusFilter};
use billbook_parties::{Customer, NewCustomer};

use crate::api::{AuthApi, CustomerApi, InvoiceApi, LoginResponse};
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

#[derive(Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// Implements the customer, invoice and auth endpoints of the backend.
#[derive(Debug)]
pub struct HttpApi {
    client: Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl HttpApi {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder().timeout(config.http_timeout).build()?;
        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
            token: RwLock::new(None),
        })
    }

    pub fn with_token(self, token: Option<&str>) -> Self {
        self.set_token(token.map(str::to_string));
        self
    }

    /// Replace the bearer token sent with every request.
    pub fn set_token(&self, token: Option<String>) {
        *self.token.write().unwrap_or_else(|poisoned| poisoned.into_inner()) = token;
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        let token = self
            .token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone();
        match token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn dispatch(&self, req: RequestBuilder) -> ClientResult<Response> {
        self.authorize(req)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))
    }

    async fn fetch<T: DeserializeOwned>(&self, req: RequestBuilder) -> ClientResult<T> {
        let resp = check(self.dispatch(req).await?, AuthError::NotAuthenticated).await?;
        Ok(resp.json().await?)
    }

    async fn execute(&self, req: RequestBuilder) -> ClientResult<()> {
        check(self.dispatch(req).await?, AuthError::NotAuthenticated).await?;
        Ok(())
    }
}

/// Map non-success statuses onto the client error taxonomy. `unauthorized`
/// is what a 401 means for this particular call.
async fn check(resp: Response, unauthorized: AuthError) -> ClientResult<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let body = resp.text().await.unwrap_or_default();
    tracing::debug!(status = status.as_u16(), %body, "backend returned an error");

    Err(match status {
        StatusCode::UNAUTHORIZED => ClientError::Auth(unauthorized),
        StatusCode::NOT_FOUND => ClientError::NotFound(body),
        _ => ClientError::Api {
            status: status.as_u16(),
            body,
        },
    })
}

#[async_trait]
impl CustomerApi for HttpApi {
    async fn search(&self, query: &str) -> ClientResult<Vec<Customer>> {
        self.fetch(self.client.get(self.url("customers/search")).query(&[("q", query)]))
            .await
    }

    async fn list(&self) -> ClientResult<Vec<Customer>> {
        self.fetch(self.client.get(self.url("customers"))).await
    }

    async fn get(&self, id: CustomerId) -> ClientResult<Customer> {
        self.fetch(self.client.get(self.url(&format!("customers/{id}")))).await
    }

    async fn create(&self, customer: &NewCustomer) -> ClientResult<Customer> {
        self.fetch(self.client.post(self.url("customers")).json(customer))
            .await
    }
}

#[async_trait]
impl InvoiceApi for HttpApi {
    async fn list(&self, filter: StatusFilter) -> ClientResult<Vec<Invoice>> {
        let mut req = self.client.get(self.url("invoices"));
        if let Some(status) = filter.as_query() {
            req = req.query(&[("status", status)]);
        }
        self.fetch(req).await
    }

    async fn get(&self, id: InvoiceId) -> ClientResult<Invoice> {
        self.fetch(self.client.get(self.url(&format!("invoices/{id}")))).await
    }

    async fn create(&self, submission: &InvoiceSubmission) -> ClientResult<Invoice> {
        self.fetch(self.client.post(self.url("invoices")).json(submission))
            .await
    }

    async fn update(&self, id: InvoiceId, submission: &InvoiceSubmission) -> ClientResult<Invoice> {
        self.fetch(
            self.client
                .put(self.url(&format!("invoices/{id}")))
                .json(submission),
        )
        .await
    }

    async fn delete(&self, id: InvoiceId) -> ClientResult<()> {
        self.execute(self.client.delete(self.url(&format!("invoices/{id}"))))
            .await
    }
}

#[async_trait]
impl AuthApi for HttpApi {
    async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let req = self
            .client
            .post(self.url("login"))
            .json(&Credentials { email, password });
        let resp = req
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        let resp = check(resp, AuthError::InvalidCredentials).await?;
        Ok(resp.json().await?)
    }

    async fn logout(&self, token: &str) -> ClientResult<()> {
        let resp = self
            .client
            .post(self.url("logout"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        check(resp, AuthError::NotAuthenticated).await?;
        Ok(())
    }
}
