use crate::domain::{
    Contact, ContactDraft, CreateContactRequest, DeleteContactRequest, DeleteResponse, ErrorBody,
    UpdateContactRequest,
};
use crate::error::{ContactError, ContactErrorExt};
use cdesk_kernel::domain::constants::CONTACT_PATH;
use reqwest::header::ACCEPT;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::future::Future;

/// The four calls the page controller and the shell make against `/api/contact`.
pub trait ContactApi {
    fn list(&self) -> impl Future<Output = Result<Vec<Contact>, ContactError>> + Send;

    fn create(
        &self,
        draft: &ContactDraft,
    ) -> impl Future<Output = Result<Contact, ContactError>> + Send;

    fn update(&self, contact: &Contact) -> impl Future<Output = Result<Contact, ContactError>> + Send;

    /// Resolves to the server's confirmation message.
    fn delete(&self, id: i64) -> impl Future<Output = Result<String, ContactError>> + Send;
}

/// [`ContactApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpContactApi {
    client: Client,
    endpoint: String,
}

impl HttpContactApi {
    /// Targets `<base_url>/api/contact`.
    ///
    /// # Errors
    /// [`ContactError::Http`] if the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, ContactError> {
        let client = Client::builder().build().context("Building HTTP client")?;
        let endpoint = format!("{}{CONTACT_PATH}", base_url.trim_end_matches('/'));
        Ok(Self { client, endpoint })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ContactError> {
        let response = request
            .header(ACCEPT, "application/json")
            .send()
            .await
            .context("Sending request")?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await.context("Decoding response")?);
        }

        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status.canonical_reason().unwrap_or("Unknown error").to_owned(),
        };
        Err(ContactError::Rejected { status: status.as_u16(), message: message.into(), context: None })
    }
}

impl ContactApi for HttpContactApi {
    async fn list(&self) -> Result<Vec<Contact>, ContactError> {
        Self::send(self.client.get(&self.endpoint)).await.context("Listing contacts")
    }

    async fn create(&self, draft: &ContactDraft) -> Result<Contact, ContactError> {
        let body = CreateContactRequest::from(draft);
        Self::send(self.client.post(&self.endpoint).json(&body)).await.context("Creating contact")
    }

    async fn update(&self, contact: &Contact) -> Result<Contact, ContactError> {
        let body = UpdateContactRequest::from(contact);
        Self::send(self.client.put(&self.endpoint).json(&body)).await.context("Updating contact")
    }

    async fn delete(&self, id: i64) -> Result<String, ContactError> {
        let body = DeleteContactRequest { id: Some(id) };
        let response: DeleteResponse = Self::send(self.client.delete(&self.endpoint).json(&body))
            .await
            .context("Deleting contact")?;
        Ok(response.message)
    }
}
