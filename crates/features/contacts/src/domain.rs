//! Wire types of the `/api/contact` resource.

use crate::error::ContactError;
use cdesk_derive::api_model;

/// Validation message for a create or update body with a missing field.
pub const ALL_FIELDS_REQUIRED: &str = "All fields are required";
/// Validation message for a delete body without an identifier.
pub const ID_REQUIRED: &str = "ID is required";
/// Confirmation returned by a successful delete.
pub const DELETED_MESSAGE: &str = "Contact deleted successfully";

/// A persisted contact message.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct Contact {
    /// Identifier assigned by the store, starting at 1
    pub id: i64,
    /// Sender name
    pub name: String,
    /// Sender email, not format-checked
    pub email: String,
    /// Message body
    pub message: String,
}

impl Contact {
    #[must_use]
    pub fn new(id: i64, draft: ContactDraft) -> Self {
        Self { id, name: draft.name, email: draft.email, message: draft.message }
    }

    /// Field values without the identifier.
    #[must_use]
    pub fn draft(&self) -> ContactDraft {
        ContactDraft {
            name: self.name.clone(),
            email: self.email.clone(),
            message: self.message.clone(),
        }
    }
}

/// Contact fields without an identifier: a form draft, or a validated request body.
#[api_model]
#[derive(Default, Clone, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// `POST /api/contact` body.
#[api_model(deny_unknown_fields = false)]
#[derive(Default, Clone)]
pub struct CreateContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl CreateContactRequest {
    /// Checks that every field is present and non-empty.
    ///
    /// # Errors
    /// [`ContactError::Validation`] with [`ALL_FIELDS_REQUIRED`].
    pub fn into_draft(self) -> Result<ContactDraft, ContactError> {
        match (required(self.name), required(self.email), required(self.message)) {
            (Some(name), Some(email), Some(message)) => Ok(ContactDraft { name, email, message }),
            _ => Err(ContactError::validation(ALL_FIELDS_REQUIRED)),
        }
    }
}

impl From<&ContactDraft> for CreateContactRequest {
    fn from(draft: &ContactDraft) -> Self {
        Self {
            name: Some(draft.name.clone()),
            email: Some(draft.email.clone()),
            message: Some(draft.message.clone()),
        }
    }
}

/// `PUT /api/contact` body.
#[api_model(deny_unknown_fields = false)]
#[derive(Default, Clone)]
pub struct UpdateContactRequest {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl UpdateContactRequest {
    /// Checks that the identifier and every field are present and non-empty.
    ///
    /// # Errors
    /// [`ContactError::Validation`] with [`ALL_FIELDS_REQUIRED`].
    pub fn into_parts(self) -> Result<(i64, ContactDraft), ContactError> {
        let fields = (required(self.name), required(self.email), required(self.message));
        match (required_id(self.id), fields) {
            (Some(id), (Some(name), Some(email), Some(message))) => {
                Ok((id, ContactDraft { name, email, message }))
            }
            _ => Err(ContactError::validation(ALL_FIELDS_REQUIRED)),
        }
    }
}

impl From<&Contact> for UpdateContactRequest {
    fn from(contact: &Contact) -> Self {
        Self {
            id: Some(contact.id),
            name: Some(contact.name.clone()),
            email: Some(contact.email.clone()),
            message: Some(contact.message.clone()),
        }
    }
}

/// `DELETE /api/contact` body.
#[api_model(deny_unknown_fields = false)]
#[derive(Default, Clone)]
pub struct DeleteContactRequest {
    pub id: Option<i64>,
}

impl DeleteContactRequest {
    /// # Errors
    /// [`ContactError::Validation`] with [`ID_REQUIRED`].
    pub fn into_id(self) -> Result<i64, ContactError> {
        required_id(self.id).ok_or_else(|| ContactError::validation(ID_REQUIRED))
    }
}

/// Successful delete response.
#[api_model]
pub struct DeleteResponse {
    pub message: String,
}

/// Body of every 400 and 500 response.
#[api_model]
pub struct ErrorBody {
    pub error: String,
}

fn required(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

// Identifiers start at 1.
const fn required_id(id: Option<i64>) -> Option<i64> {
    match id {
        Some(0) | None => None,
        Some(id) => Some(id),
    }
}
