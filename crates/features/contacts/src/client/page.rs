use super::api::ContactApi;
use crate::domain::{Contact, ContactDraft};
use crate::error::ContactError;
use cdesk_kernel::safe_nanoid;
use std::collections::VecDeque;
use tracing::{debug, error};

/// Notice after a confirmed create.
pub const MESSAGE_SENT: &str = "Message sent!";
/// Notice after a confirmed update.
pub const CONTACT_UPDATED: &str = "Contact updated successfully!";
/// Notice after a confirmed delete.
pub const CONTACT_DELETED: &str = "Contact deleted successfully.";
/// Placeholder text for an empty list.
pub const EMPTY_LIST: &str = "No messages found";

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A non-blocking message for the embedding UI to show and discard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    fn success(text: &str) -> Self {
        Self { level: NoticeLevel::Success, text: text.to_owned() }
    }

    fn failure(prefix: &str, err: &ContactError) -> Self {
        let detail = match err {
            ContactError::Rejected { message, .. } => message.to_string(),
            other => other.to_string(),
        };
        Self { level: NoticeLevel::Error, text: format!("{prefix}: {detail}") }
    }
}

/// One row of the rendered list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContactEntry {
    Confirmed(Contact),
    /// Optimistic placeholder for a create still in flight, keyed by a client-side
    /// correlation id rather than by field values.
    Pending { correlation: String, draft: ContactDraft },
}

impl ContactEntry {
    /// Server identifier; `None` while pending.
    #[must_use]
    pub const fn id(&self) -> Option<i64> {
        match self {
            Self::Confirmed(contact) => Some(contact.id),
            Self::Pending { .. } => None,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Confirmed(contact) => &contact.name,
            Self::Pending { draft, .. } => &draft.name,
        }
    }

    #[must_use]
    pub fn email(&self) -> &str {
        match self {
            Self::Confirmed(contact) => &contact.email,
            Self::Pending { draft, .. } => &draft.email,
        }
    }

    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Confirmed(contact) => &contact.message,
            Self::Pending { draft, .. } => &draft.message,
        }
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }

    fn correlation(&self) -> Option<&str> {
        match self {
            Self::Pending { correlation, .. } => Some(correlation),
            Self::Confirmed(_) => None,
        }
    }
}

/// Handle of a create started with [`ContactPage::begin_create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCreate {
    pub correlation: String,
    pub draft: ContactDraft,
}

/// How a pending create ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    Confirmed(Contact),
    RolledBack,
}

/// View-state of the contact page.
///
/// Create is optimistic: a placeholder is listed before the server answers and either
/// confirmed in place or rolled back. Update and delete change the list only after the
/// server confirms.
#[derive(Debug)]
pub struct ContactPage<A> {
    api: A,
    contacts: Vec<ContactEntry>,
    form: ContactDraft,
    editing: Option<Contact>,
    is_submitting: bool,
    is_deleting: bool,
    delete_target: Option<i64>,
    notices: VecDeque<Notice>,
}

impl<A: ContactApi> ContactPage<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            contacts: Vec::new(),
            form: ContactDraft::default(),
            editing: None,
            is_submitting: false,
            is_deleting: false,
            delete_target: None,
            notices: VecDeque::new(),
        }
    }

    /// Loads the collection. On failure the error is logged and the list is left as is.
    pub async fn mount(&mut self) {
        match self.api.list().await {
            Ok(contacts) => {
                debug!(count = contacts.len(), "Contacts loaded");
                self.contacts = contacts.into_iter().map(ContactEntry::Confirmed).collect();
            }
            Err(e) => error!(error = %e, "Failed to fetch contacts"),
        }
    }

    /// Submits the form as a new contact.
    pub async fn submit(&mut self) -> CreateOutcome {
        let pending = self.begin_create();
        let result = self.api.create(&pending.draft).await;
        self.resolve_create(&pending.correlation, result)
    }

    /// Lists a placeholder for the current form and returns what must be sent.
    pub fn begin_create(&mut self) -> PendingCreate {
        let pending = PendingCreate { correlation: safe_nanoid!(), draft: self.form.clone() };
        self.contacts.push(ContactEntry::Pending {
            correlation: pending.correlation.clone(),
            draft: pending.draft.clone(),
        });
        self.is_submitting = true;
        pending
    }

    /// Confirms or rolls back the placeholder listed under `correlation`.
    ///
    /// The form is cleared only on success; a failed submission keeps it for a retry.
    pub fn resolve_create(
        &mut self,
        correlation: &str,
        result: Result<Contact, ContactError>,
    ) -> CreateOutcome {
        let position = self.contacts.iter().position(|e| e.correlation() == Some(correlation));

        let outcome = match (result, position) {
            (Ok(contact), Some(index)) => {
                self.contacts[index] = ContactEntry::Confirmed(contact.clone());
                self.form = ContactDraft::default();
                self.notices.push_back(Notice::success(MESSAGE_SENT));
                CreateOutcome::Confirmed(contact)
            }
            (Ok(contact), None) => {
                self.contacts.push(ContactEntry::Confirmed(contact.clone()));
                self.form = ContactDraft::default();
                self.notices.push_back(Notice::success(MESSAGE_SENT));
                CreateOutcome::Confirmed(contact)
            }
            (Err(e), position) => {
                if let Some(index) = position {
                    self.contacts.remove(index);
                }
                error!(error = %e, correlation, "Create failed, placeholder rolled back");
                self.notices.push_back(Notice::failure("Failed to send message", &e));
                CreateOutcome::RolledBack
            }
        };

        self.is_submitting = self.contacts.iter().any(ContactEntry::is_pending);
        outcome
    }

    /// Opens the delete confirmation for `id`.
    pub const fn request_delete(&mut self, id: i64) {
        self.delete_target = Some(id);
    }

    pub const fn cancel_delete(&mut self) {
        self.delete_target = None;
    }

    /// Deletes the confirmation target. The confirmation closes whatever the outcome.
    pub async fn confirm_delete(&mut self) {
        let Some(id) = self.delete_target else {
            return;
        };

        self.is_deleting = true;
        match self.api.delete(id).await {
            Ok(_) => {
                self.contacts.retain(|entry| entry.id() != Some(id));
                self.notices.push_back(Notice::success(CONTACT_DELETED));
            }
            Err(e) => {
                error!(error = %e, id, "Delete failed");
                self.notices.push_back(Notice::failure("Failed to delete contact", &e));
            }
        }
        self.is_deleting = false;
        self.delete_target = None;
    }

    /// Opens the edit form pre-filled with the confirmed contact `id`.
    ///
    /// Returns `false` when no confirmed entry has that identifier.
    pub fn request_edit(&mut self, id: i64) -> bool {
        let found = self.contacts.iter().find_map(|entry| match entry {
            ContactEntry::Confirmed(contact) if contact.id == id => Some(contact.clone()),
            _ => None,
        });
        let opened = found.is_some();
        self.editing = found;
        opened
    }

    /// Draft of the contact being edited; changes stay local until [`Self::save_edit`].
    pub const fn editing_mut(&mut self) -> Option<&mut Contact> {
        self.editing.as_mut()
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Sends the edit draft. On failure the edit form stays open.
    pub async fn save_edit(&mut self) {
        let Some(draft) = self.editing.clone() else {
            return;
        };

        self.is_submitting = true;
        match self.api.update(&draft).await {
            Ok(updated) => {
                for entry in &mut self.contacts {
                    if entry.id() == Some(updated.id) {
                        *entry = ContactEntry::Confirmed(updated.clone());
                    }
                }
                self.editing = None;
                self.notices.push_back(Notice::success(CONTACT_UPDATED));
            }
            Err(e) => {
                error!(error = %e, id = draft.id, "Update failed");
                self.notices.push_back(Notice::failure("Failed to update contact", &e));
            }
        }
        self.is_submitting = self.contacts.iter().any(ContactEntry::is_pending);
    }

    /// Hands queued notices to the caller.
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }

    pub fn form_mut(&mut self) -> &mut ContactDraft {
        &mut self.form
    }

    pub fn form(&self) -> &ContactDraft {
        &self.form
    }

    pub fn contacts(&self) -> &[ContactEntry] {
        &self.contacts
    }

    pub const fn editing(&self) -> Option<&Contact> {
        self.editing.as_ref()
    }

    pub const fn delete_target(&self) -> Option<i64> {
        self.delete_target
    }

    pub const fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub const fn is_deleting(&self) -> bool {
        self.is_deleting
    }

    pub const fn is_edit_open(&self) -> bool {
        self.editing.is_some()
    }

    pub const fn is_confirm_open(&self) -> bool {
        self.delete_target.is_some()
    }

    /// Text shown instead of the list when it is empty.
    pub fn empty_text(&self) -> Option<&'static str> {
        self.contacts.is_empty().then_some(EMPTY_LIST)
    }

    pub const fn submit_label(&self) -> &'static str {
        if self.is_submitting { "Sending..." } else { "Send Message" }
    }

    pub const fn save_label(&self) -> &'static str {
        if self.is_submitting { "Updating..." } else { "Save" }
    }

    pub const fn delete_label(&self) -> &'static str {
        if self.is_deleting { "Deleting..." } else { "Delete" }
    }
}
