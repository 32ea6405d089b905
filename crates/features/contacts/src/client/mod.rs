//! Client side of the contacts slice: the HTTP API and the page controller.

mod api;
mod page;

pub use api::{ContactApi, HttpContactApi};
pub use page::{
    CONTACT_DELETED, CONTACT_UPDATED, ContactEntry, ContactPage, CreateOutcome, EMPTY_LIST,
    MESSAGE_SENT, Notice, NoticeLevel, PendingCreate,
};
