//! Server side of the contacts slice.

mod handlers;
mod store;

pub use store::{ContactSession, ContactStore};

use crate::error::ContactError;
use cdesk_database::Database;
use cdesk_kernel::prelude::*;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Contacts feature state.
#[cdesk_derive::cdesk_slice]
pub struct Contacts {
    store: ContactStore,
}

impl Contacts {
    /// The store handle; each request opens its own session from it.
    #[must_use]
    pub fn store(&self) -> &ContactStore {
        &self.inner.store
    }
}

/// Initialize the contacts feature over an established database handle.
///
/// # Errors
/// Currently infallible; kept fallible like every slice initializer.
pub fn init(database: &Database) -> Result<InitializedSlice, ContactError> {
    tracing::info!(
        namespace = database.namespace(),
        database = database.database(),
        "Contacts slice initialized"
    );

    let slice = Contacts::new(ContactsInner { store: ContactStore::new(database.clone()) });
    Ok(InitializedSlice::new(slice))
}

/// `/api/contact` routes (GET, POST, PUT, DELETE).
pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new().routes(routes!(
        handlers::list_contacts,
        handlers::create_contact,
        handlers::update_contact,
        handlers::delete_contact
    ))
}
