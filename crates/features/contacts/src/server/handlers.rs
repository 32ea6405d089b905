use super::Contacts;
use crate::domain::{
    Contact, CreateContactRequest, DELETED_MESSAGE, DeleteContactRequest, DeleteResponse,
    ErrorBody, UpdateContactRequest,
};
use crate::error::ContactError;
use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use cdesk_derive::api_handler;
use cdesk_kernel::prelude::*;
use tracing::{debug, info};

type Payload<T> = Result<Json<T>, JsonRejection>;

#[api_handler(
    get,
    path = "/api/contact",
    responses(
        (status = OK, description = "All contacts in identifier order", body = [Contact]),
        (status = INTERNAL_SERVER_ERROR, description = "Store failure", body = ErrorBody),
    ),
    tag = CONTACTS_TAG,
)]
pub(super) async fn list_contacts(
    State(state): State<ApiState>,
) -> Result<Json<Vec<Contact>>, ContactError> {
    let store = state.try_get_slice::<Contacts>()?.store().session();
    let contacts = store.find_all().await?;
    debug!(count = contacts.len(), "Listed contacts");
    Ok(Json(contacts))
}

#[api_handler(
    post,
    path = "/api/contact",
    request_body = CreateContactRequest,
    responses(
        (status = OK, description = "Created contact with its identifier", body = Contact),
        (status = BAD_REQUEST, description = "A field is missing or empty", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Store failure", body = ErrorBody),
    ),
    tag = CONTACTS_TAG,
)]
pub(super) async fn create_contact(
    State(state): State<ApiState>,
    payload: Payload<CreateContactRequest>,
) -> Result<Json<Contact>, ContactError> {
    let store = state.try_get_slice::<Contacts>()?.store().session();
    let Json(request) = payload?;
    let contact = store.create(request.into_draft()?).await?;
    info!(id = contact.id, "Contact created");
    Ok(Json(contact))
}

#[api_handler(
    put,
    path = "/api/contact",
    request_body = UpdateContactRequest,
    responses(
        (status = OK, description = "Updated contact", body = Contact),
        (status = BAD_REQUEST, description = "Identifier or a field is missing", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Unknown identifier or store failure", body = ErrorBody),
    ),
    tag = CONTACTS_TAG,
)]
pub(super) async fn update_contact(
    State(state): State<ApiState>,
    payload: Payload<UpdateContactRequest>,
) -> Result<Json<Contact>, ContactError> {
    let store = state.try_get_slice::<Contacts>()?.store().session();
    let Json(request) = payload?;
    let (id, draft) = request.into_parts()?;
    let contact = store.update_by_id(id, draft).await?;
    info!(id, "Contact updated");
    Ok(Json(contact))
}

#[api_handler(
    delete,
    path = "/api/contact",
    request_body = DeleteContactRequest,
    responses(
        (status = OK, description = "Contact removed", body = DeleteResponse),
        (status = BAD_REQUEST, description = "Identifier is missing", body = ErrorBody),
        (status = INTERNAL_SERVER_ERROR, description = "Unknown identifier or store failure", body = ErrorBody),
    ),
    tag = CONTACTS_TAG,
)]
pub(super) async fn delete_contact(
    State(state): State<ApiState>,
    payload: Payload<DeleteContactRequest>,
) -> Result<Json<DeleteResponse>, ContactError> {
    let store = state.try_get_slice::<Contacts>()?.store().session();
    let Json(request) = payload?;
    let id = request.into_id()?;
    store.delete_by_id(id).await?;
    info!(id, "Contact deleted");
    Ok(Json(DeleteResponse { message: DELETED_MESSAGE.to_owned() }))
}
