#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Attribute macros shared by every Contact Desk crate:
//!
//! * [`cdesk_error`] turns an enum into a `thiserror` error with context support.
//! * [`cdesk_slice`] turns a struct into a registrable feature slice handle.
//! * [`api_model`] and [`api_handler`] keep DTOs and Axum handlers consistent with `OpenAPI`.
//!
//! Doc examples are `ignore`d because the expansions reference crates this proc-macro
//! crate cannot depend on.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Defines a standard API data model.
///
/// # Injected Behaviors
///
/// * **Derives**: `Debug`, `Serialize` and `Deserialize` when missing.
/// * **`OpenAPI`**: `utoipa::ToSchema` when the consuming crate's `server` feature is enabled.
/// * **Serde Policy**: `rename_all = "camelCase"` and `deny_unknown_fields`, both overridable.
///
/// # Example
///
/// ```rust,ignore
/// use cdesk_derive::api_model;
///
/// #[api_model(deny_unknown_fields = false)]
/// pub struct DeleteContactRequest {
///     pub id: Option<i64>,
/// }
/// ```
#[proc_macro_attribute]
pub fn api_model(attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::api::expand_api_model(attr.into(), input).into()
}

/// Bridges an Axum handler with `OpenAPI` documentation.
///
/// Accepts the usual `utoipa::path` arguments and only emits the path attribute when the
/// consuming crate builds with its `server` feature.
///
/// # Example
///
/// ```rust,ignore
/// #[api_handler(
///     get,
///     path = "/api/contact",
///     responses((status = OK, body = [Contact])),
///     tag = CONTACTS_TAG,
/// )]
/// pub async fn list_contacts(State(state): State<ApiState>) -> Result<Json<Vec<Contact>>, ContactError> {
///     // ...
/// }
/// ```
#[proc_macro_attribute]
pub fn api_handler(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::api::expand_api_handler(args.into(), input).into()
}

/// Defines a domain-specific error enum.
///
/// # Generated Items
///
/// * `#[derive(Debug, thiserror::Error)]` when missing.
/// * `<ErrorName>Ext` trait with `.context(...)` for `Result<T, ErrorName>` and for
///   `Result<T, SourceError>` of every variant wrapping a source.
/// * `From<SourceError>` for variants with a `source` field (or `#[source]`/`#[from]`).
/// * `From<&'static str>` and `From<String>` when an `Internal` variant exists.
/// * A module-local `format_context` helper for the `#[error(...)]` strings.
///
/// # Requirements
///
/// Variants use named fields. Any variant with a source also carries
/// `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[cdesk_derive::cdesk_error]
/// pub enum StoreError {
///     #[error("Database error{}: {source}", format_context(.context))]
///     Database { source: surrealdb::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn load() -> Result<(), StoreError> {
///     query().context("Loading contacts")?;
///     Err("not implemented".into())
/// }
/// ```
#[proc_macro_attribute]
pub fn cdesk_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}

/// Defines a feature slice handle.
///
/// The annotated struct becomes `<Name>Inner`; `<Name>` is an `Arc` wrapper that derefs to
/// it and implements `cdesk_kernel::domain::registry::FeatureSlice`.
///
/// # Example
/// ```rust,ignore
/// #[cdesk_derive::cdesk_slice]
/// pub struct Contacts {
///     store: ContactStore,
/// }
///
/// let slice = Contacts::new(ContactsInner { store });
/// ```
#[proc_macro_attribute]
pub fn cdesk_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(item as ItemStruct);
    macros::slice::expand_slice(input).into()
}
