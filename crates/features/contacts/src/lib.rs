//! Contacts feature slice.
//!
//! * `server`: the `/api/contact` resource (list, create, update, delete) over the
//!   `contact` table, registered as the [`server::Contacts`] slice.
//! * `client`: [`client::HttpContactApi`] and the [`client::ContactPage`] controller that
//!   owns the in-memory list, form draft and optimistic create.
//!
//! [`domain`] holds the wire types both sides share.

pub mod domain;
mod error;

#[cfg(feature = "client")]
pub mod client;
#[cfg(feature = "server")]
pub mod server;

pub use error::{ContactError, ContactErrorExt};
#[cfg(feature = "server")]
pub use server::init;
