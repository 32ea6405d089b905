//! Facade crate for Contact Desk features and shared modules.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Add `cdesk` with the desired feature flags (`server`/`client`).
//! - Call `cdesk::init` (server) to build the feature slices and
//!   `cdesk::server::router::api_router` to mount their routes.

pub use cdesk_domain as domain;
pub use cdesk_kernel as kernel;

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        use cdesk_kernel::server::ApiState;
        pub use cdesk_kernel::server::router::system_router;
        use utoipa_axum::router::OpenApiRouter;

        /// Routes of every enabled feature slice, without the system routes.
        pub fn api_router() -> OpenApiRouter<ApiState> {
            OpenApiRouter::new().merge(cdesk_contacts::server::router())
        }
    }
}

/// Feature slices.
pub mod features {
    pub use cdesk_contacts as contacts;
}

/// Initialize all enabled features for server mode.
///
/// # Errors
/// Returns an error if any feature initialization fails.
#[cfg(feature = "server")]
pub fn init(
    database: &cdesk_database::Database,
) -> Result<Vec<domain::registry::InitializedSlice>, Box<dyn std::error::Error + Send + Sync>> {
    let slices = vec![features::contacts::init(database)?];
    Ok(slices)
}
