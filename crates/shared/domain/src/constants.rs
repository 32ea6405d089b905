//! Names shared between the schema, the handlers and the `OpenAPI` document.

/// Table holding submitted contact messages.
pub const CONTACT: &str = "contact";
/// Table holding per-table identifier counters, keyed by the counted table's name.
pub const SEQUENCE: &str = "sequence";

/// HTTP resource path of the contacts collection.
pub const CONTACT_PATH: &str = "/api/contact";

/// `OpenAPI` tag for infrastructure routes.
pub const SYSTEM_TAG: &str = "System";
/// `OpenAPI` tag for the contacts resource.
pub const CONTACTS_TAG: &str = "Contacts";

/// Prefix of environment variables overriding file configuration.
pub const ENV_PREFIX: &str = "CDESK";
