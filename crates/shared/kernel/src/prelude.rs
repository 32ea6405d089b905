//! Common imports for feature crates.

pub use crate::domain::constants::*;
pub use crate::domain::registry::{FeatureSlice, InitializedSlice};
pub use crate::safe_nanoid;

#[cfg(feature = "server")]
pub use crate::server::{ApiState, ApiStateError, ApiStateErrorExt};
