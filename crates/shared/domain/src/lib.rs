//! # Domain Models
//!
//! Pure configuration and registry types shared by every Contact Desk crate.
//! Keep it lean: `serde` only, no I/O or networking.

pub mod config;
pub mod constants;
pub mod registry;
