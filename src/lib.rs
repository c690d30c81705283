//! Rotation health status library.
//!
//! The health of a global rotation is one of `IN`, `OUT` or `UNKNOWN`.
//! This crate provides the status type with its wire names, a TOML status
//! document with validation and hot reload, and a lookup table over it.

pub mod config;
pub mod observability;
pub mod rotation;

pub use config::schema::RotationsConfig;
pub use rotation::{ParseRotationStatusError, RotationStatus, StatusTable};
