//! Rotation health status.
//!
//! # Data Flow
//! ```text
//! canonical name ("IN" / "OUT" / "UNKNOWN")
//!     → status.rs (decode, rejects anything else)
//!     → table.rs (name → status lookup)
//!     → consumers (CLI, routing decisions outside this crate)
//! ```
//!
//! # Design Decisions
//! - Status is a plain `Copy` enum, freely shared across threads
//! - This crate never computes health, it only carries declared statuses

pub mod status;
pub mod table;

pub use status::{ParseRotationStatusError, RotationStatus};
pub use table::{diff, SharedStatusTable, StatusChange, StatusTable};
