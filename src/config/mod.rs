//! Rotation status document subsystem.
//!
//! # Data Flow
//! ```text
//! rotations.toml
//!     → loader.rs (parse & deserialize, status names decoded here)
//!     → validation.rs (semantic checks)
//!     → RotationsConfig (validated, immutable)
//!     → rotation::StatusTable
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new document
//!     → validation.rs validates
//!     → atomic swap of the shared StatusTable
//! ```
//!
//! # Design Decisions
//! - A document is immutable once loaded; changes require full reload
//! - All sections have defaults so an empty file is a valid document
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{ObservabilityConfig, RotationEntry, RotationsConfig};
pub use validation::ValidationError;
pub use watcher::{follow_updates, ConfigWatcher};
