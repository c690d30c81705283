//! Configuration schema definitions.
//!
//! This module defines the rotation status document.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::rotation::RotationStatus;

/// Root of a rotation status document.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct RotationsConfig {
    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Declared rotations with their current status.
    pub rotations: Vec<RotationEntry>,
}

/// A single declared rotation.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RotationEntry {
    /// Rotation name (e.g., "rotation-fin1").
    pub name: String,

    /// Declared health status, using the canonical names.
    pub status: RotationStatus,
}

impl RotationEntry {
    pub fn new(name: impl Into<String>, status: RotationStatus) -> Self {
        Self {
            name: name.into(),
            status,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
