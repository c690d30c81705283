//! Health status of a global rotation.
//!
//! # Wire Format
//! ```text
//! IN       rotation is healthy and receives traffic
//! OUT      rotation is unhealthy or removed, no traffic
//! UNKNOWN  health cannot currently be determined
//! ```
//!
//! # Design Decisions
//! - The canonical names are a wire contract: serde, `Display` and `FromStr`
//!   all go through `as_str` / `parse`
//! - Decoding is exact and case-sensitive
//! - An unrecognized name is an error, never `Unknown`
//! - No ordering and no default are defined between variants

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Health status of a global rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum RotationStatus {
    /// Healthy and actively receiving traffic.
    In,
    /// Unhealthy or removed, not receiving traffic.
    Out,
    /// Health cannot currently be determined.
    Unknown,
}

impl RotationStatus {
    /// All variants, in declaration order.
    pub const ALL: [RotationStatus; 3] = [
        RotationStatus::In,
        RotationStatus::Out,
        RotationStatus::Unknown,
    ];

    /// Canonical wire name.
    pub const fn as_str(self) -> &'static str {
        match self {
            RotationStatus::In => "IN",
            RotationStatus::Out => "OUT",
            RotationStatus::Unknown => "UNKNOWN",
        }
    }

    /// Return true if the rotation should currently receive traffic.
    pub const fn receives_traffic(self) -> bool {
        matches!(self, RotationStatus::In)
    }
}

impl fmt::Display for RotationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when text is not one of the canonical status names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized rotation status '{input}', expected one of IN, OUT, UNKNOWN")]
pub struct ParseRotationStatusError {
    input: String,
}

impl ParseRotationStatusError {
    /// The rejected input.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl FromStr for RotationStatus {
    type Err = ParseRotationStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IN" => Ok(RotationStatus::In),
            "OUT" => Ok(RotationStatus::Out),
            "UNKNOWN" => Ok(RotationStatus::Unknown),
            other => Err(ParseRotationStatusError {
                input: other.to_string(),
            }),
        }
    }
}

impl TryFrom<&str> for RotationStatus {
    type Error = ParseRotationStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl TryFrom<String> for RotationStatus {
    type Error = ParseRotationStatusError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<RotationStatus> for &'static str {
    fn from(status: RotationStatus) -> Self {
        status.as_str()
    }
}
