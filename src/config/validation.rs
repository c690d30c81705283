//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic, including status names)
//! - Reject empty rotation names
//! - Reject rotations declared more than once
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: RotationsConfig → Result<(), Vec<ValidationError>>
//! - Runs before a document is accepted into the system

use std::collections::HashMap;

use thiserror::Error;

use crate::config::schema::RotationsConfig;

/// A semantic problem in a rotation status document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Rotation name is empty or whitespace only.
    #[error("rotation #{index} has an empty name")]
    EmptyName { index: usize },

    /// Same rotation declared more than once.
    #[error("rotation '{name}' is declared {count} times")]
    DuplicateName { name: String, count: usize },
}

/// Validate a parsed document.
pub fn validate_config(config: &RotationsConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut counts: HashMap<&str, usize> = HashMap::new();
    // first-seen order so duplicates are reported deterministically
    let mut order = Vec::new();

    for (index, entry) in config.rotations.iter().enumerate() {
        if entry.name.trim().is_empty() {
            errors.push(ValidationError::EmptyName { index });
            continue;
        }
        let count = counts.entry(entry.name.as_str()).or_insert(0);
        if *count == 0 {
            order.push(entry.name.as_str());
        }
        *count += 1;
    }

    for name in order {
        let count = counts[name];
        if count > 1 {
            errors.push(ValidationError::DuplicateName {
                name: name.to_string(),
                count,
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
