//! Rotation status lookup.
//!
//! # Responsibilities
//! - Map declared rotation names to their status
//! - Compare two tables to find what changed
//! - Publish reloaded tables to concurrent readers
//!
//! # Design Decisions
//! - Tables are immutable; a reload builds a new table and swaps it in
//! - An undeclared rotation is `None`, never `Unknown`
//! - Iteration is in name order so output and diffs are deterministic

use std::collections::BTreeMap;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::config::schema::{RotationEntry, RotationsConfig};
use crate::rotation::RotationStatus;

/// Immutable map from rotation name to declared status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusTable {
    entries: BTreeMap<String, RotationStatus>,
}

impl StatusTable {
    /// Build a table from a validated document.
    pub fn from_config(config: &RotationsConfig) -> Self {
        Self::from_entries(config.rotations.iter().cloned())
    }

    /// Build a table from entries. A later entry for the same name wins.
    pub fn from_entries(entries: impl IntoIterator<Item = RotationEntry>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|entry| (entry.name, entry.status))
                .collect(),
        }
    }

    /// Declared status of `rotation`, or `None` if it is not declared.
    pub fn status_of(&self, rotation: &str) -> Option<RotationStatus> {
        self.entries.get(rotation).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, status)` in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, RotationStatus)> + '_ {
        self.entries
            .iter()
            .map(|(name, status)| (name.as_str(), *status))
    }

    /// Number of rotations declared with `status`.
    pub fn count(&self, status: RotationStatus) -> usize {
        self.entries.values().filter(|s| **s == status).count()
    }

    /// Entries in name order, for serialization.
    pub fn to_entries(&self) -> Vec<RotationEntry> {
        self.iter()
            .map(|(name, status)| RotationEntry::new(name, status))
            .collect()
    }

    /// One `name<TAB>STATUS` line per rotation, in name order.
    pub fn render_text(&self) -> String {
        self.iter()
            .map(|(name, status)| format!("{}\t{}\n", name, status))
            .collect()
    }

    /// Pretty JSON array of `{"name", "status"}` objects, in name order.
    pub fn render_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.to_entries())
    }
}

/// One difference between two status tables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub rotation: String,
    /// `None` when the rotation was added.
    pub previous: Option<RotationStatus>,
    /// `None` when the rotation was removed.
    pub current: Option<RotationStatus>,
}

/// Changes from `old` to `new`, in name order. Unchanged rotations are omitted.
pub fn diff(old: &StatusTable, new: &StatusTable) -> Vec<StatusChange> {
    let mut names: Vec<&String> = old.entries.keys().chain(new.entries.keys()).collect();
    names.sort();
    names.dedup();

    names
        .into_iter()
        .filter_map(|name| {
            let previous = old.status_of(name);
            let current = new.status_of(name);
            (previous != current).then(|| StatusChange {
                rotation: name.clone(),
                previous,
                current,
            })
        })
        .collect()
}

/// A status table shared between a reloader and any number of readers.
#[derive(Debug)]
pub struct SharedStatusTable {
    inner: ArcSwap<StatusTable>,
}

impl SharedStatusTable {
    pub fn new(table: StatusTable) -> Self {
        Self {
            inner: ArcSwap::from_pointee(table),
        }
    }

    /// Current snapshot.
    pub fn load(&self) -> Arc<StatusTable> {
        self.inner.load_full()
    }

    /// Swap in `table` and return what changed. Each change is logged.
    pub fn replace(&self, table: StatusTable) -> Vec<StatusChange> {
        let current = Arc::new(table);
        let previous = self.inner.swap(Arc::clone(&current));
        let changes = diff(&previous, &current);

        for change in &changes {
            tracing::info!(
                rotation = %change.rotation,
                previous = change.previous.map_or("-", RotationStatus::as_str),
                current = change.current.map_or("-", RotationStatus::as_str),
                "Rotation status changed"
            );
        }

        changes
    }
}

impl Default for SharedStatusTable {
    fn default() -> Self {
        Self::new(StatusTable::default())
    }
}
