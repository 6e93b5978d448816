//! Migration map for the external progress store.
//!
//! The progress store keys learner progress by content path
//! (`course/level/slug`). After relocation those paths are stale, so the
//! run accumulates an old-path to new-path map and persists it once, as a
//! single document, for the store to consume. Entries keep insertion order
//! (course order, then module order) and keys must be unique across the
//! whole run.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Serialize, Serializer};
use thiserror::Error;
use tokio::fs;

/// Map construction defects
#[derive(Debug, Error)]
pub enum MigrationError {
    /// Two relocations claimed the same old path
    #[error("duplicate migration key '{key}' (already maps to '{existing}')")]
    DuplicateKey { key: String, existing: String },
}

/// Accumulating old-path to new-path map, insertion ordered
#[derive(Debug, Clone, Default)]
pub struct MigrationMap {
    entries: Vec<(String, String)>,
}

impl MigrationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a relocation. Identity moves are dropped; duplicate old
    /// paths are a structural error.
    pub fn record(&mut self, old_path: String, new_path: String) -> Result<(), MigrationError> {
        if old_path == new_path {
            return Ok(());
        }

        if let Some((_, existing)) = self.entries.iter().find(|(key, _)| *key == old_path) {
            return Err(MigrationError::DuplicateKey {
                key: old_path,
                existing: existing.clone(),
            });
        }

        self.entries.push((old_path, new_path));
        Ok(())
    }

    /// Absorb another course's entries, preserving their order
    pub fn merge(&mut self, other: MigrationMap) -> Result<(), MigrationError> {
        for (old_path, new_path) in other.entries {
            self.record(old_path, new_path)?;
        }
        Ok(())
    }

    pub fn get(&self, old_path: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| key == old_path)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Persist the consolidated map, pretty-printed with a trailing newline
    pub async fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create migration map directory: {}", parent.display())
            })?;
        }

        let mut content = serde_json::to_string_pretty(self)?;
        content.push('\n');

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write migration map: {}", path.display()))
    }
}

impl Serialize for MigrationMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (old_path, new_path) in &self.entries {
            map.serialize_entry(old_path, new_path)?;
        }
        map.end()
    }
}
