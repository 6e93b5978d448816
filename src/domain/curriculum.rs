//! The per-course curriculum index document.
//!
//! Holds the ordered level summaries and, keyed by level slug, the ordered
//! module list for each level. Level order is significant all the way down
//! to the JSON document, so the module lists are kept as ordered pairs and
//! serialized through a map adapter instead of a sorted map type.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

use super::level::LevelInfo;
use super::module::ModuleMeta;

/// Curriculum index for one course
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CurriculumIndex {
    /// Ordered level summaries
    pub levels: Vec<LevelInfo>,

    /// Per-level ordered module lists, in level order
    #[serde(with = "ordered_modules")]
    pub modules: Vec<(String, Vec<ModuleMeta>)>,
}

impl CurriculumIndex {
    /// Load a curriculum index from disk
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read curriculum: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse curriculum JSON: {}", path.display()))
    }

    /// Save the index, pretty-printed with a trailing newline
    pub async fn save(&self, path: &Path) -> Result<()> {
        let mut content = serde_json::to_string_pretty(self)?;
        content.push('\n');

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write curriculum: {}", path.display()))
    }

    /// Module list for a level slug, if present
    pub fn level_modules(&self, level_slug: &str) -> Option<&[ModuleMeta]> {
        self.modules
            .iter()
            .find(|(slug, _)| slug == level_slug)
            .map(|(_, modules)| modules.as_slice())
    }

    /// Append a level summary together with its module list
    pub fn push_level(&mut self, level: LevelInfo, modules: Vec<ModuleMeta>) {
        self.modules.push((level.slug(), modules));
        self.levels.push(level);
    }

    /// Total number of module entries across all levels, indices included
    pub fn module_entry_count(&self) -> usize {
        self.modules.iter().map(|(_, m)| m.len()).sum()
    }
}

/// Serde adapter: `Vec<(String, Vec<ModuleMeta>)>` as a JSON object, in order
mod ordered_modules {
    use std::fmt;

    use serde::de::{MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};

    use crate::domain::module::ModuleMeta;

    type Entries = Vec<(String, Vec<ModuleMeta>)>;

    pub fn serialize<S: Serializer>(entries: &Entries, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (slug, modules) in entries {
            map.serialize_entry(slug, modules)?;
        }
        map.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Entries, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = Entries;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of level slug to module list")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Entries, A::Error> {
                let mut entries = Entries::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry()? {
                    entries.push(entry);
                }
                Ok(entries)
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}
