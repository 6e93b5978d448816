//! Module metadata and content documents.
//!
//! A module is one unit of learning content: a metadata block plus an
//! opaque list of content blocks. The transform only ever touches the
//! `level` and `order` fields of the metadata; everything else, including
//! fields this tool does not know about, must survive a rewrite (extra
//! fields are captured in a flattened map).

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::fs;

/// Metadata block of a content module (camelCase on the wire)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleMeta {
    pub title: String,

    #[serde(default)]
    pub description: String,

    /// Slug of the level this module belongs to
    pub level: String,

    /// Identifier unique within the level
    pub slug: String,

    pub order: u32,

    #[serde(default)]
    pub is_checkpoint: bool,

    #[serde(default)]
    pub is_index: bool,

    /// Topic label used as the grouping key; absent on the course overview
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cfa_topic: Option<String>,

    /// Fields this tool does not model (cfaLOS, isExamBank, ...) pass
    /// through the rewrite untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl ModuleMeta {
    /// Whether this is the course-overview record (index page with no topic)
    pub fn is_overview(&self) -> bool {
        self.is_index && self.cfa_topic.is_none()
    }

    /// Fully-qualified content path, as used by the progress store
    pub fn content_path(&self, course: &str) -> String {
        format!("{}/{}/{}", course, self.level, self.slug)
    }

    /// Copy of this entry re-homed to a new level and position
    pub fn relocated(&self, level_slug: &str, order: u32) -> Self {
        let mut meta = self.clone();
        meta.level = level_slug.to_string();
        meta.order = order;
        meta
    }
}

/// On-disk content document: metadata plus an opaque body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleDoc {
    pub meta: ModuleMeta,

    /// Content blocks are never inspected, only carried along
    #[serde(default)]
    pub blocks: Vec<Value>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl ModuleDoc {
    /// Load a content document from disk
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read module: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse module JSON: {}", path.display()))
    }

    /// Save the document, pretty-printed with a trailing newline
    pub async fn save(&self, path: &Path) -> Result<()> {
        let mut content = serde_json::to_string_pretty(self)?;
        content.push('\n');

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write module: {}", path.display()))
    }
}
