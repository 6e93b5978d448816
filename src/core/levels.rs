//! Level synthesis and artifact relocation.
//!
//! Turns one topic group into a fully-formed level: a generated index
//! document, the relocated module files with rewritten metadata, and the
//! level summary for the curriculum index. Relocation reads from the
//! staging directory (the detached original level) and writes into the
//! freshly created level directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::json;
use tokio::fs;
use tracing::{debug, info, warn};

use crate::domain::{LevelInfo, ModuleDoc, ModuleMeta};
use crate::tables;

use super::grouping::TopicGroup;

/// Generated slug for every per-level index document
pub const INDEX_SLUG: &str = "index";

/// Outcome of synthesizing one level
#[derive(Debug)]
pub struct SynthesizedLevel {
    /// Summary for the curriculum index
    pub info: LevelInfo,

    /// Ordered curriculum entries: generated index first, then modules
    pub modules: Vec<ModuleMeta>,

    /// Relocations as (old path, new path) candidates for the migration map
    pub relocations: Vec<(String, String)>,

    /// Human-readable warnings (missing staged files)
    pub warnings: Vec<String>,
}

/// Detach the original level directory so new level directories can be
/// created at overlapping path prefixes without clobbering unprocessed
/// input. Returns the staging path.
pub async fn stage_old_level(course_dir: &Path, old_level_slug: &str) -> Result<PathBuf> {
    let old_dir = course_dir.join(old_level_slug);
    let staging_dir = course_dir.join(format!("_staging_{}", old_level_slug));

    fs::rename(&old_dir, &staging_dir).await.with_context(|| {
        format!(
            "Failed to stage level directory {} -> {}",
            old_dir.display(),
            staging_dir.display()
        )
    })?;

    debug!(staging = %staging_dir.display(), "Staged original level directory");
    Ok(staging_dir)
}

/// Remove the staging directory after relocation.
///
/// Anything still in it was claimed by no topic group; the expected
/// leftover is exactly the discarded course-overview document.
pub async fn cleanup_staging(staging_dir: &Path) -> Result<Vec<String>> {
    let mut removed = Vec::new();
    let mut entries = fs::read_dir(staging_dir)
        .await
        .with_context(|| format!("Failed to list staging dir: {}", staging_dir.display()))?;

    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        info!(leftover = %name, "Removing leftover staged file");
        fs::remove_file(entry.path())
            .await
            .with_context(|| format!("Failed to remove leftover: {}", entry.path().display()))?;
        removed.push(name);
    }

    fs::remove_dir(staging_dir)
        .await
        .with_context(|| format!("Failed to remove staging dir: {}", staging_dir.display()))?;

    Ok(removed)
}

/// Build one level from the topic group at the given 0-based ordinal.
///
/// Creates the level directory, writes the generated index document,
/// moves each staged module file into place, and rewrites each moved
/// document's `level` and `order`. A module whose staged file is missing
/// is skipped with a warning; the rest of the level still builds.
pub async fn build_level(
    course_dir: &Path,
    course_id: &str,
    old_level_slug: &str,
    staging_dir: &Path,
    ordinal: usize,
    group: &TopicGroup,
) -> Result<SynthesizedLevel> {
    let level_num = (ordinal + 1) as u32;
    let level_slug = format!("level-{}", level_num);
    let level_dir = course_dir.join(&level_slug);

    fs::create_dir_all(&level_dir)
        .await
        .with_context(|| format!("Failed to create level dir: {}", level_dir.display()))?;

    let title = tables::level_title(&group.topic);
    let subtitle = tables::subtitle_for(&group.topic);
    let description = tables::description_for(&group.topic);
    let color = tables::color_for(ordinal).to_string();

    let index_meta = index_meta(&title, &description, &level_slug);
    let index_doc = ModuleDoc {
        meta: index_meta.clone(),
        blocks: vec![json!({
            "type": "markdown",
            "content": format!("## {}\n\n{}", group.topic, description),
        })],
        extra: serde_json::Map::new(),
    };
    index_doc.save(&level_dir.join("index.json")).await?;

    let mut modules = vec![index_meta];
    let mut relocations = Vec::new();
    let mut warnings = Vec::new();

    for (position, module) in group.modules.iter().enumerate() {
        let staged_path = staging_dir.join(format!("{}.json", module.slug));
        let new_path = level_dir.join(format!("{}.json", module.slug));

        if !staged_path.exists() {
            warn!(slug = %module.slug, path = %staged_path.display(), "Staged module file not found, skipping");
            warnings.push(format!("{} not found", staged_path.display()));
            continue;
        }

        let order = (position + 1) as u32; // 0 is the generated index
        move_file(&staged_path, &new_path).await?;

        let mut doc = ModuleDoc::load(&new_path).await?;
        doc.meta.level = level_slug.clone();
        doc.meta.order = order;
        doc.save(&new_path).await?;

        let old_path = format!("{}/{}/{}", course_id, old_level_slug, module.slug);
        let new_content_path = format!("{}/{}/{}", course_id, level_slug, module.slug);
        relocations.push((old_path, new_content_path));

        modules.push(module.relocated(&level_slug, order));
    }

    let module_count = (modules.len() - 1) as u32; // exclude the index
    let info = LevelInfo {
        level: level_num,
        title,
        subtitle,
        color,
        description,
        module_count,
    };

    Ok(SynthesizedLevel {
        info,
        modules,
        relocations,
        warnings,
    })
}

fn index_meta(title: &str, description: &str, level_slug: &str) -> ModuleMeta {
    ModuleMeta {
        title: title.to_string(),
        description: description.to_string(),
        level: level_slug.to_string(),
        slug: INDEX_SLUG.to_string(),
        order: 0,
        is_checkpoint: false,
        is_index: true,
        cfa_topic: None,
        extra: serde_json::Map::new(),
    }
}

/// Two-phase move: rename where possible, copy-then-delete across devices
async fn move_file(from: &Path, to: &Path) -> Result<()> {
    if fs::rename(from, to).await.is_ok() {
        return Ok(());
    }

    fs::copy(from, to)
        .await
        .with_context(|| format!("Failed to copy {} -> {}", from.display(), to.display()))?;
    fs::remove_file(from)
        .await
        .with_context(|| format!("Failed to remove staged file: {}", from.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn module(slug: &str, topic: &str) -> ModuleMeta {
        serde_json::from_value(json!({
            "title": slug,
            "level": "level-1",
            "slug": slug,
            "order": 0,
            "cfaTopic": topic,
        }))
        .unwrap()
    }

    async fn write_staged(staging_dir: &Path, slug: &str) {
        let doc = json!({
            "meta": {
                "title": slug,
                "level": "level-1",
                "slug": slug,
                "order": 0,
                "cfaTopic": "Economics",
            },
            "blocks": [{"type": "markdown", "content": "body"}],
        });
        fs::write(
            staging_dir.join(format!("{}.json", slug)),
            serde_json::to_string_pretty(&doc).unwrap(),
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_build_level_relocates_and_rewrites() {
        let tmp = TempDir::new().unwrap();
        let course_dir = tmp.path();
        let staging_dir = course_dir.join("_staging_level-1");
        fs::create_dir_all(&staging_dir).await.unwrap();
        write_staged(&staging_dir, "a").await;
        write_staged(&staging_dir, "b").await;

        let group = TopicGroup {
            topic: "Economics".to_string(),
            modules: vec![module("a", "Economics"), module("b", "Economics")],
        };

        let level = build_level(course_dir, "cfa-1", "level-1", &staging_dir, 1, &group)
            .await
            .unwrap();

        assert_eq!(level.info.level, 2);
        assert_eq!(level.info.module_count, 2);
        assert!(level.warnings.is_empty());

        // Index first, then modules renumbered from 1
        assert_eq!(level.modules[0].slug, INDEX_SLUG);
        assert_eq!(level.modules[0].order, 0);
        assert_eq!(level.modules[1].order, 1);
        assert_eq!(level.modules[2].order, 2);

        // Files moved out of staging and rewritten in place
        assert!(!staging_dir.join("a.json").exists());
        let moved = ModuleDoc::load(&course_dir.join("level-2").join("a.json"))
            .await
            .unwrap();
        assert_eq!(moved.meta.level, "level-2");
        assert_eq!(moved.meta.order, 1);
        assert_eq!(moved.blocks.len(), 1);

        assert_eq!(
            level.relocations,
            vec![
                ("cfa-1/level-1/a".to_string(), "cfa-1/level-2/a".to_string()),
                ("cfa-1/level-1/b".to_string(), "cfa-1/level-2/b".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_missing_staged_file_is_skipped() {
        let tmp = TempDir::new().unwrap();
        let staging_dir = tmp.path().join("_staging_level-1");
        fs::create_dir_all(&staging_dir).await.unwrap();
        write_staged(&staging_dir, "b").await;

        let group = TopicGroup {
            topic: "Economics".to_string(),
            modules: vec![module("a", "Economics"), module("b", "Economics")],
        };

        let level = build_level(tmp.path(), "cfa-1", "level-1", &staging_dir, 0, &group)
            .await
            .unwrap();

        assert_eq!(level.warnings.len(), 1);
        assert_eq!(level.info.module_count, 1);
        assert_eq!(level.relocations.len(), 1);

        // The survivor closes the gap: renumbering follows group position,
        // so the skipped module leaves its position unoccupied.
        assert_eq!(level.modules[1].slug, "b");
        assert_eq!(level.modules[1].order, 2);
    }

    #[tokio::test]
    async fn test_generated_index_document() {
        let tmp = TempDir::new().unwrap();
        let staging_dir = tmp.path().join("_staging_level-1");
        fs::create_dir_all(&staging_dir).await.unwrap();
        write_staged(&staging_dir, "m1").await;

        let group = TopicGroup {
            topic: "Mock Exam".to_string(),
            modules: vec![module("m1", "Mock Exam")],
        };

        let level = build_level(tmp.path(), "cfa-1", "level-1", &staging_dir, 0, &group)
            .await
            .unwrap();

        assert_eq!(level.info.title, "Mock Exams");

        let index = ModuleDoc::load(&tmp.path().join("level-1").join("index.json"))
            .await
            .unwrap();
        assert_eq!(index.meta.title, "Mock Exams");
        assert!(index.meta.is_index);
        assert_eq!(index.meta.order, 0);
        // Heading keeps the raw topic name
        assert_eq!(
            index.blocks[0]["content"].as_str().unwrap(),
            format!("## Mock Exam\n\n{}", tables::description_for("Mock Exam"))
        );
    }

    #[tokio::test]
    async fn test_stage_and_cleanup() {
        let tmp = TempDir::new().unwrap();
        let old_dir = tmp.path().join("level-1");
        fs::create_dir_all(&old_dir).await.unwrap();
        fs::write(old_dir.join("index.json"), "{}").await.unwrap();

        let staging = stage_old_level(tmp.path(), "level-1").await.unwrap();
        assert!(!old_dir.exists());
        assert!(staging.join("index.json").exists());

        let removed = cleanup_staging(&staging).await.unwrap();
        assert_eq!(removed, vec!["index.json".to_string()]);
        assert!(!staging.exists());
    }
}
