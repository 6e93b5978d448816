//! Orchestrator for the full restructuring run.
//!
//! Processes courses strictly in descriptor-table order: group the old
//! level's modules by topic, detach the old level directory, synthesize
//! one level per topic, rewrite the curriculum index, and clean up the
//! staging directory. Migration entries accumulate across courses and are
//! persisted once at the end of the run.
//!
//! File-system failures are fatal and propagate; this is a one-shot
//! administrative pass, and a bad run is recovered by re-deriving from a
//! clean copy of the content tree, not by automatic repair.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, instrument, warn};

use crate::domain::ModuleMeta;
use crate::tables::CourseDescriptor;

use super::grouping::{group_by_topic, TopicGroup};
use super::levels::{build_level, cleanup_staging, stage_old_level, SynthesizedLevel};
use super::migration::MigrationMap;
use super::rewriter::rewrite_curriculum;

/// Outcome of restructuring one course
#[derive(Debug)]
pub struct CourseReport {
    pub course: String,

    /// Modules listed under the old level key, overview included
    pub original_module_count: usize,

    /// Per-topic module counts, in level order
    pub topics: Vec<(String, usize)>,

    /// Module entries written to the new curriculum, indices included
    pub entry_count: usize,

    /// Staged files claimed by no group and removed during cleanup
    pub leftovers_removed: Vec<String>,

    /// Missing-file warnings surfaced during relocation
    pub warnings: Vec<String>,
}

impl CourseReport {
    pub fn topic_count(&self) -> usize {
        self.topics.len()
    }
}

/// Outcome of a full run across all courses
#[derive(Debug)]
pub struct RunReport {
    pub courses: Vec<CourseReport>,
    pub migration_entries: usize,
    pub migration_path: PathBuf,
}

/// Drives the restructure over a content tree
pub struct Orchestrator {
    content_dir: PathBuf,
}

impl Orchestrator {
    pub fn new(content_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
        }
    }

    /// Restructure every course and persist the consolidated migration map
    pub async fn run(
        &self,
        courses: &[CourseDescriptor],
        migration_out: &Path,
    ) -> Result<RunReport> {
        let mut reports = Vec::new();
        let mut migrations = MigrationMap::new();

        for course in courses {
            let (report, course_migrations) = self.process_course(course).await?;
            reports.push(report);
            migrations.merge(course_migrations)?;
        }

        migrations.save(migration_out).await?;
        info!(
            entries = migrations.len(),
            path = %migration_out.display(),
            "Wrote progress migration map"
        );

        Ok(RunReport {
            courses: reports,
            migration_entries: migrations.len(),
            migration_path: migration_out.to_path_buf(),
        })
    }

    /// Restructure a single course, returning its report and migrations
    #[instrument(skip(self), fields(course = course.id))]
    pub async fn process_course(
        &self,
        course: &CourseDescriptor,
    ) -> Result<(CourseReport, MigrationMap)> {
        let course_dir = self.content_dir.join(course.id);
        let curriculum_path = course_dir.join("curriculum.json");

        let (groups, original_count) = self.load_groups(course, &curriculum_path).await?;

        info!(
            topics = groups.len(),
            modules = original_count,
            "Grouped modules by topic"
        );

        let staging_dir = stage_old_level(&course_dir, course.old_level).await?;

        let mut levels: Vec<SynthesizedLevel> = Vec::new();
        let mut migrations = MigrationMap::new();
        let mut warnings = Vec::new();

        for (ordinal, group) in groups.iter().enumerate() {
            let level = build_level(
                &course_dir,
                course.id,
                course.old_level,
                &staging_dir,
                ordinal,
                group,
            )
            .await?;

            for (old_path, new_path) in &level.relocations {
                migrations.record(old_path.clone(), new_path.clone())?;
            }
            warnings.extend(level.warnings.iter().cloned());
            levels.push(level);
        }

        let index = rewrite_curriculum(&curriculum_path, &levels).await?;
        let leftovers_removed = cleanup_staging(&staging_dir).await?;

        if !warnings.is_empty() {
            warn!(count = warnings.len(), "Course finished with warnings");
        }

        let report = CourseReport {
            course: course.id.to_string(),
            original_module_count: original_count,
            topics: levels
                .iter()
                .zip(groups.iter())
                .map(|(level, group)| (group.topic.clone(), level.info.module_count as usize))
                .collect(),
            entry_count: index.module_entry_count(),
            leftovers_removed,
            warnings,
        };

        Ok((report, migrations))
    }

    /// Grouping preview for a course; reads the curriculum, touches nothing
    pub async fn plan_course(&self, course: &CourseDescriptor) -> Result<Vec<(String, usize)>> {
        let curriculum_path = self.content_dir.join(course.id).join("curriculum.json");
        let (groups, _) = self.load_groups(course, &curriculum_path).await?;

        Ok(groups
            .into_iter()
            .map(|g| (g.topic, g.modules.len()))
            .collect())
    }

    async fn load_groups(
        &self,
        course: &CourseDescriptor,
        curriculum_path: &Path,
    ) -> Result<(Vec<TopicGroup>, usize)> {
        let curriculum = crate::domain::CurriculumIndex::load(curriculum_path).await?;

        let old_modules: &[ModuleMeta] = curriculum
            .level_modules(course.old_level)
            .with_context(|| {
                format!(
                    "Curriculum for '{}' has no module list for level '{}'",
                    course.id, course.old_level
                )
            })?;

        let groups = group_by_topic(old_modules)
            .with_context(|| format!("Failed to group modules for '{}'", course.id))?;

        Ok((groups, old_modules.len()))
    }
}
