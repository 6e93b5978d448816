//! topicsplit - topic-based course restructuring
//!
//! A one-shot batch transform that splits courses organized as a single
//! level with many modules into many levels with one topic each, while
//! keeping the curriculum index, the per-module content files, and the
//! external progress store consistent with each other.
//!
//! # Pipeline
//!
//! Per course, in order:
//! 1. Group the old level's modules by topic (first-appearance order)
//! 2. Detach the old level directory to a staging location
//! 3. Synthesize one level per topic and relocate its module files
//! 4. Rewrite the curriculum index wholesale
//! 5. Remove whatever the groups did not claim from staging
//!
//! Across courses, an old-path to new-path migration map accumulates and
//! is written once at the end so the progress store can re-key itself.
//!
//! # Modules
//!
//! - `tables`: static course, topic, and palette tables
//! - `domain`: data structures (ModuleMeta, LevelInfo, CurriculumIndex)
//! - `core`: grouping, level synthesis, rewriting, migration, orchestration
//! - `cli`: command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Preview the grouping
//! topicsplit plan --content ./content
//!
//! # Perform the restructure
//! topicsplit run --content ./content --migration-out ./migration.json
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod tables;

// Re-export main types at crate root for convenience
pub use core::{CourseReport, MigrationMap, Orchestrator, RunReport, TopicGroup};
pub use domain::{CurriculumIndex, LevelInfo, ModuleDoc, ModuleMeta};
pub use tables::CourseDescriptor;
