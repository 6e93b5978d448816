//! Domain types for the restructuring transform.
//!
//! This module contains the core data structures:
//! - ModuleMeta / ModuleDoc: one unit of learning content
//! - LevelInfo: a topic-scoped grouping of modules
//! - CurriculumIndex: the per-course index document

pub mod curriculum;
pub mod level;
pub mod module;

// Re-export commonly used types
pub use curriculum::CurriculumIndex;
pub use level::LevelInfo;
pub use module::{ModuleDoc, ModuleMeta};
