//! Restructuring logic.
//!
//! - `grouping`: partition a module list into ordered topic groups
//! - `levels`: synthesize levels and relocate module files
//! - `rewriter`: assemble and persist the new curriculum index
//! - `migration`: the cross-course old-path to new-path map
//! - `orchestrator`: the per-course pipeline and run driver

pub mod grouping;
pub mod levels;
pub mod migration;
pub mod orchestrator;
pub mod rewriter;

pub use grouping::{group_by_topic, GroupingError, TopicGroup};
pub use levels::{build_level, SynthesizedLevel};
pub use migration::{MigrationError, MigrationMap};
pub use orchestrator::{CourseReport, Orchestrator, RunReport};
