//! Curriculum rewriter.
//!
//! Assembles the final per-course curriculum index from the synthesized
//! levels and replaces the original document wholesale. Only the `levels`
//! and `modules` nodes are produced; nothing from the old index is merged
//! in.

use std::path::Path;

use anyhow::Result;
use tracing::debug;

use crate::domain::CurriculumIndex;

use super::levels::SynthesizedLevel;

/// Build the new curriculum index from synthesized levels, in level order
pub fn assemble(levels: &[SynthesizedLevel]) -> CurriculumIndex {
    let mut index = CurriculumIndex::default();
    for level in levels {
        index.push_level(level.info.clone(), level.modules.clone());
    }
    index
}

/// Assemble and persist the curriculum index over the original document
pub async fn rewrite_curriculum(
    path: &Path,
    levels: &[SynthesizedLevel],
) -> Result<CurriculumIndex> {
    let index = assemble(levels);
    index.save(path).await?;

    debug!(
        path = %path.display(),
        levels = index.levels.len(),
        entries = index.module_entry_count(),
        "Rewrote curriculum index"
    );

    Ok(index)
}
