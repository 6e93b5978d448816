//! Topic grouping engine.
//!
//! Partitions a course's original module list into ordered topic groups.
//! Group order is the order in which each topic is first seen scanning the
//! list top to bottom, and modules keep their relative order within a
//! group. No secondary sorting is applied anywhere; the original
//! pedagogical ordering is the ordering.

use thiserror::Error;

use crate::domain::ModuleMeta;

/// Fallback topic for modules with no topic attribute
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Structural defects detected while grouping
#[derive(Debug, Error)]
pub enum GroupingError {
    /// The same slug under two topics would collide in the migration map
    #[error("module slug '{slug}' appears under both '{first_topic}' and '{second_topic}'")]
    DuplicateSlug {
        slug: String,
        first_topic: String,
        second_topic: String,
    },
}

/// One topic and its ordered modules
#[derive(Debug, Clone)]
pub struct TopicGroup {
    pub topic: String,
    pub modules: Vec<ModuleMeta>,
}

impl TopicGroup {
    /// Total non-index modules in this group
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

/// Partition modules into topic groups, first-appearance ordered.
///
/// The course-overview record (`isIndex` with no topic) is dropped: every
/// new level gets its own generated index, so the old overview has no home
/// in the restructured course. Modules with no topic land under
/// [`UNCATEGORIZED`] rather than failing the run.
pub fn group_by_topic(modules: &[ModuleMeta]) -> Result<Vec<TopicGroup>, GroupingError> {
    let mut groups: Vec<TopicGroup> = Vec::new();

    for module in modules {
        if module.is_overview() {
            continue;
        }

        let topic = module
            .cfa_topic
            .clone()
            .unwrap_or_else(|| UNCATEGORIZED.to_string());

        // A slug reachable from two topics would produce two relocations
        // claiming the same staged file and the same migration key.
        for group in &groups {
            if group.topic != topic && group.modules.iter().any(|m| m.slug == module.slug) {
                return Err(GroupingError::DuplicateSlug {
                    slug: module.slug.clone(),
                    first_topic: group.topic.clone(),
                    second_topic: topic,
                });
            }
        }

        match groups.iter_mut().find(|g| g.topic == topic) {
            Some(group) => group.modules.push(module.clone()),
            None => groups.push(TopicGroup {
                topic,
                modules: vec![module.clone()],
            }),
        }
    }

    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(slug: &str, topic: Option<&str>, is_index: bool) -> ModuleMeta {
        let mut value = serde_json::json!({
            "title": slug,
            "level": "level-1",
            "slug": slug,
            "order": 0,
            "isIndex": is_index,
        });
        if let Some(topic) = topic {
            value["cfaTopic"] = serde_json::json!(topic);
        }
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_groups_by_first_appearance() {
        let modules = vec![
            module("a", Some("Economics"), false),
            module("b", Some("Ethics"), false),
            module("c", Some("Economics"), false),
        ];

        let groups = group_by_topic(&modules).unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].topic, "Economics");
        assert_eq!(groups[1].topic, "Ethics");

        let econ: Vec<&str> = groups[0].modules.iter().map(|m| m.slug.as_str()).collect();
        assert_eq!(econ, vec!["a", "c"]);
    }

    #[test]
    fn test_drops_course_overview() {
        let modules = vec![
            module("idx", None, true),
            module("a", Some("Economics"), false),
        ];

        let groups = group_by_topic(&modules).unwrap();

        assert_eq!(groups.len(), 1);
        assert!(groups[0].modules.iter().all(|m| m.slug != "idx"));
    }

    #[test]
    fn test_topicless_module_falls_back_to_uncategorized() {
        let modules = vec![
            module("a", Some("Economics"), false),
            module("b", None, false),
        ];

        let groups = group_by_topic(&modules).unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[1].topic, UNCATEGORIZED);
        assert_eq!(groups[1].modules[0].slug, "b");
    }

    #[test]
    fn test_index_with_topic_is_kept() {
        // A per-topic index page is a regular group member, not the overview
        let modules = vec![module("idx", Some("Economics"), true)];

        let groups = group_by_topic(&modules).unwrap();
        assert_eq!(groups[0].len(), 1);
    }

    #[test]
    fn test_duplicate_slug_across_topics_fails() {
        let modules = vec![
            module("a", Some("Economics"), false),
            module("a", Some("Ethics"), false),
        ];

        let err = group_by_topic(&modules).unwrap_err();
        assert!(matches!(err, GroupingError::DuplicateSlug { .. }));
    }

    #[test]
    fn test_duplicate_slug_within_topic_is_allowed_through() {
        // Same slug twice in one topic is the input's problem to have
        // meant; it does not collide in the migration map.
        let modules = vec![
            module("a", Some("Economics"), false),
            module("a", Some("Economics"), false),
        ];

        let groups = group_by_topic(&modules).unwrap();
        assert_eq!(groups[0].len(), 2);
    }
}
