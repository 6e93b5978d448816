//! Migration Map Integration Tests
//!
//! Full runs across multiple courses: the consolidated map is the union
//! of every course's relocations, written once, with globally unique keys
//! and no identity entries.

use std::collections::HashMap;
use std::path::Path;

use serde_json::json;
use tempfile::TempDir;
use tokio::fs;

use topicsplit::{CourseDescriptor, Orchestrator};

async fn write_course(
    content: &Path,
    course: &str,
    old_level: &str,
    rows: &[(&str, &str)], // (slug, topic)
) {
    let course_dir = content.join(course);
    let level_dir = course_dir.join(old_level);
    fs::create_dir_all(&level_dir).await.unwrap();

    let mut entries = Vec::new();
    for (order, (slug, topic)) in rows.iter().enumerate() {
        let meta = json!({
            "title": slug,
            "description": "test",
            "level": old_level,
            "slug": slug,
            "order": order,
            "cfaTopic": topic,
        });
        fs::write(
            level_dir.join(format!("{}.json", slug)),
            serde_json::to_string_pretty(&json!({"meta": meta, "blocks": []})).unwrap(),
        )
        .await
        .unwrap();
        entries.push(meta);
    }

    fs::write(
        course_dir.join("curriculum.json"),
        serde_json::to_string_pretty(&json!({"levels": [], "modules": {old_level: entries}}))
            .unwrap(),
    )
    .await
    .unwrap();
}

const COURSES: &[CourseDescriptor] = &[
    CourseDescriptor {
        id: "cfa-2",
        old_level: "level-2",
    },
    CourseDescriptor {
        id: "cfa-3",
        old_level: "level-3",
    },
];

#[tokio::test]
async fn test_run_writes_union_across_courses() {
    let tmp = TempDir::new().unwrap();
    let content = tmp.path().join("content");

    write_course(
        &content,
        "cfa-2",
        "level-2",
        &[("a", "Economics"), ("b", "Ethics"), ("c", "Economics")],
    )
    .await;
    write_course(&content, "cfa-3", "level-3", &[("a", "Asset Allocation")]).await;

    let migration_out = tmp.path().join("migration.json");
    let orchestrator = Orchestrator::new(&content);
    let report = orchestrator.run(COURSES, &migration_out).await.unwrap();

    assert_eq!(report.courses.len(), 2);
    assert_eq!(report.migration_path, migration_out);

    let raw = fs::read_to_string(&migration_out).await.unwrap();
    assert!(raw.ends_with('\n'));
    let map: HashMap<String, String> = serde_json::from_str(&raw).unwrap();

    // Same slug in both courses: keys stay distinct via the course prefix
    assert_eq!(map.get("cfa-2/level-2/a").unwrap(), "cfa-2/level-1/a");
    assert_eq!(map.get("cfa-3/level-3/a").unwrap(), "cfa-3/level-1/a");
    assert_eq!(report.migration_entries, map.len());

    // No entry maps a path to itself: cfa-2's Ethics group became the
    // new level-2, so b kept its path
    assert!(!map.contains_key("cfa-2/level-2/b"));
    for (old, new) in &map {
        assert_ne!(old, new);
    }
}

#[tokio::test]
async fn test_run_halts_on_missing_course() {
    let tmp = TempDir::new().unwrap();
    let content = tmp.path().join("content");

    // Only the first course exists; the second must abort the run
    write_course(&content, "cfa-2", "level-2", &[("a", "Economics")]).await;

    let migration_out = tmp.path().join("migration.json");
    let orchestrator = Orchestrator::new(&content);
    let result = orchestrator.run(COURSES, &migration_out).await;

    assert!(result.is_err());
    assert!(!migration_out.exists());
}

#[tokio::test]
async fn test_duplicate_slug_across_topics_fails_before_any_move() {
    let tmp = TempDir::new().unwrap();
    let content = tmp.path().join("content");

    write_course(
        &content,
        "cfa-2",
        "level-2",
        &[("a", "Economics"), ("a", "Ethics")],
    )
    .await;

    let course = CourseDescriptor {
        id: "cfa-2",
        old_level: "level-2",
    };
    let orchestrator = Orchestrator::new(&content);
    let result = orchestrator.process_course(&course).await;

    assert!(result.is_err());
    // Grouping fails before staging, so the tree is untouched
    assert!(content.join("cfa-2/level-2").exists());
    assert!(!content.join("cfa-2/_staging_level-2").exists());
}
