//! Level summaries for the curriculum index.

use serde::{Deserialize, Serialize};

/// Summary of one topic-scoped level (camelCase on the wire)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelInfo {
    /// 1-based ordinal, assigned by first appearance of the topic
    pub level: u32,

    pub title: String,

    pub subtitle: String,

    /// Hex color assigned cyclically from the palette
    pub color: String,

    pub description: String,

    /// Number of non-index modules assigned to this level
    pub module_count: u32,
}

impl LevelInfo {
    /// Directory/key slug for this level
    pub fn slug(&self) -> String {
        format!("level-{}", self.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_slug() {
        let level = LevelInfo {
            level: 4,
            title: "Fixed Income".to_string(),
            subtitle: "Bond markets".to_string(),
            color: "#3b82f6".to_string(),
            description: "Bonds.".to_string(),
            module_count: 7,
        };
        assert_eq!(level.slug(), "level-4");
    }

    #[test]
    fn test_serializes_camel_case() {
        let level = LevelInfo {
            level: 1,
            title: "Economics".to_string(),
            subtitle: "s".to_string(),
            color: "#059669".to_string(),
            description: "d".to_string(),
            module_count: 2,
        };

        let value = serde_json::to_value(&level).unwrap();
        assert_eq!(value["moduleCount"], 2);
        assert!(value.get("module_count").is_none());
    }
}
