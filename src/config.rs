//! Configuration for topicsplit paths.
//!
//! Configuration sources (highest priority first):
//! 1. CLI flags
//! 2. Environment variables (TOPICSPLIT_CONTENT, TOPICSPLIT_MIGRATION_OUT)
//! 3. Config file (.topicsplit/config.yaml)
//! 4. Defaults (./content, ./cfa-level-migration.json)
//!
//! Config file discovery:
//! - Searches current directory and parents for .topicsplit/config.yaml
//! - Paths in config file are relative to the config file's parent directory

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// Content tree root (relative to config file)
    pub content: Option<String>,

    /// Migration map output file (relative to config file)
    pub migration_out: Option<String>,
}

/// Resolved configuration with absolute-ish paths
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Root of the content tree (one subdirectory per course)
    pub content: PathBuf,

    /// Where the consolidated migration map is written
    pub migration_out: PathBuf,

    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

impl ResolvedConfig {
    /// Resolve configuration, applying optional CLI overrides last
    pub fn resolve(
        content_override: Option<PathBuf>,
        migration_override: Option<PathBuf>,
    ) -> Result<Self> {
        let config_file = find_config_file();
        let file: ConfigFile = match &config_file {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config: {}", path.display()))?;
                serde_yaml::from_str(&raw)
                    .with_context(|| format!("Failed to parse config: {}", path.display()))?
            }
            None => ConfigFile::default(),
        };

        let config_dir = config_file
            .as_deref()
            .and_then(Path::parent)
            .and_then(Path::parent)
            .map(Path::to_path_buf);

        let content = content_override
            .or_else(|| std::env::var_os("TOPICSPLIT_CONTENT").map(PathBuf::from))
            .or_else(|| relative_to(&config_dir, file.paths.content.as_deref()))
            .unwrap_or_else(|| PathBuf::from("content"));

        let migration_out = migration_override
            .or_else(|| std::env::var_os("TOPICSPLIT_MIGRATION_OUT").map(PathBuf::from))
            .or_else(|| relative_to(&config_dir, file.paths.migration_out.as_deref()))
            .unwrap_or_else(|| PathBuf::from("cfa-level-migration.json"));

        Ok(Self {
            content,
            migration_out,
            config_file,
        })
    }
}

fn relative_to(base: &Option<PathBuf>, path: Option<&str>) -> Option<PathBuf> {
    let path = PathBuf::from(path?);
    match base {
        Some(base) if path.is_relative() => Some(base.join(path)),
        _ => Some(path),
    }
}

/// Find config file by searching current directory and parents
fn find_config_file() -> Option<PathBuf> {
    let mut current = std::env::current_dir().ok()?;

    loop {
        let config_path = current.join(".topicsplit").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}
