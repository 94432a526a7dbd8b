//! Internal implementation for project module

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::fsutil;
use crate::paths;

/// Version of the NMT directory structure recorded in new configs
pub const NMT_STRUCTURE_VERSION: &str = "1.0.0";

/// Contents of nmt.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NmtConfig {
    pub project_name: String,
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    NMT_STRUCTURE_VERSION.to_string()
}

impl NmtConfig {
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            project_name: name.into(),
            version: default_version(),
        }
    }
}

pub fn is_flutter_project(path: &Path) -> bool {
    path.join(paths::PUBSPEC).is_file()
}

/// Directory name used as the project name
fn project_name(path: &Path) -> String {
    let absolute = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    absolute
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "project".to_string())
}

pub fn init(path: &Path) -> Result<NmtConfig> {
    let config = NmtConfig::with_name(project_name(path));
    save(path, &config)?;
    Ok(config)
}

pub fn load(path: &Path) -> Result<Option<NmtConfig>> {
    let config_path = paths::config_path(path);
    if !config_path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;
    let config = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", config_path.display()))?;
    Ok(Some(config))
}

pub fn save(path: &Path, config: &NmtConfig) -> Result<()> {
    let config_path = paths::config_path(path);
    let contents = serde_json::to_string_pretty(config)?;

    fsutil::write_atomic(&config_path, contents.as_bytes())
        .with_context(|| format!("Failed to write {}", config_path.display()))
}
