use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use svgsync_editor::SyncOptions;
use svgsync_parser::ScanOptions;

pub const DEFAULT_CONFIG_NAME: &str = "svgsync.config.json";

/// svgsync configuration file format
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Highlight and reveal behaviour of the sync session
    #[serde(default)]
    pub sync: SyncOptions,

    /// Report the root `<svg>` element as a selectable element
    #[serde(default)]
    pub include_root: bool,
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = Self::path_in(cwd);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content).map_err(|e| {
                anyhow::anyhow!("Invalid {}: {}", config_path.display(), e)
            })?;
            tracing::debug!(path = %config_path.display(), "Loaded config");
            Ok(config)
        } else {
            // Return default config if none exists
            Ok(Config::default())
        }
    }

    pub fn path_in(cwd: &Path) -> PathBuf {
        cwd.join(DEFAULT_CONFIG_NAME)
    }

    /// Scanner options for one document
    pub fn scan_options(&self, document: &Path) -> ScanOptions {
        ScanOptions {
            include_root: self.include_root,
            path: document.display().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use svgsync_editor::RevealMode;
    use tempfile::TempDir;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "sync": {
                "highlight": { "className": "hl", "wholeLine": true },
                "reveal": "centerIfOutside"
            },
            "includeRoot": true
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.sync.highlight.class_name, "hl");
        assert_eq!(config.sync.highlight.hover_message, "Selected SVG element");
        assert!(config.sync.highlight.whole_line);
        assert_eq!(config.sync.reveal, RevealMode::CenterIfOutside);
        assert!(config.include_root);
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_directory() {
        let dir = TempDir::new().unwrap();
        std::fs::write(Config::path_in(dir.path()), r#"{ "includeRoot": true }"#).unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert!(config.include_root);
        assert_eq!(config.sync, SyncOptions::default());
    }

    #[test]
    fn test_invalid_config_names_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(Config::path_in(dir.path()), "{ nope").unwrap();

        let err = Config::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains(DEFAULT_CONFIG_NAME));
    }
}
