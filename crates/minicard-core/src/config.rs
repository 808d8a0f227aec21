//! Runtime configuration shared by front ends.
//!
//! Stored as JSON. Every field is optional on disk; unknown fields are
//! rejected so typos surface instead of silently falling back to defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Stage width assumed when the host cannot measure one
pub const DEFAULT_STAGE_WIDTH: i32 = 960;

/// What happens to a card when a drag ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DropBehavior {
    /// Released over the stage: back to flow layout. Released past the
    /// stage's right edge: stays free-floating.
    #[default]
    SnapBack,
    /// Dragged cards always stay free-floating
    KeepFree,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Width of the stage in pixels, used for layout and the drop rule
    #[serde(default = "default_stage_width")]
    pub stage_width: i32,
    #[serde(default)]
    pub drop_behavior: DropBehavior,
    /// Directory holding the persisted snapshot
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

const fn default_stage_width() -> i32 {
    DEFAULT_STAGE_WIDTH
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stage_width: DEFAULT_STAGE_WIDTH,
            drop_behavior: DropBehavior::SnapBack,
            data_dir: None,
        }
    }
}

impl Config {
    /// Read a config file; a missing file yields the defaults
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(|error| {
            Error::Config(format!("failed to read {}: {error}", path.display()))
        })?;
        Self::parse(&raw)
            .map_err(|error| Error::Config(format!("failed to parse {}: {error}", path.display())))
    }

    pub fn parse(raw: &str) -> serde_json::Result<Self> {
        let mut config: Self = serde_json::from_str(raw)?;
        config.stage_width = config.stage_width.max(0);
        Ok(config)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let serialized = serde_json::to_string_pretty(self)?;
        std::fs::write(path, serialized)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_uses_defaults() {
        assert_eq!(Config::parse("{}").unwrap(), Config::default());
    }

    #[test]
    fn parses_keep_free_behavior() {
        let config = Config::parse(r#"{"drop_behavior":"keep-free","stage_width":640}"#).unwrap();
        assert_eq!(config.drop_behavior, DropBehavior::KeepFree);
        assert_eq!(config.stage_width, 640);
    }

    #[test]
    fn rejects_unknown_fields() {
        let error = Config::parse(r#"{"stage_widht":1}"#).unwrap_err();
        assert!(error.to_string().contains("unknown field"));
    }

    #[test]
    fn missing_file_yields_defaults_and_save_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        assert_eq!(Config::load_from_path(&path).unwrap(), Config::default());

        let config = Config {
            stage_width: 500,
            drop_behavior: DropBehavior::KeepFree,
            data_dir: Some(dir.path().to_path_buf()),
        };
        config.save_to_path(&path).unwrap();
        assert_eq!(Config::load_from_path(&path).unwrap(), config);
    }
}
