//! Configuration handling for charsheet

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::SheetError;

/// File name looked up in a working directory
pub const CONFIG_FILE_NAME: &str = "charsheet.toml";

/// Charsheet configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Charsheet-specific settings
    #[serde(default)]
    pub charsheet: CharsheetConfig,
}

/// Core charsheet settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CharsheetConfig {
    /// Written as the `Student ID:` header of every saved sheet
    #[serde(default = "default_author_id")]
    pub author_id: String,

    /// Sheet used when a command is given no path
    #[serde(default = "default_sheet")]
    pub default_sheet: PathBuf,

    /// Seed for reproducible dice rolls
    #[serde(default)]
    pub dice_seed: Option<u64>,
}

fn default_author_id() -> String {
    "0".to_string()
}

fn default_sheet() -> PathBuf {
    PathBuf::from("character.txt")
}

impl Default for CharsheetConfig {
    fn default() -> Self {
        Self {
            author_id: default_author_id(),
            default_sheet: default_sheet(),
            dice_seed: None,
        }
    }
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, SheetError> {
        toml::from_str(content).map_err(|e| SheetError::Config(e.to_string()))
    }

    /// Load `charsheet.toml` from `dir`, falling back to defaults when the
    /// file does not exist
    pub fn load_from_dir(dir: &Path) -> Result<Self, SheetError> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        toml::from_str(&content)
            .map_err(|e| SheetError::Config(format!("{}: {}", path.display(), e)))
    }

    pub fn to_toml(&self) -> Result<String, SheetError> {
        toml::to_string(self).map_err(|e| SheetError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.charsheet.author_id, "0");
        assert_eq!(config.charsheet.default_sheet, PathBuf::from("character.txt"));
        assert_eq!(config.charsheet.dice_seed, None);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = Config::from_toml("[charsheet]\ndice_seed = 7\n").unwrap();
        assert_eq!(config.charsheet.dice_seed, Some(7));
        assert_eq!(config.charsheet.author_id, "0");
    }

    #[test]
    fn test_empty_file() {
        assert_eq!(Config::from_toml("").unwrap(), Config::default());
    }

    #[test]
    fn test_malformed_file() {
        let err = Config::from_toml("[charsheet\n").unwrap_err();
        assert_eq!(err.code(), "E009");
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::load_from_dir(dir.path()).unwrap(), Config::default());
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[charsheet]\nauthor_id = \"12345678\"\ndefault_sheet = \"hero.txt\"\n",
        )
        .unwrap();
        let config = Config::load_from_dir(dir.path()).unwrap();
        assert_eq!(config.charsheet.author_id, "12345678");
        assert_eq!(config.charsheet.default_sheet, PathBuf::from("hero.txt"));
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = Config::default();
        config.charsheet.dice_seed = Some(3);
        let text = config.to_toml().unwrap();
        assert_eq!(Config::from_toml(&text).unwrap(), config);
    }
}
