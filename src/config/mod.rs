//! Configuration loading and management

mod io;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::LevelingPolicy;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub settings: Settings,
}

/// General settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Where habit and player documents are stored (defaults to the config dir).
    /// A leading `~/` is expanded to the home directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// How XP awards that cross several level thresholds are handled
    #[serde(default)]
    pub leveling: LevelingPolicy,
}

impl Config {
    /// Directory holding the habit documents
    pub fn data_dir(&self) -> PathBuf {
        match &self.settings.data_dir {
            Some(dir) => expand_home(dir),
            None => Self::global_config_dir(),
        }
    }
}

fn expand_home(path: &std::path::Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(rest),
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_settings() {
        let config: Config = toml::from_str(
            r#"
            [settings]
            data_dir = "/tmp/levelup-data"
            leveling = "cascade"
            "#,
        )
        .unwrap();
        assert_eq!(config.settings.leveling, LevelingPolicy::Cascade);
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/levelup-data"));
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.settings.leveling, LevelingPolicy::SingleStep);
        assert_eq!(config.data_dir(), Config::global_config_dir());
    }

    #[test]
    fn test_home_expansion() {
        let expanded = expand_home(std::path::Path::new("~/habits"));
        assert!(expanded.ends_with("habits"));
        assert!(!expanded.starts_with("~"));
    }
}
