//! Configuration file I/O operations

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use fs2::FileExt;

use super::Config;
use crate::storage::write_atomic;

/// Commented default configuration written by `levelup init`
pub const DEFAULT_CONFIG: &str = r#"# LevelUp Habits configuration
# ============================

[settings]
# Where habits.json and player.json live. Defaults to ~/.levelup
# data_dir = "~/.levelup"

# What happens when one completion earns enough XP for more than one level:
#   "single-step" - gain at most one level per completion (default)
#   "cascade"     - keep levelling while the XP covers the next threshold
leveling = "single-step"
"#;

impl Config {
    /// Get the global config directory path (~/.levelup/)
    pub fn global_config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".levelup")
    }

    /// Get the global config file path (~/.levelup/config.toml)
    pub fn global_config_path() -> PathBuf {
        Self::global_config_dir().join("config.toml")
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration from `path` (or the global path).
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::global_config_path);

        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::from_file(&path)
    }

    /// Save configuration to a file with atomic write and file locking.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).with_context(|| "Failed to serialize config")?;
        write_locked(path, &content)
    }

    /// Write the commented default config to `path`
    pub fn write_default(path: &Path, force: bool) -> Result<()> {
        if path.exists() && !force {
            bail!(
                "Config already exists at {} (use --force to overwrite)",
                path.display()
            );
        }
        write_locked(path, DEFAULT_CONFIG)
    }
}

/// Atomic write while holding `<path>.lock`, so a CLI and another process
/// never interleave writes.
fn write_locked(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| {
            format!("Failed to create config directory: {}", parent.display())
        })?;
    }

    let lock_path = path.with_extension("toml.lock");
    let lock_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&lock_path)
        .with_context(|| format!("Failed to create lock file: {}", lock_path.display()))?;

    lock_file
        .lock_exclusive()
        .with_context(|| "Failed to acquire config lock")?;

    write_atomic(path, content.as_bytes())
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;

    // Lock is released when lock_file is dropped
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LevelingPolicy;
    use tempfile::tempdir;

    #[test]
    fn test_default_config_parses() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_write_default_respects_force() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");

        Config::write_default(&path, false).unwrap();
        assert!(Config::write_default(&path, false).is_err());
        Config::write_default(&path, true).unwrap();
        assert_eq!(Config::from_file(&path).unwrap(), Config::default());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");

        let mut config = Config::default();
        config.settings.leveling = LevelingPolicy::Cascade;
        config.settings.data_dir = Some(dir.path().join("data"));
        config.save_to_file(&path).unwrap();

        assert_eq!(Config::load(Some(&path)).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempdir().unwrap();
        let config = Config::load(Some(&dir.path().join("absent.toml"))).unwrap();
        assert_eq!(config, Config::default());
    }
}
