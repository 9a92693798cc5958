//! Configuration management for armory CLI

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::cli::PathArgs;

/// Cache root used when neither flag, environment nor config set one
pub const DEFAULT_CACHE_DIR: &str = ".cache";

/// Data root used when neither flag, environment nor config set one
pub const DEFAULT_OUTPUT_DIR: &str = "data";

/// Weapon list file name inside the data root
pub const WEAPON_LIST_FILE: &str = "weapon_list.json";

#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    pub cache_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub weapon_list: Option<PathBuf>,
}

/// Fully resolved input/output locations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paths {
    pub cache_dir: PathBuf,
    pub output_dir: PathBuf,
    pub weapon_list: PathBuf,
}

impl Config {
    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("armory");

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from file, or create default if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        toml::from_str(&contents).context("Failed to parse config file")
    }

    /// Save configuration to file
    pub fn save(&self) -> Result<PathBuf> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory at {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, contents)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        Ok(())
    }

    /// Whether any setting is present
    pub fn is_empty(&self) -> bool {
        self.cache_dir.is_none() && self.output_dir.is_none() && self.weapon_list.is_none()
    }

    /// Combine command-line paths with the stored defaults
    ///
    /// Flags (and their environment variables, which clap folds into the
    /// flag value) win over the config file, which wins over the built-in
    /// defaults.
    pub fn resolve(&self, args: &PathArgs) -> Paths {
        let cache_dir = args
            .cache_dir
            .clone()
            .or_else(|| self.cache_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_DIR));
        let output_dir = self.resolve_output_dir(args.output_dir.clone());
        let weapon_list = args
            .weapon_list
            .clone()
            .or_else(|| self.weapon_list.clone())
            .unwrap_or_else(|| output_dir.join(WEAPON_LIST_FILE));

        Paths {
            cache_dir,
            output_dir,
            weapon_list,
        }
    }

    pub fn resolve_output_dir(&self, flag: Option<PathBuf>) -> PathBuf {
        flag.or_else(|| self.output_dir.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let paths = Config::default().resolve(&PathArgs::default());
        assert_eq!(paths.cache_dir, PathBuf::from(".cache"));
        assert_eq!(paths.output_dir, PathBuf::from("data"));
        assert_eq!(paths.weapon_list, PathBuf::from("data/weapon_list.json"));
    }

    #[test]
    fn test_flags_override_config() {
        let config = Config {
            cache_dir: Some(PathBuf::from("/srv/cache")),
            output_dir: Some(PathBuf::from("/srv/data")),
            weapon_list: None,
        };
        let args = PathArgs {
            cache_dir: None,
            output_dir: Some(PathBuf::from("out")),
            weapon_list: None,
        };

        let paths = config.resolve(&args);
        assert_eq!(paths.cache_dir, PathBuf::from("/srv/cache"));
        assert_eq!(paths.output_dir, PathBuf::from("out"));
        assert_eq!(paths.weapon_list, PathBuf::from("out/weapon_list.json"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config_path = temp_dir.path().join("nested").join("config.toml");

        assert_eq!(Config::load_from(&config_path).unwrap(), Config::default());

        let config = Config {
            cache_dir: Some(PathBuf::from("/srv/cache")),
            output_dir: None,
            weapon_list: Some(PathBuf::from("/srv/weapons.json")),
        };
        config.save_to(&config_path).unwrap();
        assert_eq!(Config::load_from(&config_path).unwrap(), config);
    }

    #[test]
    fn test_config_path_exists() {
        let result = Config::config_path();
        assert!(result.is_ok());
    }
}
