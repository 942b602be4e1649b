//! Configuration management for inkpic.
//!
//! Configuration is loaded from the platform config directory
//! (`~/.config/inkpic/config.toml` on Linux) with defaults matching the
//! frame's conversion parameters.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Root configuration structure for inkpic.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Batch processing settings
    pub processing: ProcessingConfig,

    /// Resource limits
    pub limits: LimitsConfig,

    /// Contrast and saturation enhancement
    pub enhance: EnhanceConfig,

    /// Palette quantization settings
    pub quantize: QuantizeConfig,

    /// Placeholder image generation
    pub test_images: TestImagesConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path (`~` is expanded).
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let path = expand_path(path);
        let content = std::fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// Uses platform-appropriate directories:
    /// - macOS: ~/Library/Application Support/com.inkpic.inkpic/config.toml
    /// - Linux: ~/.config/inkpic/config.toml
    /// - Windows: C:\Users\<User>\AppData\Roaming\inkpic\config\config.toml
    ///
    /// Falls back to ~/.inkpic/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "inkpic", "inkpic")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| expand_path(Path::new("~/.inkpic/config.toml")))
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

/// Expand a leading `~` in a user-supplied path.
pub fn expand_path(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    let expanded = shellexpand::tilde(&path_str);
    PathBuf::from(expanded.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.processing.fail_fast);
        assert_eq!(config.limits.max_file_size_mb, 100);
        assert_eq!(config.enhance.saturation, 2.5);
        assert_eq!(config.quantize.kmeans_clusters, 16);
        assert_eq!(config.test_images.count, 600);
    }

    #[test]
    fn test_config_to_toml() {
        let config = Config::default();
        let toml = config.to_toml().unwrap();
        assert!(toml.contains("[processing]"));
        assert!(toml.contains("[enhance]"));
        assert!(toml.contains("[quantize]"));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[quantize]\nkmeans_clusters = 0\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.quantize.kmeans_clusters, 0);
        assert!(config.quantize.dither);
        assert_eq!(config.enhance.autocontrast_cutoff, 2);
    }

    #[test]
    fn test_load_from_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[test_images]\ncount = 0\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("test_images.count"));
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = Config::load_from(Path::new("/nonexistent/inkpic.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError(_)));
    }
}
