pub mod types;

pub use types::*;

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable pointing at an alternative config file
pub const CONFIG_ENV: &str = "MKVBULK_CONFIG";

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tools: ToolsConfig,
    pub scan: ScanConfig,
    pub display: DisplayConfig,
    pub extract: ExtractConfig,
}

impl AppConfig {
    /// Load configuration from the default location, or create it with
    /// defaults if not found
    pub fn load() -> Self {
        Self::load_or_create(&Self::config_path())
    }

    /// Load configuration from `path`. A missing file is created with the
    /// defaults; an unreadable one falls back to the defaults.
    pub fn load_or_create(path: &Path) -> Self {
        if path.exists() {
            match Self::load_from_file(path) {
                Ok(config) => {
                    info!("Loaded config from {}", path.display());
                    return config;
                }
                Err(e) => {
                    warn!("Failed to load config: {}. Using defaults.", e);
                    return Self::default();
                }
            }
        }

        let config = Self::default();
        // Save default config for future editing
        if let Err(e) = config.save_to(path) {
            warn!("Failed to save default config: {}", e);
        }
        config
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<(), AppError> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), AppError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let toml_string = self.to_toml()?;
        std::fs::write(path, toml_string)
            .map_err(|e| AppError::Config(format!("Failed to write config file: {}", e)))?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config file: {}", e)))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, AppError> {
        toml::from_str(content)
            .map_err(|e| AppError::Config(format!("Failed to parse config file: {}", e)))
    }

    pub fn to_toml(&self) -> Result<String, AppError> {
        toml::to_string_pretty(self)
            .map_err(|e| AppError::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Get the configuration file path, honoring `MKVBULK_CONFIG`
    pub fn config_path() -> PathBuf {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return PathBuf::from(path);
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mkvbulk")
            .join("config.toml")
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), AppError> {
        if self.tools.mkvmerge.trim().is_empty() {
            return Err(AppError::Config(
                "tools.mkvmerge must not be empty".to_string(),
            ));
        }
        if self.tools.mkvextract.trim().is_empty() {
            return Err(AppError::Config(
                "tools.mkvextract must not be empty".to_string(),
            ));
        }
        if self.scan.extensions.iter().all(|e| e.trim().is_empty()) {
            return Err(AppError::Config(
                "scan.extensions must list at least one extension".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::Scope;
    use crate::tracks::JoinStyle;

    #[test]
    fn defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.scan.extensions, vec!["mkv"]);
        assert_eq!(config.display.join_style, JoinStyle::OneLinePerEntry);
        assert_eq!(config.extract.scope, Scope::All);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let config = AppConfig::from_toml(
            r#"
            [display]
            join_style = "comma"

            [extract]
            scope = "subtitle"
            "#,
        )
        .unwrap();
        assert_eq!(config.display.join_style, JoinStyle::CommaJoined);
        assert_eq!(config.extract.scope, Scope::Subtitle);
        assert_eq!(config.tools, ToolsConfig::default());
    }

    #[test]
    fn toml_round_trip() {
        let mut config = AppConfig::default();
        config.tools.mkvextract = "/opt/mkvtoolnix/mkvextract".to_string();
        config.scan.extensions = vec!["mkv".to_string(), "mka".to_string()];
        let text = config.to_toml().unwrap();
        assert_eq!(AppConfig::from_toml(&text).unwrap(), config);
    }

    #[test]
    fn unknown_join_style_is_a_config_error() {
        let result = AppConfig::from_toml("[display]\njoin_style = \"tabs\"\n");
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[test]
    fn validate_rejects_empty_values() {
        let mut config = AppConfig::default();
        config.tools.mkvmerge = " ".to_string();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.scan.extensions.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = AppConfig::load_or_create(&path);
        assert_eq!(config, AppConfig::default());
        assert!(path.exists());
        assert_eq!(AppConfig::load_from_file(&path).unwrap(), config);
    }

    #[test]
    fn broken_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[scan\nextensions = 3").unwrap();
        assert_eq!(AppConfig::load_or_create(&path), AppConfig::default());
    }
}
