use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, UpkeepError};

/// Top-level configuration for the Upkeep application.
///
/// Loaded from `~/.upkeep/config.toml` by default. Each section corresponds
/// to a bounded context or cross-cutting concern.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpkeepConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub engine: EngineConfig,
}

impl UpkeepConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: UpkeepConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| UpkeepError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
    /// Organization identifier stamped on outbound requests.
    pub default_tenant: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            default_tenant: String::new(),
        }
    }
}

/// Action engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Whether actions without an explicit trigger rule are visible.
    ///
    /// Fail-open is the inherited default for backward compatibility with
    /// catalogs that predate trigger rules. Deployments that want every
    /// action to carry an explicit rule can set this to false.
    pub fail_open_visibility: bool,
    /// Label for the confirm button on confirmation prompts.
    pub confirm_label: String,
    /// Label for the cancel button on confirmation prompts.
    pub cancel_label: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fail_open_visibility: true,
            confirm_label: "Confirm".to_string(),
            cancel_label: "Cancel".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = UpkeepConfig::default();
        assert_eq!(config.general.log_level, "info");
        assert!(config.general.default_tenant.is_empty());
        assert!(config.engine.fail_open_visibility);
        assert_eq!(config.engine.confirm_label, "Confirm");
        assert_eq!(config.engine.cancel_label, "Cancel");
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = UpkeepConfig::default();
        config.general.default_tenant = "acme".to_string();
        config.engine.fail_open_visibility = false;
        config.save(&path).unwrap();

        let loaded = UpkeepConfig::load(&path).unwrap();
        assert_eq!(loaded.general.default_tenant, "acme");
        assert!(!loaded.engine.fail_open_visibility);
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(UpkeepConfig::load(&path).is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        let config = UpkeepConfig::load_or_default(&path);
        assert!(config.engine.fail_open_visibility);
    }

    #[test]
    fn test_load_or_default_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "not [ valid toml").unwrap();
        let config = UpkeepConfig::load_or_default(&path);
        assert_eq!(config.engine.confirm_label, "Confirm");
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let toml_str = "[engine]\nfail_open_visibility = false\n";
        let config: UpkeepConfig = toml::from_str(toml_str).unwrap();
        assert!(!config.engine.fail_open_visibility);
        assert_eq!(config.engine.confirm_label, "Confirm");
        assert_eq!(config.general.log_level, "info");
    }
}
