use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Retry tuning for the shuffle engine.
///
/// The defaults (5 attempts, half the list allowed in place) are inherited
/// behavior with no deeper rationale than "feel more shuffled", so they are
/// kept configurable rather than baked in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShuffleSettings {
    /// Total permutation attempts, including the first one.
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// Largest tolerable fraction of entries left in their original slot
    /// before another attempt is made.
    #[serde(default = "default_max_fixed_ratio")]
    pub max_fixed_ratio: f64,
}

fn default_max_attempts() -> u32 {
    5
}

fn default_max_fixed_ratio() -> f64 {
    0.5
}

impl Default for ShuffleSettings {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            max_fixed_ratio: default_max_fixed_ratio(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Shuffle retry heuristic
    #[serde(default)]
    pub shuffle: ShuffleSettings,

    /// Hard cap on roster size (the store enforces this even when the UI
    /// already refuses input at capacity)
    #[serde(default = "default_max_names")]
    pub max_names: usize,

    /// Desktop notification after a CLI shuffle
    #[serde(default)]
    pub notifications: bool,
}

fn default_max_names() -> usize {
    100
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            shuffle: ShuffleSettings::default(),
            max_names: default_max_names(),
            notifications: false,
        }
    }
}

impl AppConfig {
    /// Get the config file path
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?
            .join("standup");

        if let Err(e) = std::fs::create_dir_all(&config_dir) {
            tracing::warn!("Could not create config directory: {}", e);
        }

        Ok(config_dir.join("config.toml"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = match Self::config_path() {
            Ok(p) => p,
            Err(_) => return Ok(AppConfig::default()),
        };

        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(content) => match toml::from_str::<AppConfig>(&content) {
                    Ok(config) => return Ok(config.sanitized()),
                    Err(e) => tracing::warn!("Failed to parse config: {}", e),
                },
                Err(e) => tracing::warn!("Failed to read config: {}", e),
            }
        }

        let config = AppConfig::default();
        let _ = config.save();
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        let content = toml::to_string_pretty(&self.clone().sanitized())?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Clamp hand-edited values back into usable ranges
    fn sanitized(mut self) -> Self {
        self.shuffle.max_attempts = self.shuffle.max_attempts.max(1);
        self.shuffle.max_fixed_ratio = self.shuffle.max_fixed_ratio.clamp(0.0, 1.0);
        self.max_names = self.max_names.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serialization() {
        let config = AppConfig {
            shuffle: ShuffleSettings {
                max_attempts: 3,
                max_fixed_ratio: 0.25,
            },
            max_names: 50,
            notifications: true,
        };

        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&serialized).unwrap();

        assert_eq!(config.shuffle.max_attempts, deserialized.shuffle.max_attempts);
        assert_eq!(config.max_names, deserialized.max_names);
        assert_eq!(config.notifications, deserialized.notifications);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.shuffle.max_attempts, 5);
        assert_eq!(config.shuffle.max_fixed_ratio, 0.5);
        assert_eq!(config.max_names, 100);
        assert!(!config.notifications);
    }

    #[test]
    fn test_sanitize_clamps_bad_values() {
        let config = AppConfig {
            shuffle: ShuffleSettings {
                max_attempts: 0,
                max_fixed_ratio: 7.5,
            },
            max_names: 0,
            notifications: false,
        };

        let clean = config.sanitized();
        assert_eq!(clean.shuffle.max_attempts, 1);
        assert_eq!(clean.shuffle.max_fixed_ratio, 1.0);
        assert_eq!(clean.max_names, 1);
    }
}
