//! Configuration file support for Titer.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/titer/config.toml`.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub profiles: ProfilesConfig,

    #[serde(default)]
    pub chart: ChartConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Known profiles and the startup fallback selection
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProfilesConfig {
    #[serde(default = "default_profile_names")]
    pub names: Vec<String>,

    #[serde(default = "default_profile")]
    pub default: String,
}

impl Default for ProfilesConfig {
    fn default() -> Self {
        Self {
            names: default_profile_names(),
            default: default_profile(),
        }
    }
}

/// Sampling window for the level curve display
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_days_back")]
    pub days_back: i64,

    #[serde(default = "default_days_forward")]
    pub days_forward: i64,

    #[serde(default = "default_step_hours")]
    pub step_hours: i64,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            days_back: default_days_back(),
            days_forward: default_days_forward(),
            step_hours: default_step_hours(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir().unwrap_or_else(|| {
        let home = std::env::var("HOME").expect("HOME environment variable not set");
        PathBuf::from(home).join(".local/share")
    });
    base.join("titer")
}

fn default_profile_names() -> Vec<String> {
    vec!["alex".into(), "griffin".into()]
}

fn default_profile() -> String {
    "alex".into()
}

fn default_days_back() -> i64 {
    30
}

fn default_days_forward() -> i64 {
    30
}

fn default_step_hours() -> i64 {
    6
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            let home = std::env::var("HOME").expect("HOME environment variable not set");
            PathBuf::from(home).join(".config")
        });
        base.join("titer").join("config.toml")
    }

    /// Check cross-field consistency
    pub fn validate(&self) -> Result<()> {
        if self.profiles.names.is_empty() {
            return Err(Error::Config("no profiles configured".into()));
        }
        if !self.profiles.names.contains(&self.profiles.default) {
            return Err(Error::Config(format!(
                "default profile '{}' is not among the configured names",
                self.profiles.default
            )));
        }
        if self.chart.step_hours <= 0 {
            return Err(Error::Config(format!(
                "chart.step_hours must be positive, got {}",
                self.chart.step_hours
            )));
        }
        Ok(())
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}
