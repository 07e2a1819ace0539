//! Configuration file support for the TLI tools.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/tli/config.toml` and
//! supplies defaults for tunables a session file leaves out.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub bouldering: BoulderingConfig,

    #[serde(default)]
    pub hangboard: HangboardConfig,

    #[serde(default)]
    pub session: SessionConfig,
}

/// Bouldering tunables
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct BoulderingConfig {
    #[serde(default = "default_density_exp")]
    pub density_exp: f64,

    #[serde(default = "default_use_density")]
    pub use_density: bool,

    #[serde(default = "default_fatigue_rate")]
    pub fatigue_rate: f64,
}

impl Default for BoulderingConfig {
    fn default() -> Self {
        Self {
            density_exp: default_density_exp(),
            use_density: default_use_density(),
            fatigue_rate: default_fatigue_rate(),
        }
    }
}

/// Hangboard tunables
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HangboardConfig {
    #[serde(default = "default_density_exp")]
    pub density_exp: f64,

    #[serde(default = "default_k_edge_exp")]
    pub k_edge_exp: f64,
}

impl Default for HangboardConfig {
    fn default() -> Self {
        Self {
            density_exp: default_density_exp(),
            k_edge_exp: default_k_edge_exp(),
        }
    }
}

/// Session comparison settings
#[derive(Clone, Debug, Serialize, Deserialize, Default, PartialEq)]
pub struct SessionConfig {
    /// Rolling 28-day average TLI; zero means no history
    #[serde(default)]
    pub historical_average: f64,
}

// Default value functions
fn default_density_exp() -> f64 {
    0.5
}

fn default_use_density() -> bool {
    true
}

fn default_fatigue_rate() -> f64 {
    0.02
}

fn default_k_edge_exp() -> f64 {
    0.45
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| {
            std::env::var("HOME")
                .map(|home| PathBuf::from(home).join(".config"))
                .unwrap_or_else(|_| PathBuf::from(".config"))
        });
        base.join("tli").join("config.toml")
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, self.to_toml()?)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Reject values the formulas cannot use
    pub fn validate(&self) -> Result<()> {
        let values = [
            ("bouldering.density_exp", self.bouldering.density_exp),
            ("bouldering.fatigue_rate", self.bouldering.fatigue_rate),
            ("hangboard.density_exp", self.hangboard.density_exp),
            ("hangboard.k_edge_exp", self.hangboard.k_edge_exp),
            ("session.historical_average", self.session.historical_average),
        ];

        for (key, value) in values {
            if !value.is_finite() {
                return Err(Error::Config(format!("{} must be a finite number", key)));
            }
        }

        if self.bouldering.fatigue_rate < 0.0 {
            return Err(Error::Config(
                "bouldering.fatigue_rate must not be negative".into(),
            ));
        }

        Ok(())
    }
}
