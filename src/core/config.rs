//! User configuration.
//!
//! Reads the optional `~/.lockbox/config.toml`. Every field has a default,
//! so a missing file is the same as an empty one.
//!
//! ```toml
//! store = "/home/alice/.lockbox/store.dat"
//! range_endpoint = "https://api.pwnedpasswords.com/range"
//! length = 32
//! special = false
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{breach, constants};
use crate::error::{ConfigError, ProtectError, Result};

/// Settings from `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Store file path. Defaults to `~/.lockbox/store.dat`.
    pub store: Option<PathBuf>,
    /// Range endpoint base for breach checks.
    pub range_endpoint: Option<String>,
    /// Length of auto-generated values.
    pub length: Option<usize>,
    /// Include punctuation in auto-generated values.
    pub special: Option<bool>,
}

impl Config {
    /// Per-user lockbox directory (`~/.lockbox`).
    pub fn app_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ProtectError::NoHomeDir)?;
        Ok(home.join(constants::APP_DIR))
    }

    /// Path of the config file.
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::app_dir()?.join(constants::CONFIG_FILE))
    }

    /// Load `~/.lockbox/config.toml`, or defaults if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load a config file from an explicit path, or defaults if absent.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` if the TOML is malformed and
    /// `ConfigError::InvalidValue` if a value is out of range.
    pub fn load_from(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "loading config");

        if !path.exists() {
            debug!("no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        let config: Self = toml::from_str(&contents).map_err(ConfigError::Parse)?;
        config.validate()?;

        Ok(config)
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<()> {
        if self.length == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "length",
                reason: "must be at least 1".to_string(),
            }
            .into());
        }

        if let Some(endpoint) = &self.range_endpoint {
            if let Err(reason) = breach::check_endpoint(endpoint) {
                return Err(ConfigError::InvalidValue {
                    field: "range_endpoint",
                    reason,
                }
                .into());
            }
        }

        Ok(())
    }

    /// Effective store path.
    pub fn store_path(&self) -> Result<PathBuf> {
        match &self.store {
            Some(p) => Ok(p.clone()),
            None => Ok(Self::app_dir()?.join(constants::STORE_FILE)),
        }
    }

    /// Effective range endpoint.
    pub fn range_endpoint(&self) -> &str {
        self.range_endpoint
            .as_deref()
            .unwrap_or(constants::DEFAULT_RANGE_ENDPOINT)
    }

    /// Effective generated value length.
    pub fn length(&self) -> usize {
        self.length.unwrap_or(constants::DEFAULT_SECRET_LENGTH)
    }

    /// Whether generated values include punctuation by default.
    pub fn special(&self) -> bool {
        self.special.unwrap_or(false)
    }
}
