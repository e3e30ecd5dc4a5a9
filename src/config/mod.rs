//! Client configuration: named backend profiles loaded from a TOML file.

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// One backend connection: where to reach it and how to authenticate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub base_url: String,
    pub token: String,
}

/// Parsed contents of the config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub default_profile: Option<String>,
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Config {
    /// Path of the config file, `~/.config/questionnaire-cli/config.toml`
    /// on XDG platforms
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join("questionnaire-cli")
        } else {
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(".questionnaire-cli")
        };
        Ok(config_dir.join("config.toml"))
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &PathBuf) -> Result<Self> {
        log::debug!("Loading config from: {path:?}");
        if !path.exists() {
            bail!(
                "no config file at {path:?}; create it with a [profiles.default] section \
                 containing base_url and token"
            );
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path:?}"))?;
        let config: Config =
            toml::from_str(&contents).with_context(|| format!("Invalid config file: {path:?}"))?;
        Ok(config)
    }

    /// Resolve a profile by name, falling back to the configured default
    /// and then to a profile literally named "default"
    pub fn profile(&self, name: Option<&str>) -> Result<&Profile> {
        let name = name
            .or(self.default_profile.as_deref())
            .unwrap_or("default");
        self.profiles.get(name).with_context(|| {
            format!(
                "profile '{name}' not found; available: {}",
                self.profiles
                    .keys()
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        })
    }
}
