//! Configuration Management
//!
//! Handles persistent configuration storage for the yext CLI.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::api::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_VERSION};
use crate::error::{Result, YextError};

pub const ENV_API_KEY: &str = "YEXT_API_KEY";
pub const ENV_ACCOUNT_ID: &str = "YEXT_ACCOUNT_ID";
pub const ENV_BASE_URL: &str = "YEXT_BASE_URL";

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub api_key: Option<String>,
    /// Account to act on; `me` when unset
    #[serde(default)]
    pub account_id: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    /// API version date
    #[serde(default)]
    pub version: Option<String>,
}

impl Config {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("yext").join("config.json"))
    }

    /// Load configuration from disk, then apply environment overrides
    pub fn load() -> Self {
        let mut config = Self::load_file();
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    /// Load only what is stored on disk, ignoring the environment
    pub fn load_file() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Load configuration from a specific file; missing or invalid files yield defaults
    pub fn load_from(path: &std::path::Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring invalid config file {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Override fields from environment variables, read through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());
        if let Some(v) = non_empty(ENV_API_KEY) {
            self.api_key = Some(v);
        }
        if let Some(v) = non_empty(ENV_ACCOUNT_ID) {
            self.account_id = Some(v);
        }
        if let Some(v) = non_empty(ENV_BASE_URL) {
            self.base_url = Some(v);
        }
    }

    /// Override fields with every value set in `overrides`
    pub fn apply_overrides(&mut self, overrides: &Config) {
        if let Some(v) = &overrides.api_key {
            self.api_key = Some(v.clone());
        }
        if let Some(v) = &overrides.account_id {
            self.account_id = Some(v.clone());
        }
        if let Some(v) = &overrides.base_url {
            self.base_url = Some(v.clone());
        }
        if let Some(v) = &overrides.version {
            self.version = Some(v.clone());
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        // Create parent directory
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Build client settings; fails when no API key is configured
    pub fn client_config(&self) -> Result<ClientConfig> {
        let api_key = self
            .api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| {
                YextError::Config(format!(
                    "no API key configured. Set {} or use --api-key",
                    ENV_API_KEY
                ))
            })?;

        Ok(ClientConfig {
            api_key,
            account_id: self.account_id.clone().unwrap_or_else(|| "me".to_string()),
            base_url: self
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            version: self
                .version
                .clone()
                .unwrap_or_else(|| DEFAULT_VERSION.to_string()),
        })
    }
}
