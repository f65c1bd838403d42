//! Application configuration management.
//!
//! This module handles loading and saving the application configuration:
//! API endpoints, which token store to use, redirect routes and the last
//! username entered.
//!
//! Configuration is stored at `~/.config/mfaclient/config.json`. A few
//! settings can be overridden from the environment (`MFACLIENT_*`).

use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::auth::{Routes, SessionOptions};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "mfaclient";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Default base URL of the two-factor authentication service
const DEFAULT_AUTH_URL: &str = "http://localhost:3005/api/v1/auth";

/// Default base URL of the user service
const DEFAULT_USER_URL: &str = "http://localhost:3001/api/v1";

pub const ENV_AUTH_URL: &str = "MFACLIENT_AUTH_URL";
pub const ENV_USER_URL: &str = "MFACLIENT_USER_URL";
pub const ENV_STORE: &str = "MFACLIENT_STORE";

/// Where the session token is persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    #[default]
    File,
    Keyring,
    Memory,
}

impl FromStr for StoreKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(StoreKind::File),
            "keyring" => Ok(StoreKind::Keyring),
            "memory" => Ok(StoreKind::Memory),
            other => Err(anyhow::anyhow!(
                "Unknown token store '{}' (expected file, keyring or memory)",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub auth_url: String,
    pub user_url: String,
    pub store: StoreKind,
    pub routes: Routes,
    /// No timeout when unset; requests wait for the transport to fail
    pub request_timeout_secs: Option<u64>,
    pub purge_rejected_token: bool,
    pub last_username: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            auth_url: DEFAULT_AUTH_URL.to_string(),
            user_url: DEFAULT_USER_URL.to_string(),
            store: StoreKind::default(),
            routes: Routes::default(),
            request_timeout_secs: None,
            purge_rejected_token: false,
            last_username: None,
        }
    }
}

impl Config {
    /// Load from the default location, then apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Apply `MFACLIENT_*` overrides read through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_AUTH_URL) {
            self.auth_url = url;
        }
        if let Some(url) = lookup(ENV_USER_URL) {
            self.user_url = url;
        }
        if let Some(store) = lookup(ENV_STORE) {
            self.store = store
                .parse()
                .with_context(|| format!("Invalid {}", ENV_STORE))?;
        }
        Ok(())
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            purge_rejected_token: self.purge_rejected_token,
        }
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn cache_dir() -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }
}
