//! Application configuration management.
//!
//! Configuration lives at `~/.config/frontdoor/config.json` and holds the auth
//! endpoint, the last email that logged in successfully, and the login
//! timeout. Environment variables override the file.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Application name used for config/log directory paths
const APP_NAME: &str = "frontdoor";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Default upper bound on one login call.
const DEFAULT_LOGIN_TIMEOUT_SECS: u64 = 30;

const ENV_AUTH_URL: &str = "FRONTDOOR_AUTH_URL";
const ENV_EMAIL: &str = "FRONTDOOR_EMAIL";
const ENV_PASSWORD: &str = "FRONTDOOR_PASSWORD";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub auth_url: Option<String>,
    #[serde(default)]
    pub last_email: Option<String>,
    #[serde(default)]
    pub login_timeout_secs: Option<u64>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            serde_json::from_str(&contents).context("Failed to parse config file")
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

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory for log files
    pub fn log_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Upper bound on one auth call. Zero falls back to the default.
    pub fn login_timeout(&self) -> Duration {
        let secs = self
            .login_timeout_secs
            .filter(|&secs| secs > 0)
            .unwrap_or(DEFAULT_LOGIN_TIMEOUT_SECS);
        Duration::from_secs(secs)
    }

    /// Auth endpoint, preferring the environment over the file
    pub fn auth_url(&self) -> Option<String> {
        std::env::var(ENV_AUTH_URL)
            .ok()
            .filter(|s| !s.is_empty())
            .or_else(|| self.auth_url.clone())
    }

    /// Email to prefill the form with
    pub fn initial_email(&self) -> String {
        std::env::var(ENV_EMAIL)
            .ok()
            .or_else(|| self.last_email.clone())
            .unwrap_or_default()
    }

    /// Password to prefill the form with (environment only)
    pub fn initial_password(&self) -> String {
        std::env::var(ENV_PASSWORD).unwrap_or_default()
    }
}
