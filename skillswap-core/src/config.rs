//! Configuration management
//!
//! Settings live in `<data dir>/settings.json`:
//! ```json
//! {
//!   "api": { "baseUrl": "http://localhost:5000/api", "timeoutSecs": 30 }
//! }
//! ```
//! Fields the client does not manage are kept as-is when saving.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::adapters::http::DEFAULT_TIMEOUT_SECS;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

/// Environment override for the API base URL
pub const API_URL_ENV: &str = "SKILLSWAP_API_URL";

const SETTINGS_FILE: &str = "settings.json";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    api: ApiSettings,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timeout_secs: Option<u64>,
    #[serde(flatten)]
    other: HashMap<String, serde_json::Value>,
}

/// Effective client configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub timeout_secs: u64,
    /// True when the base URL came from the environment rather than settings.json
    pub api_url_from_env: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            api_url_from_env: false,
        }
    }
}

impl Config {
    /// Load config from the data directory
    ///
    /// The API base URL can come from:
    /// 1. Environment variable SKILLSWAP_API_URL
    /// 2. Settings file (`swap config set-api`)
    /// 3. The built-in default
    pub fn load(data_dir: &Path) -> Result<Self> {
        let raw = read_settings(data_dir)?;

        let (api_base_url, api_url_from_env) = match std::env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => (url, true),
            _ => (
                raw.api
                    .base_url
                    .clone()
                    .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
                false,
            ),
        };
        validate_base_url(&api_base_url)?;

        Ok(Self {
            api_base_url,
            timeout_secs: raw.api.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            api_url_from_env,
        })
    }

    /// Save config to the data directory, preserving unmanaged settings
    pub fn save(&self, data_dir: &Path) -> Result<()> {
        validate_base_url(&self.api_base_url)?;

        let mut settings = read_settings(data_dir)?;
        // An env override is transient; don't bake it into the file
        if !self.api_url_from_env {
            settings.api.base_url = Some(self.api_base_url.clone());
        }
        settings.api.timeout_secs = Some(self.timeout_secs);

        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("Failed to create {}", data_dir.display()))?;
        let content = serde_json::to_string_pretty(&settings)?;
        std::fs::write(data_dir.join(SETTINGS_FILE), content)?;
        Ok(())
    }

    /// Point the client at another backend
    pub fn set_api_base_url(&mut self, url: &str) -> Result<()> {
        validate_base_url(url)?;
        self.api_base_url = url.trim_end_matches('/').to_string();
        self.api_url_from_env = false;
        Ok(())
    }
}

fn read_settings(data_dir: &Path) -> Result<SettingsFile> {
    let settings_path = data_dir.join(SETTINGS_FILE);
    if !settings_path.exists() {
        return Ok(SettingsFile::default());
    }
    let content = std::fs::read_to_string(&settings_path)
        .with_context(|| format!("Failed to read {}", settings_path.display()))?;
    Ok(serde_json::from_str(&content).unwrap_or_default())
}

/// Only absolute http(s) URLs are usable as an API base
pub fn validate_base_url(raw: &str) -> Result<()> {
    let parsed = url::Url::parse(raw.trim())
        .with_context(|| format!("Invalid API base URL: {}", raw))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => bail!("API base URL must use http or https, got '{}'", other),
    }
    if parsed.host_str().is_none() {
        bail!("API base URL has no host: {}", raw);
    }
    Ok(())
}
