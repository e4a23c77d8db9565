//! Configuration management for gaspm.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::cdn::{DEFAULT_CDN_API, DEFAULT_CDN_BASE};
use crate::script_api::DEFAULT_API_BASE;

/// Tool configuration.
///
/// Loaded from `~/.gaspmrc`, then a project-local `.gaspmrc`, then
/// `GASPM_*` environment variables, later sources winning. Both files use
/// plain `key=value` lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Apps Script API base URL
    pub api_base: String,

    /// cdnjs API base URL
    pub cdn_api: String,

    /// cdnjs asset base URL
    pub cdn_base: String,

    /// Bearer token for the Apps Script API
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Whether to verify TLS certificates
    pub strict_ssl: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            cdn_api: DEFAULT_CDN_API.to_string(),
            cdn_base: DEFAULT_CDN_BASE.to_string(),
            token: None,
            timeout: 60,
            strict_ssl: true,
        }
    }
}

impl Config {
    /// Load configuration from default locations.
    pub fn load() -> crate::error::Result<Self> {
        let mut config = Config::default();

        if let Some(user_rc) = user_config_path() {
            if user_rc.exists() {
                config.merge_from_file(&user_rc)?;
            }
        }

        let project_rc = PathBuf::from(".gaspmrc");
        if project_rc.exists() {
            config.merge_from_file(&project_rc)?;
        }

        config.load_from_env();

        Ok(config)
    }

    /// Merge configuration from a `key=value` file.
    fn merge_from_file(&mut self, path: &Path) -> crate::error::Result<()> {
        let content = std::fs::read_to_string(path)?;

        for line in content.lines() {
            let line = line.trim();

            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                self.set(key.trim(), value.trim());
            }
        }

        Ok(())
    }

    /// Load configuration from `GASPM_*` environment variables.
    fn load_from_env(&mut self) {
        for (key, value) in std::env::vars() {
            if let Some(config_key) = key.strip_prefix("GASPM_") {
                let config_key = config_key.to_lowercase().replace('_', "-");
                self.set(&config_key, &value);
            }
        }
    }

    /// Set a configuration value.
    pub fn set(&mut self, key: &str, value: &str) {
        match key {
            "api-base" => self.api_base = value.to_string(),
            "cdn-api" => self.cdn_api = value.to_string(),
            "cdn-base" => self.cdn_base = value.to_string(),
            "token" => self.token = Some(value.to_string()),
            "timeout" => {
                if let Ok(n) = value.parse() {
                    self.timeout = n;
                }
            }
            "strict-ssl" => self.strict_ssl = value == "true",
            _ => {}
        }
    }

    /// Get a configuration value.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "api-base" => Some(self.api_base.clone()),
            "cdn-api" => Some(self.cdn_api.clone()),
            "cdn-base" => Some(self.cdn_base.clone()),
            "token" => self.token.clone(),
            "timeout" => Some(self.timeout.to_string()),
            "strict-ssl" => Some(self.strict_ssl.to_string()),
            _ => None,
        }
    }
}

/// Get the user config path.
fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".gaspmrc"))
}
