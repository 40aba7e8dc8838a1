use std::net::SocketAddr;
use std::path::PathBuf;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_LANG: &str = "en";
pub const DEFAULT_BIND: &str = "127.0.0.1:8501";

/// Optional on-disk defaults
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub default_lang: Option<String>,
    pub default_format: Option<String>,
    pub default_model: Option<String>,
    pub bind: Option<String>,
}

impl Config {
    /// Load config from ~/.config/ytnotes/config.toml if it exists
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path();
        if path.exists() {
            debug!("Loading config from {}", path.display());
            let file_err = |reason: String| ConfigError::File {
                path: path.display().to_string(),
                reason,
            };
            let content = std::fs::read_to_string(&path).map_err(|e| file_err(e.to_string()))?;
            let config: Config = toml::from_str(&content).map_err(|e| file_err(e.to_string()))?;
            Ok(config)
        } else {
            debug!("No config file found at {}", path.display());
            Ok(Config::default())
        }
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from(".config"))
        .join("ytnotes")
        .join("config.toml")
}

/// Values given on the command line; these win over the config file
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub languages: Option<Vec<String>>,
    pub model: Option<String>,
}

/// Read-only settings resolved once at startup
#[derive(Clone)]
pub struct Settings {
    api_key: String,
    pub model: String,
    pub languages: Vec<String>,
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("languages", &self.languages)
            .finish()
    }
}

impl Settings {
    /// Resolve settings with the API key taken from the process environment
    pub fn from_env(config: &Config, overrides: Overrides) -> Result<Self, ConfigError> {
        Self::resolve(config, overrides, std::env::var(API_KEY_ENV).ok())
    }

    pub fn resolve(config: &Config, overrides: Overrides, api_key: Option<String>) -> Result<Self, ConfigError> {
        let api_key = api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ConfigError::MissingApiKey {
                env_var: API_KEY_ENV.to_string(),
            })?;

        let model = overrides
            .model
            .or_else(|| config.default_model.clone())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let languages = overrides
            .languages
            .map(|l| l.iter().flat_map(|v| parse_languages(v)).collect::<Vec<_>>())
            .filter(|l| !l.is_empty())
            .or_else(|| config.default_lang.as_deref().map(parse_languages))
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| vec![DEFAULT_LANG.to_string()]);

        Ok(Self {
            api_key,
            model,
            languages,
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}

/// Resolve the web form's listen address; only `--serve` needs it
pub fn bind_addr(value: Option<&str>) -> Result<SocketAddr, ConfigError> {
    let value = value.unwrap_or(DEFAULT_BIND);
    value.parse().map_err(|e: std::net::AddrParseError| ConfigError::InvalidBind {
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// Split a comma-separated language preference list
pub fn parse_languages(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
