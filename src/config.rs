//! Runtime configuration.
//!
//! Values come from, in increasing priority: built-in defaults, an optional
//! JSON file at `<config dir>/life-copilot/config.json`, and environment
//! variables:
//! - `GEMINI_API_KEY` (or `API_KEY`) - Gemini API key
//! - `LIFE_COPILOT_MODEL` - model name
//! - `LIFE_COPILOT_ENDPOINT` - API base URL
//! - `LIFE_COPILOT_TIMEOUT_SECS` - request timeout
//! - `LIFE_COPILOT_AUTO_REFRESH` - re-run analysis after every task change

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const APP_NAME: &str = "life-copilot";
const CONFIG_FILE: &str = "config.json";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },

    #[error("No Gemini API key configured; set GEMINI_API_KEY")]
    MissingApiKey,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    /// Base URL of the Gemini REST API, without a trailing slash.
    pub endpoint: String,
    /// Upper bound on a single analysis request.
    pub timeout_secs: u64,
    /// Re-run the analysis in the background after each task mutation.
    pub auto_refresh: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            auto_refresh: true,
        }
    }
}

impl Config {
    /// Load from the user's config directory, then apply the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match config_path() {
            Some(path) => Self::load_from(&path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load a config file. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// [`Config::load`]). Empty values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(key) = get("GEMINI_API_KEY").or_else(|| get("API_KEY")) {
            self.api_key = Some(key);
        }
        if let Some(model) = get("LIFE_COPILOT_MODEL") {
            self.model = model;
        }
        if let Some(endpoint) = get("LIFE_COPILOT_ENDPOINT") {
            self.endpoint = endpoint.trim_end_matches('/').to_string();
        }
        if let Some(value) = get("LIFE_COPILOT_TIMEOUT_SECS") {
            self.timeout_secs = value
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue {
                    key: "LIFE_COPILOT_TIMEOUT_SECS",
                    value,
                })?;
        }
        if let Some(value) = get("LIFE_COPILOT_AUTO_REFRESH") {
            self.auto_refresh = parse_bool(&value).ok_or(ConfigError::InvalidValue {
                key: "LIFE_COPILOT_AUTO_REFRESH",
                value,
            })?;
        }

        Ok(())
    }

    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.api_key.as_deref().ok_or(ConfigError::MissingApiKey)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// `<config dir>/life-copilot/config.json`, if the platform has a config dir.
pub fn config_path() -> Option<PathBuf> {
    let mut path = dirs::config_dir()?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Some(path)
}
