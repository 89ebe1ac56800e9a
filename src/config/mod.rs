//! Configuration module for bookvault
//!
//! Manages the API host, share link base, and paging/debounce tuning.
//! Configuration is stored in the user's config directory and can be
//! overridden per invocation with `BOOKVAULT_*` environment variables
//! (`BOOKVAULT_API_BASE_URL=http://localhost:3000`).

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "https://bookshook.com";
pub const DEFAULT_SHARE_BASE_URL: &str = "https://bookshook.com/vault";

/// Keys accepted by [`VaultConfig::set_value`]
pub const KEYS: [&str; 7] = [
    "api_base_url",
    "share_base_url",
    "page_size",
    "debounce_ms",
    "include_sensitive",
    "session_cookie",
    "quiet",
];

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct VaultConfig {
    /// Host serving `/api/*`
    pub api_base_url: String,

    /// Page that shared links open
    pub share_base_url: String,

    /// Results per page
    pub page_size: u32,

    /// Quiet period before typed text becomes a search
    pub debounce_ms: u64,

    /// Ask the taxonomy endpoint for sensitive tags too
    pub include_sensitive: bool,

    /// Cookie forwarded to member endpoints (library, interactions)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_cookie: Option<String>,

    /// Suppress informational output by default
    pub quiet: bool,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            share_base_url: DEFAULT_SHARE_BASE_URL.to_string(),
            page_size: 24,
            debounce_ms: 300,
            include_sensitive: true,
            session_cookie: None,
            quiet: false,
        }
    }
}

impl VaultConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("bookvault").join("config.toml"))
    }

    /// Load configuration from the default location, creating it if missing
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, writing defaults there if it doesn't exist
    ///
    /// Environment variables prefixed `BOOKVAULT_` take precedence over the file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, or created, or
    /// an environment override has the wrong type.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            Self::default().save_to(path)?;
        }

        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml))
            .add_source(Environment::with_prefix("BOOKVAULT").try_parsing(true))
            .build()?;

        settings.try_deserialize()
    }

    /// Save configuration to the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config directory cannot be determined or
    /// writing fails.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the parent directory cannot be created, the configuration
    /// cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Set one key from its string form
    ///
    /// An empty value for `session_cookie` clears it.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotFound` for an unknown key and
    /// `ConfigError::Message` when the value doesn't parse for the key.
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        match key {
            "api_base_url" => self.api_base_url = parse_base_url(key, value)?,
            "share_base_url" => self.share_base_url = parse_base_url(key, value)?,
            "page_size" => {
                self.page_size = match value.parse::<u32>() {
                    Ok(size) if (1..=100).contains(&size) => size,
                    _ => return Err(invalid(key, value, "a number from 1 to 100")),
                };
            }
            "debounce_ms" => {
                self.debounce_ms = value
                    .parse()
                    .map_err(|_| invalid(key, value, "a number of milliseconds"))?;
            }
            "include_sensitive" => self.include_sensitive = parse_bool(key, value)?,
            "quiet" => self.quiet = parse_bool(key, value)?,
            "session_cookie" => {
                self.session_cookie = (!value.is_empty()).then(|| value.to_string());
            }
            _ => return Err(ConfigError::NotFound(key.to_string())),
        }
        Ok(())
    }

    /// Quiet period for a [`crate::search::SearchDebouncer`]
    #[must_use]
    pub const fn debounce_period(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Parsed [`Self::share_base_url`]
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Message` if the stored value is not an absolute URL.
    pub fn share_base(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.share_base_url)
            .map_err(|e| ConfigError::Message(format!("Invalid share_base_url '{}': {e}", self.share_base_url)))
    }
}

fn invalid(key: &str, value: &str, expected: &str) -> ConfigError {
    ConfigError::Message(format!("Invalid value '{value}' for {key}: expected {expected}"))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, value, "true or false")),
    }
}

fn parse_base_url(key: &str, value: &str) -> Result<String, ConfigError> {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {
            Ok(value.trim_end_matches('/').to_string())
        }
        _ => Err(invalid(key, value, "an http(s) URL")),
    }
}
