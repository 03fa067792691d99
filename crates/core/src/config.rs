//! Application configuration
//!
//! Settings for the model endpoint and local storage, read from
//! `config.toml` in the platform config directory:
//! - Linux: ~/.config/componentai/config.toml
//! - macOS: ~/Library/Application Support/componentai/config.toml
//! - Windows: %APPDATA%/componentai/config.toml
//!
//! Every field has a default, so a missing file is not an error.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{ComponentError, ComponentResult};

// ============================================================================
// Constants
// ============================================================================

/// Directory name used under the platform config and data directories
pub const APP_DIR_NAME: &str = "componentai";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default Gemini model
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Default Gemini API root
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Environment variable holding the API key
pub const DEFAULT_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Default request deadline in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

// ============================================================================
// AppConfig
// ============================================================================

/// Configuration shared by the desktop app and the CLI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Model identifier passed to `generateContent`
    pub model: String,

    /// API root, without the `/v1beta` suffix
    pub base_url: String,

    /// Environment variable consulted for the API key
    pub api_key_env: String,

    /// Inline API key; takes precedence over the environment
    pub api_key: Option<String>,

    /// Deadline for a single generation request
    pub request_timeout_secs: u64,

    /// Where history and preferences are stored
    pub data_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            api_key: None,
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            data_dir: None,
        }
    }
}

impl AppConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from the default location, falling back to defaults if absent
    pub fn load() -> ComponentResult<Self> {
        match default_config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                tracing::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Load from an explicit file
    pub fn load_from(path: impl AsRef<Path>) -> ComponentResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| ComponentError::FileRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let config = Self::from_toml(&contents).map_err(|e| match e {
            ComponentError::InvalidConfig(message) => ComponentError::ConfigParse {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate TOML text
    pub fn from_toml(contents: &str) -> ComponentResult<Self> {
        let config: AppConfig =
            toml::from_str(contents).map_err(|e| ComponentError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values are usable
    pub fn validate(&self) -> ComponentResult<()> {
        if self.model.trim().is_empty() {
            return Err(ComponentError::InvalidConfig("model must not be empty".into()));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ComponentError::InvalidConfig(format!(
                "base_url must be an http(s) URL, got '{}'",
                self.base_url
            )));
        }
        if self.request_timeout_secs == 0 {
            return Err(ComponentError::InvalidConfig(
                "request_timeout_secs must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    /// Set the model
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the API root
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set an inline API key
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the request deadline
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout_secs = timeout.as_secs().max(1);
        self
    }

    /// Set the storage directory
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(dir.into());
        self
    }

    /// Request deadline as a duration
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Resolve the API key: inline value first, then the environment
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .or_else(|| std::env::var(&self.api_key_env).ok())
            .filter(|k| !k.trim().is_empty())
    }

    /// Directory holding history and preferences
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .or_else(default_data_dir)
            .unwrap_or_else(|| PathBuf::from(".").join(APP_DIR_NAME))
    }
}

/// Default config file location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Default storage directory
pub fn default_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|d| d.join(APP_DIR_NAME))
}

// ============================================================================
// Tests
// ============================================================================
