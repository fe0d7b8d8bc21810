//! Configuration management.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::error::CoreError;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Outbound request defaults.
    #[serde(default)]
    pub fetch: FetchConfig,
    /// Cooldown gate settings.
    #[serde(default)]
    pub cooldown: CooldownConfig,
    /// Scraper aggregator settings.
    #[serde(default)]
    pub scraper: ScraperConfig,
    /// Panel API settings.
    #[serde(default)]
    pub panel: PanelConfig,
    /// Log level used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Defaults for the resilient fetcher.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Attempts per request (1 means no retries).
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,
    /// Per-attempt timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Cooldown gate settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CooldownConfig {
    /// Total cooldown window in milliseconds.
    #[serde(default = "default_window_ms")]
    pub window_ms: u64,
    /// Default `hold` delay in milliseconds.
    #[serde(default = "default_hold_delay_ms")]
    pub hold_delay_ms: u64,
}

/// Scraper aggregator settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Base URL that endpoint names are joined onto.
    #[serde(default = "default_scraper_url")]
    pub base_url: String,
    /// API key appended as the `apikey` query parameter.
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Panel API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelConfig {
    /// Panel base URL, e.g. `https://panel.example.com`.
    #[serde(default)]
    pub base_url: Option<String>,
    /// Environment variable holding the application API key.
    #[serde(default = "default_panel_key_env")]
    pub api_key_env: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_retry_count() -> u32 {
    3
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_user_agent() -> String {
    concat!("botkit/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_window_ms() -> u64 {
    10_000
}

fn default_hold_delay_ms() -> u64 {
    3_000
}

fn default_scraper_url() -> String {
    "https://scraper.example.com/api".to_string()
}

fn default_panel_key_env() -> String {
    "BOTKIT_PANEL_API_KEY".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            cooldown: CooldownConfig::default(),
            scraper: ScraperConfig::default(),
            panel: PanelConfig::default(),
            log_level: default_log_level(),
        }
    }
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            retry_count: default_retry_count(),
            timeout_ms: default_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl FetchConfig {
    /// Per-attempt timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for CooldownConfig {
    fn default() -> Self {
        Self {
            window_ms: default_window_ms(),
            hold_delay_ms: default_hold_delay_ms(),
        }
    }
}

impl CooldownConfig {
    /// Total cooldown window.
    pub fn window(&self) -> Duration {
        Duration::from_millis(self.window_ms)
    }

    /// Default `hold` delay.
    pub fn hold_delay(&self) -> Duration {
        Duration::from_millis(self.hold_delay_ms)
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: default_scraper_url(),
            api_key: None,
        }
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            api_key_env: default_panel_key_env(),
        }
    }
}

impl PanelConfig {
    /// Reads the panel API key from the configured environment variable.
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}

impl Config {
    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("botkit")
            .join("config.json")
    }

    /// Loads configuration from the default path.
    pub fn load() -> Result<Self, CoreError> {
        Self::load_from(&Self::default_path())
    }

    /// Loads configuration from a specific path.
    ///
    /// A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, CoreError> {
        if !path.exists() {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;

        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Saves configuration to the default path.
    pub fn save(&self) -> Result<(), CoreError> {
        self.save_to(&Self::default_path())
    }

    /// Saves configuration to a specific path.
    pub fn save_to(&self, path: &Path) -> Result<(), CoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        info!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Checks values serde cannot reject on its own.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.fetch.retry_count == 0 {
            return Err(CoreError::InvalidConfig(
                "fetch.retry_count must be at least 1".to_string(),
            ));
        }
        if self.fetch.timeout_ms == 0 {
            return Err(CoreError::InvalidConfig(
                "fetch.timeout_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
