//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::dashboard::{DashboardSettings, UploadPolicy};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub monitor: MonitorConfig,

    #[serde(default)]
    pub notices: NoticeConfig,

    #[serde(default)]
    pub upload: UploadConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Analytics backend connection
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}

fn default_request_timeout() -> u64 {
    10
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Snapshot polling
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_error_threshold")]
    pub error_threshold: u32,
}

fn default_poll_interval() -> u64 {
    500
}

fn default_error_threshold() -> u32 {
    3
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval(),
            error_threshold: default_error_threshold(),
        }
    }
}

/// Timed UI effects
#[derive(Debug, Clone, Deserialize)]
pub struct NoticeConfig {
    #[serde(default = "default_success_hide")]
    pub success_hide_ms: u64,

    #[serde(default = "default_signal_confirm")]
    pub signal_confirm_ms: u64,
}

fn default_success_hide() -> u64 {
    3000
}

fn default_signal_confirm() -> u64 {
    2000
}

impl Default for NoticeConfig {
    fn default() -> Self {
        Self {
            success_hide_ms: default_success_hide(),
            signal_confirm_ms: default_signal_confirm(),
        }
    }
}

/// Client-side upload checks
#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_max_bytes")]
    pub max_bytes: u64,

    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

fn default_max_bytes() -> u64 {
    UploadPolicy::default().max_bytes
}

fn default_allowed_extensions() -> Vec<String> {
    UploadPolicy::default().allowed_extensions
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("traffic-dashboard").join("config.toml")),
            Some(PathBuf::from("/etc/traffic-dashboard/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("TRAFFIC_DASHBOARD_URL") {
            self.server.base_url = url;
        }
        if let Ok(timeout) = std::env::var("TRAFFIC_DASHBOARD_TIMEOUT_SECS") {
            if let Ok(t) = timeout.parse() {
                self.server.request_timeout_secs = t;
            }
        }
        if let Ok(poll) = std::env::var("TRAFFIC_DASHBOARD_POLL_MS") {
            if let Ok(p) = poll.parse() {
                self.monitor.poll_interval_ms = p;
            }
        }

        if let Ok(level) = std::env::var("TRAFFIC_DASHBOARD_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("TRAFFIC_DASHBOARD_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Polling period; never zero
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.monitor.poll_interval_ms.max(1))
    }

    /// Runtime-agnostic settings for the dashboard reducer
    pub fn dashboard_settings(&self) -> DashboardSettings {
        DashboardSettings {
            error_threshold: self.monitor.error_threshold,
            success_notice_ttl: Duration::from_millis(self.notices.success_hide_ms),
            signal_confirm_ttl: Duration::from_millis(self.notices.signal_confirm_ms),
            upload: UploadPolicy {
                max_bytes: self.upload.max_bytes,
                allowed_extensions: self
                    .upload
                    .allowed_extensions
                    .iter()
                    .map(|ext| ext.trim_start_matches('.').to_ascii_lowercase())
                    .collect(),
            },
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Traffic Dashboard Configuration
#
# Environment variables override these settings:
# - TRAFFIC_DASHBOARD_URL
# - TRAFFIC_DASHBOARD_TIMEOUT_SECS
# - TRAFFIC_DASHBOARD_POLL_MS
# - TRAFFIC_DASHBOARD_LOG_LEVEL
# - TRAFFIC_DASHBOARD_LOG_FORMAT

[server]
# Base URL of the traffic analytics backend
base_url = "http://127.0.0.1:5000"

# Per-request timeout in seconds
request_timeout_secs = 10

[monitor]
# Snapshot polling interval (ms)
poll_interval_ms = 500

# Consecutive snapshot failures before the status badge shows "Error"
error_threshold = 3

[notices]
# How long success messages stay visible (ms)
success_hide_ms = 3000

# How long the signal button shows its confirmation (ms)
signal_confirm_ms = 2000

[upload]
# Largest video accepted for upload (bytes)
max_bytes = 524288000

# Accepted video file extensions
allowed_extensions = ["mp4", "avi", "mov", "mkv", "flv", "wmv", "webm", "mp4v"]

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
