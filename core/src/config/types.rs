use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub tui: TuiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the store API, without the `/api` suffix.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default)]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default = "default_logging_file")]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "bookstall_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Optional directory for log files. If empty or unset, uses OS temp dir.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_file() -> bool {
    true
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: false,
            file: default_logging_file(),
            level: default_logging_level(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TuiConfig {
    /// Render tick while idle, in milliseconds.
    #[serde(default = "default_update_interval_ms")]
    pub update_interval_ms: u64,

    /// How long transient status-line messages stay visible.
    #[serde(default = "default_status_ttl_ms")]
    pub status_ttl_ms: u64,

    /// Artificial delay of the simulated checkout.
    #[serde(default = "default_checkout_delay_ms")]
    pub checkout_delay_ms: u64,
}

fn default_update_interval_ms() -> u64 {
    120
}

fn default_status_ttl_ms() -> u64 {
    4_000
}

fn default_checkout_delay_ms() -> u64 {
    2_000
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            update_interval_ms: default_update_interval_ms(),
            status_ttl_ms: default_status_ttl_ms(),
            checkout_delay_ms: default_checkout_delay_ms(),
        }
    }
}
