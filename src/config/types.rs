// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub serve: ServeConfig,
    pub performance: PerformanceConfig,
    pub logging: LoggingConfig,
}

/// Listener configuration
///
/// `host` and `port` stay `None` until a flag, variable, config file or
/// interactive prompt provides them.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ServerConfig {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub workers: Option<usize>,
}

/// What gets served
#[derive(Debug, Deserialize, Clone)]
pub struct ServeConfig {
    /// Served root directory
    pub directory: Option<PathBuf>,
    /// Directory holding the listing icons
    pub icons_dir: PathBuf,
    /// URL prefix the icons are served under (e.g. `/icons/`)
    pub icons_route: String,
    /// Listing template file; the embedded template is used when unset
    #[serde(default)]
    pub template: Option<PathBuf>,
}

/// Connection handling
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive: bool,
    /// Seconds a client may take to send request headers (idle keep-alive
    /// included); `0` disables it. Response bodies are never timed out
    pub connection_timeout: u64,
    pub max_connections: Option<u64>,
    /// How long shutdown waits for in-flight requests, in seconds
    pub shutdown_timeout: u64,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}
