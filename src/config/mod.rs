// Configuration module entry point
// Layers defaults, config file, environment and command line into one Config

mod root;
mod state;
mod types;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::cli::Options;

// Re-export public types
pub use root::ServedRoot;
pub use state::AppState;
pub use types::{Config, LoggingConfig, PerformanceConfig, ServeConfig, ServerConfig};

/// Config file looked up when `--config` is not given; read as `ctf-serve.toml`
pub const DEFAULT_CONFIG_NAME: &str = "ctf-serve";
pub const ENV_PREFIX: &str = "CTF_SERVE";

pub const DEFAULT_DIRECTORY: &str = ".";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

impl Config {
    /// Load configuration for the given command line
    ///
    /// Precedence, lowest first: built-in defaults, config file,
    /// `CTF_SERVE_*` environment (`__` separates sections), command line.
    pub fn load(options: &Options) -> Result<Self, config::ConfigError> {
        let (path, required) = match &options.config {
            Some(path) => (path.clone(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_NAME), false),
        };
        Self::load_from(&path, required, options)
    }

    pub fn load_from(
        config_path: &Path,
        required: bool,
        options: &Options,
    ) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .set_default("serve.icons_dir", "icons")?
            .set_default("serve.icons_route", "/icons/")?
            .set_default("performance.keep_alive", true)?
            .set_default("performance.connection_timeout", 300)?
            .set_default("performance.shutdown_timeout", 10)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .add_source(
                config::File::from(config_path.to_path_buf())
                    .format(config::FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option(
                "serve.directory",
                options
                    .directory
                    .as_ref()
                    .map(|d| d.to_string_lossy().into_owned()),
            )?
            .set_override_option("server.host", options.ip.clone())?
            .set_override_option("server.port", options.port.map(i64::from))?
            .set_override_option(
                "server.workers",
                options.workers.and_then(|w| i64::try_from(w).ok()),
            )?;

        if options.verbose > 0 {
            builder = builder.set_override("logging.level", "debug")?;
        }

        builder.build()?.try_deserialize()
    }

    /// Apply defaults to anything still unset after loading and prompting
    pub fn fill_defaults(&mut self) {
        self.serve
            .directory
            .get_or_insert_with(|| PathBuf::from(DEFAULT_DIRECTORY));
        self.server
            .host
            .get_or_insert_with(|| DEFAULT_HOST.to_string());
        self.server.port.get_or_insert(DEFAULT_PORT);
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        let host = self.server.host.as_deref().unwrap_or(DEFAULT_HOST);
        let port = self.server.port.unwrap_or(DEFAULT_PORT);
        let addr = if host.contains(':') && !host.starts_with('[') {
            // Bare IPv6 literal
            format!("[{host}]:{port}")
        } else {
            format!("{host}:{port}")
        };
        addr.parse()
            .map_err(|e| format!("Invalid address '{addr}': {e}"))
    }

    pub fn served_directory(&self) -> &Path {
        self.serve
            .directory
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_DIRECTORY))
    }
}
