use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// A lightweight HTTP server for serving files from a directory
#[derive(Parser, Debug, Default)]
#[clap(
    version,
    about,
    long_about = "A lightweight HTTP server for serving files from a directory.

Values missing from flags, environment and config file are prompted for
when stdin is a terminal.

Examples:
    ctf-serve --directory /var/www/html --port 8080
    ctf-serve -d /tmp
    DIRECTORY=/srv/share PORT=9000 ctf-serve --no-prompt"
)]
pub struct Options {
    /// Directory to serve files from
    #[arg(short, long, env = "DIRECTORY")]
    pub directory: Option<PathBuf>,

    /// IP address to bind to
    #[arg(short, long, env = "IP")]
    pub ip: Option<String>,

    /// Port number to use
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,

    /// Config file (TOML); ctf-serve.toml is read when present
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Number of runtime worker threads (default: CPU cores)
    #[arg(long)]
    pub workers: Option<usize>,

    /// Never prompt; fall back to defaults for missing values
    #[arg(long)]
    pub no_prompt: bool,

    /// Skip the startup banner
    #[arg(long)]
    pub no_banner: bool,

    /// Logging verbosity (-v debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}
