//! Clap derive structures for the `syndash` CLI.
//!
//! No subcommands: the tool runs once, prints the dashboard, and exits.

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

/// syndash -- one-shot status dashboard for a local Syncthing instance
#[derive(Debug, Parser)]
#[command(
    name = "syndash",
    version,
    about = "Show folder, device, and connection status for a local Syncthing instance",
    long_about = "Queries the Syncthing REST API once and prints a dashboard of\n\
        folders, per-device sync completion, and connection state.\n\n\
        The GUI address and API key are discovered automatically from the\n\
        local config.xml and listening sockets; flags override discovery."
)]
pub struct Cli {
    /// GUI base URL (discovered from listening sockets when unset)
    #[arg(long, short = 'u', env = "SYNDASH_URL")]
    pub url: Option<String>,

    /// REST API key (read from config.xml when unset)
    #[arg(long, env = "SYNDASH_API_KEY", hide_env = true)]
    pub api_key: Option<String>,

    /// Path to config.xml (searched in standard locations when unset)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Accept self-signed TLS certificates on the GUI endpoint
    #[arg(long, short = 'k')]
    pub insecure: bool,

    /// When to use color output
    #[arg(long, default_value = "auto")]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress the dashboard output (exit status only)
    #[arg(long, short = 'q')]
    pub quiet: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if stdout is an interactive terminal)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

/// Determine whether color output should be enabled.
pub fn should_color(mode: &ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => std::io::stdout().is_terminal() && std::env::var("NO_COLOR").is_err(),
    }
}
