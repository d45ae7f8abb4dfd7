//! syndash: one-shot status dashboard for a local Syncthing instance.

mod cli;
mod discover;
mod error;
mod format;
mod render;

use std::sync::Arc;

use clap::Parser;
use secrecy::SecretString;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use syndash_api::{SyncthingClient, TransportConfig};
use syndash_core::Snapshot;

use crate::cli::{Cli, should_color};
use crate::error::CliError;

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve the GUI base URL and API key: flags first, then discovery.
fn resolve_endpoint(cli: &Cli) -> Result<(String, SecretString), CliError> {
    let api_key = match &cli.api_key {
        Some(key) => SecretString::from(key.clone()),
        None => {
            let path = match &cli.config {
                Some(path) => path.clone(),
                None => discover::find_config_path().ok_or(CliError::ConfigNotFound)?,
            };
            debug!(path = %path.display(), "reading API key from config");
            discover::api_key_from_config(&path)?
        }
    };

    let url = match &cli.url {
        Some(url) => url.clone(),
        None => discover::discover_base_url(discover::GUI_PORT),
    };
    debug!(url, "resolved GUI endpoint");

    Ok((url, api_key))
}

async fn run(cli: &Cli) -> Result<(), CliError> {
    let color = should_color(&cli.color);
    let (url, api_key) = resolve_endpoint(cli)?;

    let transport = TransportConfig {
        accept_invalid_certs: cli.insecure,
    };
    let client = Arc::new(SyncthingClient::from_api_key(&url, &api_key, &transport)?);

    let snapshot = Snapshot::fetch(&client).await?;

    for warning in &snapshot.warnings {
        eprintln!("Warning: {warning}");
    }
    if !cli.quiet {
        print!("{}", render::render_dashboard(&snapshot, color));
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(&cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}
