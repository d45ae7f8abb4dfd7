//! CLI error types with miette diagnostics.
//!
//! Every fatal error maps to exit code 1; usage errors are exit 2 via clap.

use miette::Diagnostic;
use thiserror::Error;

/// Exit codes for process termination. Success is the implicit 0.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Discovery ────────────────────────────────────────────────────
    #[error("Could not find Syncthing config.xml")]
    #[diagnostic(
        code(syndash::config_not_found),
        help(
            "Searched ~/.local/state/syncthing, ~/.config/syncthing,\n\
             /var/lib/syncthing, and ~/Library/Application Support/Syncthing.\n\
             Pass --config <PATH>, or --api-key to skip config discovery."
        )
    )]
    ConfigNotFound,

    #[error("Could not read {path}")]
    #[diagnostic(code(syndash::config_unreadable))]
    ConfigUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("No API key found in {path}")]
    #[diagnostic(
        code(syndash::no_api_key),
        help(
            "Check the <gui><apikey> element in config.xml,\n\
             or pass the key directly with --api-key / SYNDASH_API_KEY."
        )
    )]
    NoApiKey { path: String },

    // ── Client construction ──────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(syndash::api),
        help("Check the GUI URL and that the API key matches Syncthing's settings.")
    )]
    Api(#[from] syndash_api::Error),

    // ── Aggregation ──────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(
        code(syndash::query),
        help(
            "Check that Syncthing is running and reachable at the GUI URL.\n\
             Try: syndash -v, or curl -H 'X-API-Key: <key>' <url>/rest/system/status"
        )
    )]
    Query(#[from] syndash_core::CoreError),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    ///
    /// Every fatal error is exit 1; clap owns usage errors (exit 2).
    pub fn exit_code(&self) -> i32 {
        exit_code::GENERAL
    }
}
