// Shared transport configuration for building reqwest::Client instances.
//
// The per-request timeout and the identifying User-Agent are fixed: the
// Syncthing GUI endpoint is usually a single local process, and callers
// must not be able to stack longer timeouts on top of it.

use std::time::Duration;

/// Fixed per-request timeout applied to every API call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Identifying User-Agent sent with every request.
pub const USER_AGENT: &str = concat!("syndash/", env!("CARGO_PKG_VERSION"));

/// Transport configuration for building HTTP clients.
#[derive(Debug, Clone, Default)]
pub struct TransportConfig {
    /// Accept any TLS certificate (for HTTPS GUIs with self-signed certs).
    pub accept_invalid_certs: bool,
}

impl TransportConfig {
    /// Build a `reqwest::Client` with the given default headers.
    pub fn build_client(
        &self,
        headers: reqwest::header::HeaderMap,
    ) -> Result<reqwest::Client, crate::error::Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .default_headers(headers);

        if self.accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        Ok(builder.build()?)
    }
}
