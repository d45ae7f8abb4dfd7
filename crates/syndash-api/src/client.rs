// Hand-crafted async HTTP client for the Syncthing REST API.
//
// Base path: /rest/
// Auth: X-API-Key header

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::Error;
use crate::transport::TransportConfig;
use crate::types::{Completion, Connections, Device, Folder, SystemStatus};

/// Async client for the Syncthing REST API.
///
/// Holds only the immutable base URL and the pre-authenticated HTTP
/// client; safe to share across concurrent tasks behind an `Arc`.
pub struct SyncthingClient {
    http: reqwest::Client,
    base_url: Url,
}

impl SyncthingClient {
    // ── Constructors ─────────────────────────────────────────────────

    /// Build from a GUI base URL, API key, and transport config.
    ///
    /// Injects `X-API-Key` as a sensitive default header on every request.
    pub fn from_api_key(
        base_url: &str,
        api_key: &secrecy::SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let mut headers = HeaderMap::new();
        let mut key_value = HeaderValue::from_str(api_key.expose_secret())
            .map_err(|e| Error::InvalidApiKey(e.to_string()))?;
        key_value.set_sensitive(true);
        headers.insert("X-API-Key", key_value);

        let http = transport.build_client(headers)?;
        let base_url = Self::normalize_base_url(base_url)?;

        Ok(Self { http, base_url })
    }

    /// Wrap an existing `reqwest::Client` (caller manages auth headers).
    pub fn from_reqwest(base_url: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Self::normalize_base_url(base_url)?;
        Ok(Self { http, base_url })
    }

    /// Base URL with a guaranteed trailing `/rest/` path.
    fn normalize_base_url(raw: &str) -> Result<Url, Error> {
        let mut url = Url::parse(raw)?;
        let path = url.path().trim_end_matches('/').to_owned();
        url.set_path(&format!("{path}/rest/"));
        Ok(url)
    }

    // ── HTTP plumbing ────────────────────────────────────────────────

    /// Join a relative path (e.g. `"system/status"`) onto the base URL.
    fn url(&self, path: &str) -> Url {
        // base_url always ends with `/rest/`, so joining `system/…` works.
        self.base_url
            .join(path)
            .expect("path should be valid relative URL")
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        let url = self.url(path);
        debug!("GET {url}");

        let resp = self.http.get(url).send().await?;
        Self::handle_response(resp).await
    }

    async fn get_with_params<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<T, Error> {
        let url = self.url(path);
        debug!("GET {url} params={params:?}");

        let resp = self.http.get(url).query(params).send().await?;
        Self::handle_response(resp).await
    }

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await?;
            serde_json::from_str(&body).map_err(|e| {
                let preview: String = body.chars().take(200).collect();
                Error::Deserialization {
                    message: format!("{e} (body preview: {preview:?})"),
                    body,
                }
            })
        } else {
            let message = resp.text().await.unwrap_or_default();
            Err(Error::Api {
                status: status.as_u16(),
                message: if message.is_empty() {
                    status.to_string()
                } else {
                    message.trim().to_owned()
                },
            })
        }
    }

    // ━━ Public API ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

    /// `GET /rest/system/status` — identity and health of the local device.
    pub async fn system_status(&self) -> Result<SystemStatus, Error> {
        self.get("system/status").await
    }

    /// `GET /rest/config/devices` — all configured devices.
    pub async fn devices(&self) -> Result<Vec<Device>, Error> {
        self.get("config/devices").await
    }

    /// `GET /rest/config/folders` — all configured folders.
    pub async fn folders(&self) -> Result<Vec<Folder>, Error> {
        self.get("config/folders").await
    }

    /// `GET /rest/system/connections` — connection table and byte totals.
    pub async fn connections(&self) -> Result<Connections, Error> {
        self.get("system/connections").await
    }

    /// `GET /rest/db/completion?device=<id>[&folder=<id>]`
    ///
    /// Without a folder filter this reports overall completion for the
    /// device across all shared folders.
    pub async fn completion(
        &self,
        device_id: &str,
        folder_id: Option<&str>,
    ) -> Result<Completion, Error> {
        match folder_id {
            Some(folder) => {
                self.get_with_params("db/completion", &[("device", device_id), ("folder", folder)])
                    .await
            }
            None => {
                self.get_with_params("db/completion", &[("device", device_id)])
                    .await
            }
        }
    }
}
