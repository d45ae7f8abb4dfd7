//! Typed response records for the Syncthing REST endpoints.
//!
//! Every field the dashboard does not strictly need is optional or
//! defaulted — the API adds fields between releases, and unknown or
//! missing fields must never fail a decode.

use std::collections::HashMap;

use serde::Deserialize;

// ── /rest/system/status ──────────────────────────────────────────────

/// Identity and health of the local Syncthing instance.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemStatus {
    /// Stable opaque ID of the local device.
    #[serde(rename = "myID")]
    pub my_id: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub os: Option<String>,
    #[serde(default)]
    pub arch: Option<String>,
    /// Uptime in seconds.
    #[serde(default)]
    pub uptime: u64,
    /// Connection listener name → health.
    #[serde(default)]
    pub connection_service_status: HashMap<String, ServiceHealth>,
    /// Discovery mechanism name → health.
    #[serde(default)]
    pub discovery_status: HashMap<String, ServiceHealth>,
}

/// Health of one listener or discovery service; absent error means healthy.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceHealth {
    #[serde(default)]
    pub error: Option<String>,
}

impl ServiceHealth {
    pub fn is_healthy(&self) -> bool {
        self.error.is_none()
    }
}

// ── /rest/config/devices ─────────────────────────────────────────────

/// One configured device.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Device {
    #[serde(rename = "deviceID")]
    pub device_id: String,
    #[serde(default)]
    pub name: Option<String>,
}

// ── /rest/config/folders ─────────────────────────────────────────────

/// One configured folder with the devices that share it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    /// Always includes the local device.
    #[serde(default)]
    pub devices: Vec<FolderDevice>,
}

impl Folder {
    /// Human label, falling back to the folder ID when unset or empty.
    pub fn display_label(&self) -> &str {
        match self.label.as_deref() {
            Some(label) if !label.is_empty() => label,
            _ => &self.id,
        }
    }
}

/// Reference to a device sharing a folder.
#[derive(Debug, Clone, Deserialize)]
pub struct FolderDevice {
    #[serde(rename = "deviceID")]
    pub device_id: String,
}

// ── /rest/system/connections ─────────────────────────────────────────

/// Connection table: per-device state plus process-wide byte totals.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Connections {
    #[serde(default)]
    pub total: ConnectionTotals,
    #[serde(default)]
    pub connections: HashMap<String, ConnectionState>,
}

/// Cumulative transfer totals across all connections.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionTotals {
    #[serde(default)]
    pub in_bytes_total: u64,
    #[serde(default)]
    pub out_bytes_total: u64,
}

/// Connection state of one remote device.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ConnectionState {
    #[serde(default)]
    pub connected: bool,
    #[serde(default)]
    pub paused: bool,
}

// ── /rest/db/completion ──────────────────────────────────────────────

/// Sync completion for one device, optionally scoped to one folder.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Completion {
    /// Percentage complete, 0–100.
    #[serde(default)]
    pub completion: f64,
    #[serde(default)]
    pub need_items: u64,
    #[serde(default)]
    pub need_bytes: u64,
}

impl Completion {
    pub fn is_complete(&self) -> bool {
        self.need_items == 0
    }
}
