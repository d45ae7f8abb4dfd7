//! Snapshot merge: four concurrent top-level queries plus the bounded
//! completion fan-outs, assembled into one consistent view per run.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, warn};

use syndash_api::SyncthingClient;
use syndash_api::types::{Completion, Connections, ConnectionState, Device, Folder, SystemStatus};

use crate::error::CoreError;
use crate::fanout::{self, CompletionKey};
use crate::limiter::Limiter;

/// One consistent merged view of the queried data, valid for exactly one
/// render. Never persisted.
#[derive(Debug)]
pub struct Snapshot {
    pub status: SystemStatus,
    pub devices: Vec<Device>,
    pub folders: Vec<Folder>,
    /// `None` when the connections query failed; panels degrade to
    /// "unknown" status instead of aborting the run.
    pub connections: Option<Connections>,
    /// Completion per (device, optional folder). A missing key means the
    /// task was not dispatched or failed — never a zero value.
    pub completions: HashMap<CompletionKey, Completion>,
    /// Non-fatal degradations accumulated while building the snapshot.
    pub warnings: Vec<String>,
}

impl Snapshot {
    /// Query everything and merge it.
    ///
    /// The four top-level queries run as four concurrent units. Failure
    /// of status, devices, or folders is fatal; failure of connections
    /// is recorded as a warning. Both completion fan-outs share one
    /// [`Limiter`] and complete before this returns.
    pub async fn fetch(client: &Arc<SyncthingClient>) -> Result<Self, CoreError> {
        let (status, devices, folders, connections) = tokio::join!(
            client.system_status(),
            client.devices(),
            client.folders(),
            client.connections(),
        );

        let status = status.map_err(CoreError::query("system/status"))?;
        let devices = devices.map_err(CoreError::query("config/devices"))?;
        let folders = folders.map_err(CoreError::query("config/folders"))?;

        let mut warnings = Vec::new();
        let connections = match connections {
            Ok(conns) => Some(conns),
            Err(e) => {
                warn!(error = %e, "connections query failed, status panels degraded");
                warnings.push(format!("could not get connections: {e}"));
                None
            }
        };

        let local_id = status.my_id.clone();
        let mut tasks = fanout::folder_completion_tasks(&folders, &local_id);
        tasks.extend(fanout::device_completion_tasks(
            &devices,
            &local_id,
            connections.as_ref(),
        ));
        debug!(task_count = tasks.len(), "dispatching completion fan-out");

        let limiter = Arc::new(Limiter::new());
        let completions = fanout::run(client, &limiter, tasks).await;

        Ok(Self {
            status,
            devices,
            folders,
            connections,
            completions,
            warnings,
        })
    }

    // ── Accessors ────────────────────────────────────────────────────

    /// ID of the local device; excluded from every remote view.
    pub fn local_id(&self) -> &str {
        &self.status.my_id
    }

    /// All devices except the local one, in listing order.
    pub fn remote_devices(&self) -> impl Iterator<Item = &Device> {
        self.devices
            .iter()
            .filter(|d| d.device_id != self.status.my_id)
    }

    /// Display name of a device, if it is known and named.
    pub fn device_name(&self, device_id: &str) -> Option<&str> {
        self.devices
            .iter()
            .find(|d| d.device_id == device_id)
            .and_then(|d| d.name.as_deref())
            .filter(|name| !name.is_empty())
    }

    /// Connection state of a device, when the table is available.
    pub fn connection(&self, device_id: &str) -> Option<ConnectionState> {
        self.connections
            .as_ref()
            .and_then(|c| c.connections.get(device_id))
            .copied()
    }

    /// Completion for a (device, optional folder) pair, if its task
    /// succeeded.
    pub fn completion(&self, device_id: &str, folder_id: Option<&str>) -> Option<&Completion> {
        self.completions.get(&CompletionKey {
            device: device_id.to_owned(),
            folder: folder_id.map(str::to_owned),
        })
    }
}
