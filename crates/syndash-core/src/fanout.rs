//! Completion-query fan-out: derive the task set, dispatch it through
//! the limiter, and fan results into a shared keyed map.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::task::JoinSet;
use tracing::debug;

use syndash_api::SyncthingClient;
use syndash_api::types::{Completion, Connections, Device, Folder};

use crate::limiter::Limiter;

/// Key for one completion query: a device, optionally scoped to a folder.
///
/// `folder: None` means overall completion for the device across all
/// shared folders.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompletionKey {
    pub device: String,
    pub folder: Option<String>,
}

impl CompletionKey {
    pub fn for_folder(device: impl Into<String>, folder: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            folder: Some(folder.into()),
        }
    }

    pub fn overall(device: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            folder: None,
        }
    }
}

/// One task per (folder × non-local member device) pair.
pub fn folder_completion_tasks(folders: &[Folder], local_id: &str) -> Vec<CompletionKey> {
    let mut tasks = Vec::new();
    for folder in folders {
        for member in &folder.devices {
            if member.device_id != local_id {
                tasks.push(CompletionKey::for_folder(&member.device_id, &folder.id));
            }
        }
    }
    tasks
}

/// One overall-completion task per remote device currently connected.
///
/// With no connection table there is nothing to scope the queries to,
/// so no tasks are produced and every device renders as unknown.
pub fn device_completion_tasks(
    devices: &[Device],
    local_id: &str,
    connections: Option<&Connections>,
) -> Vec<CompletionKey> {
    let Some(connections) = connections else {
        return Vec::new();
    };

    devices
        .iter()
        .filter(|d| d.device_id != local_id)
        .filter(|d| {
            connections
                .connections
                .get(&d.device_id)
                .is_some_and(|c| c.connected)
        })
        .map(|d| CompletionKey::overall(&d.device_id))
        .collect()
}

/// Dispatch every task as an independent unit of work and join on all
/// of them.
///
/// Each task acquires a limiter slot, issues its completion query
/// outside any lock, and on success inserts under its key; the mutex
/// guards only the insert. A failed task writes nothing — it is not
/// retried and does not abort its siblings. The result map is created
/// here and owned by this invocation.
pub async fn run(
    client: &Arc<SyncthingClient>,
    limiter: &Arc<Limiter>,
    tasks: Vec<CompletionKey>,
) -> HashMap<CompletionKey, Completion> {
    let results = Arc::new(Mutex::new(HashMap::with_capacity(tasks.len())));
    let mut set = JoinSet::new();

    for key in tasks {
        let client = Arc::clone(client);
        let limiter = Arc::clone(limiter);
        let results = Arc::clone(&results);

        set.spawn(async move {
            let _permit = limiter.acquire().await;

            match client.completion(&key.device, key.folder.as_deref()).await {
                Ok(completion) => {
                    results
                        .lock()
                        .expect("completion map lock poisoned")
                        .insert(key, completion);
                }
                Err(e) => {
                    debug!(device = %key.device, folder = ?key.folder, error = %e,
                        "completion query failed, dropping entry");
                }
            }
        });
    }

    // Join barrier: no result is visible to the merge until every task
    // has finished.
    while set.join_next().await.is_some() {}

    let mut guard = results.lock().expect("completion map lock poisoned");
    std::mem::take(&mut *guard)
}
