//! In-memory hub store with optional JSON snapshot persistence.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::hubs::model::{Hub, HubFields, HubId};
use crate::observability::metrics;
use crate::store::{HubStore, StoreError};

/// A thread-safe hub store.
///
/// Cloning is cheap and clones share the same records.
#[derive(Clone, Default)]
pub struct MemoryStore {
    hubs: Arc<DashMap<HubId, Hub>>,
    /// Last id handed out; the next hub gets `last_id + 1`.
    last_id: Arc<AtomicU64>,
    persistence_path: Option<PathBuf>,
    /// Held across each mutation, its snapshot write and any rollback.
    write_lock: Arc<Mutex<()>>,
}

impl MemoryStore {
    /// Create an empty, non-persistent store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a store backed by a JSON snapshot at `path`.
    ///
    /// A missing file yields an empty store; the file is created on the
    /// first mutation.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let store = Self {
            persistence_path: Some(path.clone()),
            ..Self::default()
        };

        if path.exists() {
            let reader = BufReader::new(File::open(&path)?);
            let hubs: Vec<Hub> = serde_json::from_reader(reader)?;
            let max_id = hubs.iter().map(|h| h.id).max().unwrap_or(0);
            for hub in hubs {
                store.hubs.insert(hub.id, hub);
            }
            store.last_id.store(max_id, Ordering::SeqCst);
            tracing::info!(
                path = %path.display(),
                hubs = store.hubs.len(),
                "Loaded hubs from snapshot"
            );
        }

        metrics::record_store_size(store.hubs.len());
        Ok(store)
    }

    /// Snapshot file, if persistence is enabled.
    pub fn persistence_path(&self) -> Option<&Path> {
        self.persistence_path.as_deref()
    }

    /// Number of stored hubs.
    pub fn len(&self) -> usize {
        self.hubs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hubs.is_empty()
    }

    fn sorted(&self) -> Vec<Hub> {
        let mut hubs: Vec<Hub> = self.hubs.iter().map(|r| r.value().clone()).collect();
        hubs.sort_by_key(|h| h.id);
        hubs
    }

    /// Write the full snapshot: temp file first, then rename over the target.
    ///
    /// Callers hold `write_lock`.
    async fn persist(&self) -> Result<(), StoreError> {
        let Some(path) = &self.persistence_path else {
            return Ok(());
        };

        let snapshot = self.sorted();
        let bytes = serde_json::to_vec_pretty(&snapshot)?;

        let mut tmp = path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        tokio::fs::write(&tmp, bytes).await?;
        tokio::fs::rename(&tmp, path).await?;

        tracing::debug!(path = %path.display(), hubs = snapshot.len(), "Saved hub snapshot");
        Ok(())
    }

    fn record_size(&self) {
        metrics::record_store_size(self.hubs.len());
    }
}

#[async_trait]
impl HubStore for MemoryStore {
    async fn find(&self) -> Result<Vec<Hub>, StoreError> {
        Ok(self.sorted())
    }

    async fn find_by_id(&self, id: HubId) -> Result<Option<Hub>, StoreError> {
        Ok(self.hubs.get(&id).map(|r| r.value().clone()))
    }

    async fn add(&self, info: HubFields) -> Result<Hub, StoreError> {
        let _guard = self.write_lock.lock().await;
        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        let hub = Hub::new(id, info, Utc::now());
        self.hubs.insert(id, hub.clone());

        if let Err(e) = self.persist().await {
            self.hubs.remove(&id);
            return Err(e);
        }

        self.record_size();
        tracing::debug!(hub_id = id, "Hub added");
        Ok(hub)
    }

    async fn update(&self, id: HubId, changes: HubFields) -> Result<Option<Hub>, StoreError> {
        let _guard = self.write_lock.lock().await;
        let (previous, updated) = {
            let Some(mut entry) = self.hubs.get_mut(&id) else {
                return Ok(None);
            };
            let previous = entry.clone();
            entry.apply(changes, Utc::now());
            (previous, entry.clone())
        };

        if let Err(e) = self.persist().await {
            self.hubs.insert(id, previous);
            return Err(e);
        }

        tracing::debug!(hub_id = id, "Hub updated");
        Ok(Some(updated))
    }

    async fn remove(&self, id: HubId) -> Result<bool, StoreError> {
        let _guard = self.write_lock.lock().await;
        let Some((_, removed)) = self.hubs.remove(&id) else {
            return Ok(false);
        };

        if let Err(e) = self.persist().await {
            self.hubs.insert(id, removed);
            return Err(e);
        }

        self.record_size();
        tracing::debug!(hub_id = id, "Hub removed");
        Ok(true)
    }
}
