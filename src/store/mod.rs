//! Hub data-access subsystem.
//!
//! # Data Flow
//! ```text
//! route handler
//!     → HubStore (async trait object held in AppState)
//!     → MemoryStore (DashMap)
//!     → optional JSON snapshot on disk after each mutation
//! ```
//!
//! # Design Decisions
//! - Handlers only see the trait; tests swap in failing stores
//! - "Absent" is a value (`None` / `false`), never an error
//! - Every error reaching a handler becomes a 500

pub mod memory;

use async_trait::async_trait;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use thiserror::Error;

use crate::hubs::model::{Hub, HubFields, HubId};

pub use memory::MemoryStore;

/// Failure reported by a data-access operation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("hub snapshot could not be encoded: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            StoreError::Io(_) => "storage_io",
            StoreError::Serialization(_) => "serialization",
            StoreError::Unavailable(_) => "unavailable",
        }
    }
}

impl Serialize for StoreError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("StoreError", 2)?;
        s.serialize_field("code", self.code())?;
        s.serialize_field("message", &self.to_string())?;
        s.end()
    }
}

/// Persistence operations for hubs.
#[async_trait]
pub trait HubStore: Send + Sync {
    /// All hubs, ordered by id.
    async fn find(&self) -> Result<Vec<Hub>, StoreError>;

    async fn find_by_id(&self, id: HubId) -> Result<Option<Hub>, StoreError>;

    /// Insert a hub and return the stored record.
    async fn add(&self, info: HubFields) -> Result<Hub, StoreError>;

    /// Merge `changes` into an existing hub. `None` when the id is unknown.
    async fn update(&self, id: HubId, changes: HubFields) -> Result<Option<Hub>, StoreError>;

    /// Delete a hub. `false` when nothing was deleted.
    async fn remove(&self, id: HubId) -> Result<bool, StoreError>;
}
