//! Hub record and response envelopes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Store-assigned hub identifier.
pub type HubId = u64;

/// Arbitrary user-supplied hub fields.
pub type HubFields = Map<String, Value>;

/// Keys owned by the store; never taken from request bodies.
pub const RESERVED_KEYS: [&str; 3] = ["id", "created_at", "updated_at"];

/// A single hub record.
///
/// Serializes as a flat object: user fields sit next to `id` and the
/// timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hub {
    pub id: HubId,

    #[serde(flatten)]
    pub fields: HubFields,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Hub {
    /// Build a fresh record stamped with `now`.
    pub fn new(id: HubId, fields: HubFields, now: DateTime<Utc>) -> Self {
        Self {
            id,
            fields: strip_reserved(fields),
            created_at: now,
            updated_at: now,
        }
    }

    /// Shallow-merge `changes` into the record and bump `updated_at`.
    pub fn apply(&mut self, changes: HubFields, now: DateTime<Utc>) {
        for (key, value) in strip_reserved(changes) {
            self.fields.insert(key, value);
        }
        self.updated_at = now;
    }
}

/// Drop store-owned keys from user input.
pub fn strip_reserved(mut fields: HubFields) -> HubFields {
    for key in RESERVED_KEYS {
        fields.remove(key);
    }
    fields
}

/// Parse a path segment into a hub id. Anything else matches no hub.
pub fn parse_id(raw: &str) -> Option<HubId> {
    raw.parse().ok()
}

/// `{"success": true, "hub": ...}`
#[derive(Debug, Serialize)]
pub struct HubEnvelope {
    pub success: bool,
    pub hub: Hub,
}

/// `{"success": true, "updated": ...}`
#[derive(Debug, Serialize)]
pub struct UpdatedEnvelope {
    pub success: bool,
    pub updated: Hub,
}
