//! History payload data model -- the engine's export/import wire shape.

use serde::{Deserialize, Serialize};

use slate_model::Snapshot;

/// Current history payload format version.
pub const PAYLOAD_VERSION: u32 = 1;

/// The export/import payload: every committed snapshot plus the cursor.
///
/// Plain JSON, no binary encoding. The `version` field gates forward
/// compatibility on import.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryPayload {
    /// Payload format version.
    pub version: u32,
    /// Committed snapshots, oldest first.
    pub entries: Vec<Snapshot>,
    /// Index of the current snapshot within `entries`.
    pub cursor: usize,
}

impl HistoryPayload {
    /// Create a payload at the current format version.
    pub fn new(entries: Vec<Snapshot>, cursor: usize) -> Self {
        Self {
            version: PAYLOAD_VERSION,
            entries,
            cursor,
        }
    }
}
