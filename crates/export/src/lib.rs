//! `slate-export` -- Versioned JSON history payload for the Slate engine.
//!
//! The engine defines an export/import payload format but performs no I/O
//! itself; actual persistence (file system, network) is the caller's job.
//! This crate handles:
//!
//! - **Export**: Serialize a `HistoryPayload` to JSON (pretty or compact).
//! - **Import**: Parse, version-check, migrate, and structurally validate a
//!   payload. Any failure rejects the entire import; a payload that parses
//!   successfully is safe to install into a history store as-is.
//!
//! # Usage
//!
//! ```rust
//! use slate_export::{from_json_string, to_json_string, HistoryPayload, PAYLOAD_VERSION};
//! # use slate_model::{ChangeKind, OperationInfo, Snapshot, StyleMap, ViewState};
//! # let snapshot = Snapshot {
//! #     captured_at_ms: 0,
//! #     operation: OperationInfo::single(ChangeKind::Initial, None),
//! #     elements: Vec::new(),
//! #     root_style_props: StyleMap::new(),
//! #     selected_id: None,
//! #     view_state: ViewState::default(),
//! # };
//!
//! let payload = HistoryPayload::new(vec![snapshot], 0);
//! let json = to_json_string(&payload).unwrap();
//!
//! let back = from_json_string(&json).unwrap();
//! assert_eq!(back.version, PAYLOAD_VERSION);
//! assert_eq!(back.cursor, 0);
//! ```

pub mod error;
pub mod export;
pub mod import;
pub mod payload;

// Re-export primary API at crate root.
pub use error::{ExportError, ExportResult};
pub use export::{to_json_string, to_json_string_compact};
pub use import::from_json_string;
pub use payload::{HistoryPayload, PAYLOAD_VERSION};
