//! `slate-model` -- Document snapshot data model for the Slate history engine.
//!
//! This crate defines the pure-data representation of one document state:
//!
//! - **`ElementRecord`**: One node of the document tree (content, styles,
//!   position, attributes).
//! - **`Snapshot`**: An immutable, total description of the whole document at
//!   one point in history. Restoring a snapshot never requires consulting any
//!   other snapshot.
//! - **`OperationInfo`** / **`ChangeRecord`**: Classification of the edit that
//!   produced a snapshot, including the coalesced change list for batches.
//! - **`ViewState`**: Opaque viewport state (zoom, grid snap) carried through
//!   history but never interpreted by the engine.
//!
//! All types are plain serde-serializable values with no behavior beyond
//! validation and comparison helpers; capture, storage, and restore live in
//! `slate-history`.

pub mod element;
pub mod snapshot;

// Re-export primary types at crate root for convenience.
pub use element::{ElementId, ElementKind, ElementRecord, Position, StyleMap};
pub use snapshot::{ChangeKind, ChangeRecord, OperationInfo, Snapshot, ViewState};
