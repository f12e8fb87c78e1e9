//! Error types for history navigation and import (thiserror-based).
//!
//! Every failure crosses the public API as an explicit `Result` value; the
//! engine never panics across the boundary, since the calling UI must stay
//! responsive regardless of history failures.

use thiserror::Error;

/// Errors that can occur during history navigation and import.
#[derive(Error, Debug)]
pub enum HistoryError {
    /// `undo` called with no earlier entry to return to.
    #[error("Nothing to undo")]
    NothingToUndo,

    /// `redo` called with no later entry to return to.
    #[error("Nothing to redo")]
    NothingToRedo,

    /// `go_to_state` called with an index outside the stored range.
    #[error("History index {index} out of range (0..{len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// Export/import payload was malformed or incompatible; on import the
    /// history is left unchanged.
    #[error("History payload error: {0}")]
    Payload(#[from] slate_export::ExportError),
}

/// Convenience Result type for history operations.
pub type HistoryResult<T> = Result<T, HistoryError>;
