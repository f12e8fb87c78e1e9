//! `slate-history` -- Bounded, navigable undo/redo engine for Slate documents.
//!
//! This crate provides:
//!
//! - **`HistoryEngine`**: The public facade the editor shell talks to
//!   (`notify_change`, `tick`, `checkpoint`, `undo`, `redo`, `go_to_state`,
//!   export/import).
//! - **`HistoryStore`**: Bounded, ordered sequence of committed snapshots
//!   plus the current cursor; owns navigation and eviction.
//! - **`BatchScheduler`**: Debounces bursts of change notifications into one
//!   committed entry per quiet period.
//! - **`capture` / `restore`**: Move document state between the live
//!   renderer surface and immutable `Snapshot` values.
//! - **`compact`**: Post-commit merging of low-value adjacent entries.
//! - **`Renderer`**: The collaborator trait any host surface implements,
//!   with `MemoryRenderer` as the in-memory reference implementation.
//!
//! # Architecture
//!
//! ```text
//! editor shell
//!   └── notify_change() ──► BatchScheduler (quiet-period debounce)
//!                             └── flush ──► capture() ──► HistoryStore.commit()
//!                                                           └── compact()
//!   └── undo()/redo()/go_to_state() ──► HistoryStore ──► restore() ──► Renderer
//! ```
//!
//! Single-threaded, cooperative model: nothing blocks, nothing locks. The
//! only timer is the scheduler's deadline, polled via [`HistoryEngine::tick`]
//! from the host event loop.

pub mod batch;
pub mod capture;
pub mod compact;
pub mod config;
pub mod engine;
pub mod error;
pub mod memory;
pub mod renderer;
pub mod restore;
pub mod store;

// Re-export primary types at crate root for convenience.
pub use batch::BatchScheduler;
pub use capture::capture;
pub use config::HistoryConfig;
pub use engine::{HistoryEngine, RestoreOutcome};
pub use error::{HistoryError, HistoryResult};
pub use memory::MemoryRenderer;
pub use renderer::{ElementRejected, ElementSeed, Renderer};
pub use restore::{restore, RestoreFailure, RestoreReport};
pub use store::{HistoryEntry, HistoryStore};
