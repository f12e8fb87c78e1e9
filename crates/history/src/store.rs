//! The bounded, ordered history of committed snapshots.
//!
//! Linear history with a cursor: committing while the cursor sits before
//! the newest entry abandons the redo branch. The store is never empty --
//! it is constructed around an initial snapshot and `clear` resets it to a
//! single fresh one -- so undo/redo availability is always answerable.

use std::time::Instant;

use tracing::debug;

use slate_model::Snapshot;

use crate::compact::compact_after_commit;
use crate::config::HistoryConfig;
use crate::error::{HistoryError, HistoryResult};

/// A single committed entry. The `Instant` drives the compactor's time
/// window; the snapshot's own timestamp is display-only.
#[derive(Clone, Debug)]
pub struct HistoryEntry {
    pub snapshot: Snapshot,
    pub committed_at: Instant,
}

impl HistoryEntry {
    fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            committed_at: Instant::now(),
        }
    }
}

/// Bounded, ordered sequence of committed snapshots plus the cursor.
#[derive(Debug)]
pub struct HistoryStore {
    entries: Vec<HistoryEntry>,
    cursor: usize,
    max_entries: usize,
}

impl HistoryStore {
    /// Create a store seeded with the initial document state.
    pub fn new(initial: Snapshot, max_entries: usize) -> Self {
        Self {
            entries: vec![HistoryEntry::new(initial)],
            cursor: 0,
            // A zero bound would make the store unconstructible.
            max_entries: max_entries.max(1),
        }
    }

    /// Commit a new snapshot as the current state.
    ///
    /// Truncates any redo branch, appends, runs the compactor, then evicts
    /// from the front past `max_entries`. An evicted oldest state is
    /// permanently unrecoverable; that loss is accepted by design of the
    /// bound.
    pub fn commit(&mut self, snapshot: Snapshot, config: &HistoryConfig) {
        let abandoned = self.entries.len() - 1 - self.cursor;
        if abandoned > 0 {
            debug!(abandoned, "Discarding redo branch");
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(HistoryEntry::new(snapshot));
        self.cursor = self.entries.len() - 1;

        if config.compaction_enabled {
            self.cursor = compact_after_commit(&mut self.entries, self.cursor, config);
        }

        while self.entries.len() > self.max_entries {
            self.entries.remove(0);
            self.cursor -= 1;
            debug!(entries = self.entries.len(), "Oldest history entry evicted");
        }

        debug!(
            entries = self.entries.len(),
            cursor = self.cursor,
            "Snapshot committed"
        );
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor < self.entries.len() - 1
    }

    /// Step the cursor back and return the now-current snapshot.
    pub fn undo(&mut self) -> HistoryResult<&Snapshot> {
        if !self.can_undo() {
            return Err(HistoryError::NothingToUndo);
        }
        self.cursor -= 1;
        debug!(cursor = self.cursor, "Undo");
        Ok(&self.entries[self.cursor].snapshot)
    }

    /// Step the cursor forward and return the now-current snapshot.
    pub fn redo(&mut self) -> HistoryResult<&Snapshot> {
        if !self.can_redo() {
            return Err(HistoryError::NothingToRedo);
        }
        self.cursor += 1;
        debug!(cursor = self.cursor, "Redo");
        Ok(&self.entries[self.cursor].snapshot)
    }

    /// Jump the cursor to an absolute index and return that snapshot.
    pub fn go_to(&mut self, index: usize) -> HistoryResult<&Snapshot> {
        if index >= self.entries.len() {
            return Err(HistoryError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        self.cursor = index;
        debug!(cursor = self.cursor, "Jumped to history index");
        Ok(&self.entries[self.cursor].snapshot)
    }

    /// Reset to a single fresh entry holding the current live state.
    pub fn clear(&mut self, current: Snapshot) {
        self.entries.clear();
        self.entries.push(HistoryEntry::new(current));
        self.cursor = 0;
        debug!("History cleared");
    }

    /// Install an imported history wholesale. The caller (the engine facade)
    /// is responsible for having validated entries and cursor beforehand.
    pub fn replace(&mut self, snapshots: Vec<Snapshot>, cursor: usize) {
        debug_assert!(!snapshots.is_empty() && cursor < snapshots.len());
        self.entries = snapshots.into_iter().map(HistoryEntry::new).collect();
        self.cursor = cursor.min(self.entries.len() - 1);
        while self.entries.len() > self.max_entries {
            if self.cursor > 0 {
                self.entries.remove(0);
                self.cursor -= 1;
            } else {
                self.entries.pop();
            }
        }
        debug!(
            entries = self.entries.len(),
            cursor = self.cursor,
            "History replaced from import"
        );
    }

    /// The snapshot the cursor points at.
    pub fn current(&self) -> &Snapshot {
        &self.entries[self.cursor].snapshot
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: the store holds at least the baseline entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot at an index, without moving the cursor.
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.entries.get(index).map(|e| &e.snapshot)
    }

    /// All snapshots oldest-first plus the cursor, for export.
    pub fn export_snapshots(&self) -> (Vec<Snapshot>, usize) {
        let snapshots = self.entries.iter().map(|e| e.snapshot.clone()).collect();
        (snapshots, self.cursor)
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    /// Re-bound the store at runtime, trimming oldest-first but never the
    /// current entry.
    pub fn set_max_entries(&mut self, max: usize) {
        self.max_entries = max.max(1);
        while self.entries.len() > self.max_entries {
            if self.cursor > 0 {
                self.entries.remove(0);
                self.cursor -= 1;
            } else {
                self.entries.pop();
            }
        }
    }

    /// Rough memory footprint of all stored snapshots, in bytes.
    pub fn estimated_size(&self) -> usize {
        self.entries
            .iter()
            .map(|e| e.snapshot.estimated_size())
            .sum()
    }
}
