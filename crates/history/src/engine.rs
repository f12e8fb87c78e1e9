//! The history engine facade.
//!
//! `HistoryEngine` is the single object the editor shell talks to. It owns
//! the renderer collaborator, the bounded store, and the batch scheduler,
//! and wires them together: change notifications debounce into committed
//! snapshots, navigation flushes pending edits first, and restoration is
//! guarded against re-entrant capture.

use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use slate_export::HistoryPayload;
use slate_model::{ChangeKind, ChangeRecord, OperationInfo, Snapshot};

use crate::batch::BatchScheduler;
use crate::capture::capture;
use crate::config::HistoryConfig;
use crate::error::HistoryResult;
use crate::renderer::Renderer;
use crate::restore::{restore, RestoreReport};
use crate::store::HistoryStore;

/// Result of a navigation or import: the snapshot now current, and how its
/// restoration onto the renderer went. A partial restore still advances the
/// cursor; the report carries what could not be recreated.
#[derive(Clone, Debug)]
pub struct RestoreOutcome {
    pub snapshot: Snapshot,
    pub report: RestoreReport,
}

/// Bounded, navigable editing history over a live document surface.
pub struct HistoryEngine<R: Renderer> {
    renderer: R,
    store: HistoryStore,
    scheduler: BatchScheduler,
    config: HistoryConfig,
    /// Re-entrancy guard: change notifications arriving while a restore is
    /// applying are echoes of the restore itself, not user edits.
    is_restoring: bool,
}

impl<R: Renderer> HistoryEngine<R> {
    /// Attach to a live document: captures the synthetic initial snapshot
    /// as the history baseline.
    pub fn attach(renderer: R, config: HistoryConfig) -> Self {
        let initial = capture(&renderer, OperationInfo::single(ChangeKind::Initial, None));
        let store = HistoryStore::new(initial, config.max_entries);
        let scheduler = BatchScheduler::new(config.quiet_period);
        info!(
            max_entries = config.max_entries,
            quiet_period_ms = config.quiet_period.as_millis() as u64,
            "History engine attached"
        );
        Self {
            renderer,
            store,
            scheduler,
            config,
            is_restoring: false,
        }
    }

    /// Record one change notification into the pending batch.
    ///
    /// May be called at keystroke frequency; nothing is captured until the
    /// quiet period elapses or a checkpoint forces a flush. Suppressed while
    /// a restore is applying.
    pub fn notify_change(&mut self, change: ChangeRecord) {
        if self.is_restoring {
            debug!(kind = ?change.kind, "Change notification suppressed: restore in progress");
            return;
        }
        self.scheduler.notify(change);
    }

    /// Event-loop poll: commits the pending batch if its quiet period has
    /// elapsed. Returns whether a commit happened.
    pub fn tick(&mut self) -> bool {
        match self.scheduler.take_if_due(Instant::now()) {
            Some(batch) => {
                self.commit_batch(batch);
                true
            }
            None => false,
        }
    }

    /// Force-commit the pending batch immediately (e.g. on focus loss).
    /// No-op when nothing is pending.
    pub fn checkpoint(&mut self) {
        if let Some(batch) = self.scheduler.take() {
            self.commit_batch(batch);
        }
    }

    /// Step back one entry. Flushes the pending batch first, so in-flight
    /// edits become the state being navigated away from.
    pub fn undo(&mut self) -> HistoryResult<RestoreOutcome> {
        self.checkpoint();
        let snapshot = self.store.undo()?.clone();
        Ok(self.apply(snapshot))
    }

    /// Step forward one entry. Flushes the pending batch first.
    pub fn redo(&mut self) -> HistoryResult<RestoreOutcome> {
        self.checkpoint();
        let snapshot = self.store.redo()?.clone();
        Ok(self.apply(snapshot))
    }

    /// Jump to an absolute history index. Flushes the pending batch first.
    pub fn go_to_state(&mut self, index: usize) -> HistoryResult<RestoreOutcome> {
        self.checkpoint();
        let snapshot = self.store.go_to(index)?.clone();
        Ok(self.apply(snapshot))
    }

    pub fn can_undo(&self) -> bool {
        self.store.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.store.can_redo()
    }

    /// Number of committed entries.
    pub fn entry_count(&self) -> usize {
        self.store.len()
    }

    /// Index of the current entry.
    pub fn cursor(&self) -> usize {
        self.store.cursor()
    }

    /// The snapshot currently pointed at, without restoring it.
    pub fn current(&self) -> &Snapshot {
        self.store.current()
    }

    /// Whether changes are buffered but not yet committed.
    pub fn has_pending_changes(&self) -> bool {
        self.scheduler.has_pending()
    }

    /// Time until the pending batch commits, for host poll scheduling.
    pub fn next_tick_in(&self) -> Option<Duration> {
        self.scheduler.time_until_due(Instant::now())
    }

    /// Whether a restore is currently applying (captures are suppressed).
    pub fn is_restoring(&self) -> bool {
        self.is_restoring
    }

    /// Reset history to a single entry holding the current live state.
    /// Pending changes are discarded, not committed: they are part of the
    /// state the fresh baseline captures anyway.
    pub fn clear(&mut self) {
        self.scheduler.discard();
        let current = capture(
            &self.renderer,
            OperationInfo::single(ChangeKind::Clear, None),
        );
        self.store.clear(current);
        info!("History reset to current state");
    }

    /// Export the full history as a versioned JSON payload. Flushes the
    /// pending batch first so no in-flight edit is silently dropped.
    pub fn export_history(&mut self) -> HistoryResult<String> {
        self.checkpoint();
        let (entries, cursor) = self.store.export_snapshots();
        let payload = HistoryPayload::new(entries, cursor);
        Ok(slate_export::to_json_string(&payload)?)
    }

    /// Replace the history from an exported payload and restore its current
    /// snapshot onto the renderer.
    ///
    /// Validation is atomic: a malformed or incompatible payload leaves
    /// history, cursor, and document untouched.
    pub fn import_history(&mut self, json: &str) -> HistoryResult<RestoreOutcome> {
        let payload = slate_export::from_json_string(json)?;
        // Pending edits describe the document being replaced.
        self.scheduler.discard();

        let cursor = payload.cursor;
        self.store.replace(payload.entries, cursor);
        let snapshot = self.store.current().clone();
        info!(
            entries = self.store.len(),
            cursor = self.store.cursor(),
            "History imported"
        );
        Ok(self.apply(snapshot))
    }

    /// Runtime re-bound of the history depth.
    pub fn set_max_entries(&mut self, max: usize) {
        self.store.set_max_entries(max);
    }

    /// Rough memory footprint of the stored history, in bytes.
    pub fn estimated_size(&self) -> usize {
        self.store.estimated_size()
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    /// The live document surface, for reads.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The live document surface, for edits. Mutations here are invisible
    /// to history until a matching [`notify_change`](Self::notify_change).
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Capture the live document and commit it under the batch's operation
    /// info.
    fn commit_batch(&mut self, batch: Vec<ChangeRecord>) {
        if self.is_restoring {
            // The flush paths all run outside restore; a batch surfacing
            // here would be an echo of restoration.
            warn!("Dropping batch committed during restore");
            return;
        }
        let operation = OperationInfo::from_changes(batch);
        let snapshot = capture(&self.renderer, operation);
        self.store.commit(snapshot, &self.config);
    }

    /// Restore a snapshot onto the renderer with the re-entrancy guard held.
    fn apply(&mut self, snapshot: Snapshot) -> RestoreOutcome {
        self.is_restoring = true;
        let report = restore(&mut self.renderer, &snapshot);
        self.is_restoring = false;

        if !report.is_complete() {
            warn!(%report, "Restore completed partially");
        }

        RestoreOutcome { snapshot, report }
    }
}
