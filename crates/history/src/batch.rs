//! Quiet-period batching of change notifications.
//!
//! Raw change notifications arrive at keystroke frequency; committing one
//! history entry per notification would be both slow and useless. The
//! scheduler buffers notifications and hands the batch back once a quiet
//! period passes without further changes, or immediately on an explicit
//! flush.
//!
//! Like the rest of the engine this owns no thread or async task: it keeps
//! an `Instant` deadline that the host event loop polls (`take_if_due`),
//! debounce-style -- every notification re-arms the deadline.

use std::time::{Duration, Instant};

use tracing::debug;

use slate_model::ChangeRecord;

/// Coalesces bursts of change notifications into one pending batch.
#[derive(Debug)]
pub struct BatchScheduler {
    pending: Vec<ChangeRecord>,
    deadline: Option<Instant>,
    quiet_period: Duration,
}

impl BatchScheduler {
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            pending: Vec::new(),
            deadline: None,
            quiet_period,
        }
    }

    /// Record one change and (re)start the quiet-period timer.
    pub fn notify(&mut self, change: ChangeRecord) {
        self.pending.push(change);
        self.deadline = Some(Instant::now() + self.quiet_period);
        debug!(pending = self.pending.len(), "Change buffered");
    }

    /// Take the pending batch if the quiet period has elapsed at `now`.
    ///
    /// An empty buffer never produces a batch, even past the deadline.
    pub fn take_if_due(&mut self, now: Instant) -> Option<Vec<ChangeRecord>> {
        match self.deadline {
            Some(deadline) if now >= deadline => self.take(),
            _ => None,
        }
    }

    /// Take the pending batch unconditionally (checkpoint / pre-navigation
    /// flush). Disarms the timer. Returns `None` when nothing is pending.
    pub fn take(&mut self) -> Option<Vec<ChangeRecord>> {
        self.deadline = None;
        if self.pending.is_empty() {
            return None;
        }
        let batch = std::mem::take(&mut self.pending);
        debug!(changes = batch.len(), "Batch flushed");
        Some(batch)
    }

    /// Whether any changes are waiting to commit.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Number of buffered changes.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Time until the pending batch is due, `Duration::ZERO` if already due,
    /// `None` if nothing is pending. Lets hosts schedule their next poll.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|d| d.saturating_duration_since(now))
    }

    /// Drop the pending batch without committing (document reset paths).
    pub fn discard(&mut self) {
        if !self.pending.is_empty() {
            debug!(discarded = self.pending.len(), "Pending batch discarded");
        }
        self.pending.clear();
        self.deadline = None;
    }
}
