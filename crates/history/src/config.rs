//! Engine configuration: history bounds, debounce timing, compaction tuning.

use std::time::Duration;

/// Default maximum number of history entries.
pub const DEFAULT_MAX_ENTRIES: usize = 50;

/// Default quiet period before a pending batch commits, in milliseconds.
pub const DEFAULT_QUIET_PERIOD_MS: u64 = 1000;

/// Default character-delta threshold below which consecutive content
/// changes to the same element merge into one entry.
pub const DEFAULT_MINOR_CHANGE_CHARS: usize = 10;

/// Default time window within which a run of similar entries collapses,
/// in seconds.
pub const DEFAULT_RUN_WINDOW_SECS: u64 = 5;

/// Tuning knobs for the history engine.
///
/// The compaction thresholds are empirical defaults, not a contract; hosts
/// with unusual edit patterns are expected to adjust them.
#[derive(Clone, Debug)]
pub struct HistoryConfig {
    /// Hard bound on stored entries; the oldest entry is evicted beyond this.
    pub max_entries: usize,
    /// Quiet period a burst of change notifications must outlast before the
    /// pending batch commits.
    pub quiet_period: Duration,
    /// Content changes touching fewer than this many characters merge into
    /// the preceding entry when kind and target match.
    pub minor_change_chars: usize,
    /// Consecutive entries with the same kind and target committed within
    /// this window of each other collapse to the last member.
    pub run_window: Duration,
    /// Disable to keep every committed entry (eviction still applies).
    pub compaction_enabled: bool,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_MAX_ENTRIES,
            quiet_period: Duration::from_millis(DEFAULT_QUIET_PERIOD_MS),
            minor_change_chars: DEFAULT_MINOR_CHANGE_CHARS,
            run_window: Duration::from_secs(DEFAULT_RUN_WINDOW_SECS),
            compaction_enabled: true,
        }
    }
}

impl HistoryConfig {
    /// Config with instant batch commits, for hosts that call `checkpoint`
    /// explicitly (and for tests).
    pub fn immediate() -> Self {
        Self {
            quiet_period: Duration::ZERO,
            ..Self::default()
        }
    }
}
