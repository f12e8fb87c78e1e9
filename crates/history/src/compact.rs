//! Post-commit history compaction.
//!
//! Keeps the history small and meaningful under realistic edit patterns
//! (steady typing, repeated style tweaks) without losing semantic
//! checkpoints. Two best-effort passes run after every commit:
//!
//! 1. **Minor-change suppression** -- a content change whose character
//!    delta against the previous entry is tiny, on the same element, drops
//!    the previous entry (one history slot per keystroke otherwise).
//! 2. **Similar-run collapsing** -- a run of consecutive entries with the
//!    same kind and target, committed in quick succession, collapses to its
//!    last member.
//!
//! Surviving entries are never reordered and the cursor's entry is never
//! removed. The hard memory bound is the store's eviction, not this pass.

use std::time::Instant;

use tracing::debug;

use slate_model::ChangeKind;

use crate::config::HistoryConfig;
use crate::store::HistoryEntry;

/// Run compaction after a commit. `cursor` is the index of the entry that
/// was just committed; returns the (possibly shifted) cursor.
pub(crate) fn compact_after_commit(
    entries: &mut Vec<HistoryEntry>,
    cursor: usize,
    config: &HistoryConfig,
) -> usize {
    debug_assert_eq!(cursor, entries.len() - 1);
    if entries.len() < 2 {
        return cursor;
    }

    let mut cursor = cursor;

    if should_merge_minor_change(entries, cursor, config.minor_change_chars) {
        entries.remove(cursor - 1);
        cursor -= 1;
        debug!(cursor, "Merged minor content change into previous entry");
    }

    let run_start = similar_run_start(entries, cursor, config.run_window);
    if run_start < cursor {
        let removed = cursor - run_start;
        entries.drain(run_start..cursor);
        cursor = run_start;
        debug!(removed, cursor, "Collapsed run of similar entries");
    }

    cursor
}

/// Rule 1: the newly committed entry is a content change to the same
/// element as its predecessor and the content delta is below the threshold.
fn should_merge_minor_change(
    entries: &[HistoryEntry],
    cursor: usize,
    minor_change_chars: usize,
) -> bool {
    let newest = &entries[cursor];
    let previous = &entries[cursor - 1];

    if newest.snapshot.operation.kind != ChangeKind::ContentChange
        || previous.snapshot.operation.kind != ChangeKind::ContentChange
    {
        return false;
    }
    let target = match (&newest.snapshot.operation.target, &previous.snapshot.operation.target) {
        (Some(a), Some(b)) if a == b => a,
        _ => return false,
    };

    // The element must exist in both snapshots; creations and deletions are
    // not "minor".
    let (new_content, old_content) = match (
        newest.snapshot.element(target),
        previous.snapshot.element(target),
    ) {
        (Some(n), Some(p)) => (&n.content, &p.content),
        _ => return false,
    };

    char_delta(old_content, new_content) < minor_change_chars
}

/// Rule 2: index of the first entry of the maximal run of consecutive
/// similar entries ending at `cursor`. Returns `cursor` itself when there
/// is no run to collapse.
fn similar_run_start(
    entries: &[HistoryEntry],
    cursor: usize,
    run_window: std::time::Duration,
) -> usize {
    let newest = &entries[cursor];
    let kind = newest.snapshot.operation.kind;

    // Batches are already coalesced checkpoints and the initial baseline is
    // unique; only single-element edits form collapsible runs.
    if matches!(kind, ChangeKind::Batch | ChangeKind::Initial | ChangeKind::Clear) {
        return cursor;
    }
    let target = match &newest.snapshot.operation.target {
        Some(target) => target,
        None => return cursor,
    };

    let mut start = cursor;
    let mut next_time: Instant = newest.committed_at;
    while start > 0 {
        let candidate = &entries[start - 1];
        let same_shape = candidate.snapshot.operation.kind == kind
            && candidate.snapshot.operation.target.as_ref() == Some(target);
        let within_window =
            next_time.saturating_duration_since(candidate.committed_at) <= run_window;
        if !same_shape || !within_window {
            break;
        }
        next_time = candidate.committed_at;
        start -= 1;
    }
    start
}

/// Number of characters outside the common prefix/suffix of two strings.
fn char_delta(old: &str, new: &str) -> usize {
    let old: Vec<char> = old.chars().collect();
    let new: Vec<char> = new.chars().collect();

    let mut prefix = 0;
    while prefix < old.len() && prefix < new.len() && old[prefix] == new[prefix] {
        prefix += 1;
    }

    let mut suffix = 0;
    while suffix < old.len() - prefix
        && suffix < new.len() - prefix
        && old[old.len() - 1 - suffix] == new[new.len() - 1 - suffix]
    {
        suffix += 1;
    }

    old.len().max(new.len()) - prefix - suffix
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use slate_model::{
        ChangeKind, ElementId, OperationInfo, Snapshot, StyleMap, ViewState,
    };

    use crate::memory::text_element;

    fn snapshot_with(kind: ChangeKind, target: Option<&str>, content: &str) -> Snapshot {
        let elements = target
            .map(|id| vec![text_element(id, content)])
            .unwrap_or_default();
        Snapshot {
            captured_at_ms: 0,
            operation: OperationInfo::single(kind, target.map(ElementId::from)),
            elements,
            root_style_props: StyleMap::new(),
            selected_id: None,
            view_state: ViewState::default(),
        }
    }

    fn entry(kind: ChangeKind, target: Option<&str>, content: &str) -> HistoryEntry {
        HistoryEntry {
            snapshot: snapshot_with(kind, target, content),
            committed_at: Instant::now(),
        }
    }

    fn config() -> HistoryConfig {
        HistoryConfig::default()
    }

    #[test]
    fn char_delta_basics() {
        assert_eq!(char_delta("", ""), 0);
        assert_eq!(char_delta("hello", "hello"), 0);
        assert_eq!(char_delta("hello", "hello!"), 1);
        assert_eq!(char_delta("hello world", "hello brave world"), 6);
        assert_eq!(char_delta("abc", "xyz"), 3);
        assert_eq!(char_delta("", "typing"), 6);
    }

    #[test]
    fn keystroke_merges_into_previous() {
        let mut entries = vec![
            entry(ChangeKind::Initial, None, ""),
            entry(ChangeKind::ContentChange, Some("a"), "hell"),
            entry(ChangeKind::ContentChange, Some("a"), "hello"),
        ];
        let cursor = compact_after_commit(&mut entries, 2, &config());
        assert_eq!(entries.len(), 2);
        assert_eq!(cursor, 1);
        // The later, most complete snapshot survived.
        assert_eq!(entries[1].snapshot.elements[0].content, "hello");
    }

    #[test]
    fn large_content_change_not_merged() {
        let mut entries = vec![
            entry(ChangeKind::Initial, None, ""),
            entry(ChangeKind::ContentChange, Some("a"), "short"),
            entry(
                ChangeKind::ContentChange,
                Some("a"),
                "a completely different paragraph of text",
            ),
        ];
        let window = HistoryConfig {
            // Keep rule 2 out of this test.
            run_window: Duration::ZERO,
            ..config()
        };
        let cursor = compact_after_commit(&mut entries, 2, &window);
        assert_eq!(entries.len(), 3);
        assert_eq!(cursor, 2);
    }

    #[test]
    fn different_targets_not_merged() {
        let mut entries = vec![
            entry(ChangeKind::Initial, None, ""),
            entry(ChangeKind::ContentChange, Some("a"), "x"),
            entry(ChangeKind::ContentChange, Some("b"), "y"),
        ];
        let cursor = compact_after_commit(&mut entries, 2, &config());
        assert_eq!(entries.len(), 3);
        assert_eq!(cursor, 2);
    }

    #[test]
    fn style_run_collapses_to_last() {
        let mut entries = vec![
            entry(ChangeKind::Initial, None, ""),
            entry(ChangeKind::StyleChange, Some("a"), "v1"),
            entry(ChangeKind::StyleChange, Some("a"), "v2"),
            entry(ChangeKind::StyleChange, Some("a"), "v3"),
        ];
        let cursor = compact_after_commit(&mut entries, 3, &config());
        assert_eq!(entries.len(), 2);
        assert_eq!(cursor, 1);
        assert_eq!(entries[1].snapshot.elements[0].content, "v3");
        // Baseline untouched.
        assert_eq!(entries[0].snapshot.operation.kind, ChangeKind::Initial);
    }

    #[test]
    fn run_outside_time_window_not_collapsed() {
        let old = Instant::now() - Duration::from_secs(60);
        let mut entries = vec![
            entry(ChangeKind::Initial, None, ""),
            HistoryEntry {
                snapshot: snapshot_with(ChangeKind::StyleChange, Some("a"), "v1"),
                committed_at: old,
            },
            entry(ChangeKind::StyleChange, Some("a"), "v2"),
        ];
        let cursor = compact_after_commit(&mut entries, 2, &config());
        assert_eq!(entries.len(), 3);
        assert_eq!(cursor, 2);
    }

    #[test]
    fn batch_entries_never_collapse() {
        let mut entries = vec![
            entry(ChangeKind::Initial, None, ""),
            entry(ChangeKind::Batch, None, ""),
            entry(ChangeKind::Batch, None, ""),
        ];
        let cursor = compact_after_commit(&mut entries, 2, &config());
        assert_eq!(entries.len(), 3);
        assert_eq!(cursor, 2);
    }

    #[test]
    fn cursor_entry_always_survives() {
        let mut entries = vec![
            entry(ChangeKind::Initial, None, ""),
            entry(ChangeKind::PositionChange, Some("a"), "p1"),
            entry(ChangeKind::PositionChange, Some("a"), "p2"),
        ];
        let before = entries[2].snapshot.clone();
        let cursor = compact_after_commit(&mut entries, 2, &config());
        assert_eq!(entries[cursor].snapshot, before);
    }

    #[test]
    fn element_created_then_edited_not_minor_merged() {
        // Previous entry doesn't contain the element at all.
        let mut entries = vec![
            entry(ChangeKind::Initial, None, ""),
            entry(ChangeKind::ContentChange, Some("b"), "x"),
        ];
        entries[1].snapshot.elements.clear();
        let mut with_new = entries.clone();
        with_new.push(entry(ChangeKind::ContentChange, Some("b"), "x"));
        let window = HistoryConfig {
            run_window: Duration::ZERO,
            ..config()
        };
        let cursor = compact_after_commit(&mut with_new, 2, &window);
        assert_eq!(with_new.len(), 3);
        assert_eq!(cursor, 2);
    }
}
