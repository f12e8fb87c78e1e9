//! Whole-document snapshots and the operation metadata attached to them.

use serde::{Deserialize, Serialize};

use crate::element::{ElementId, ElementRecord, StyleMap};

/// Classification of the edit that produced a history entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChangeKind {
    /// Synthetic baseline captured when the engine attaches.
    Initial,
    ElementCreate,
    ElementDelete,
    ContentChange,
    StyleChange,
    PositionChange,
    SelectionChange,
    /// Multiple coalesced changes committed as one entry.
    Batch,
    /// Document reset / fresh load.
    Clear,
}

/// One notified change: what happened and, where applicable, to which element.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRecord {
    pub kind: ChangeKind,
    /// Affected element, when the change targets a single element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<ElementId>,
    /// Free-form detail for display (e.g. the style property touched).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ChangeRecord {
    pub fn new(kind: ChangeKind, target: Option<ElementId>) -> Self {
        Self {
            kind,
            target,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Operation metadata carried by a snapshot.
///
/// For `Batch` entries, `changes` lists every coalesced change in arrival
/// order; for single-change entries it is empty and `kind`/`target` describe
/// the change directly.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationInfo {
    pub kind: ChangeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<ElementId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changes: Vec<ChangeRecord>,
}

impl OperationInfo {
    pub fn single(kind: ChangeKind, target: Option<ElementId>) -> Self {
        Self {
            kind,
            target,
            changes: Vec::new(),
        }
    }

    /// Build the operation info for a coalesced batch. A one-element batch
    /// keeps its own kind/target instead of being wrapped.
    pub fn from_changes(mut changes: Vec<ChangeRecord>) -> Self {
        if changes.len() == 1 {
            let change = changes.remove(0);
            Self::single(change.kind, change.target)
        } else {
            Self {
                kind: ChangeKind::Batch,
                target: None,
                changes,
            }
        }
    }
}

/// Opaque viewport state carried through history. The engine stores and
/// restores it verbatim and never interprets it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub zoom: f64,
    pub snap_to_grid: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            snap_to_grid: false,
        }
    }
}

/// An immutable, total description of document state at one point in history.
///
/// Ordering correctness comes from position in the history store; the
/// timestamp exists for display and compaction heuristics only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    /// Capture time as unix milliseconds.
    pub captured_at_ms: u64,
    /// What produced this snapshot.
    pub operation: OperationInfo,
    /// Document elements in document/z-order. Duplicate ids forbidden.
    pub elements: Vec<ElementRecord>,
    /// Styles of the document's root container.
    pub root_style_props: StyleMap,
    /// Currently selected element, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_id: Option<ElementId>,
    /// Viewport passthrough state.
    pub view_state: ViewState,
}

impl Snapshot {
    /// Check the snapshot's internal invariants. Returns the first offending
    /// element id on duplicate ids or invalid positions.
    pub fn validate(&self) -> Result<(), ElementId> {
        let mut seen: std::collections::HashSet<&str> = std::collections::HashSet::new();
        for element in &self.elements {
            if !seen.insert(element.id.as_str()) {
                return Err(element.id.clone());
            }
            if !element.position.is_valid() {
                return Err(element.id.clone());
            }
        }
        Ok(())
    }

    /// Look up an element by id.
    pub fn element(&self, id: &ElementId) -> Option<&ElementRecord> {
        self.elements.iter().find(|e| &e.id == id)
    }

    /// Structural equality of the document state itself, ignoring the
    /// capture timestamp and operation classification.
    pub fn same_document_state(&self, other: &Snapshot) -> bool {
        self.elements == other.elements
            && self.root_style_props == other.root_style_props
            && self.selected_id == other.selected_id
            && self.view_state == other.view_state
    }

    /// Rough memory footprint in bytes, for history budgeting diagnostics.
    pub fn estimated_size(&self) -> usize {
        let mut size = std::mem::size_of::<Self>();
        for element in &self.elements {
            size += element.estimated_size();
        }
        for (k, v) in &self.root_style_props {
            size += k.len() + v.len();
        }
        if let Some(id) = &self.selected_id {
            size += id.as_str().len();
        }
        for change in &self.operation.changes {
            size += std::mem::size_of::<ChangeRecord>();
            if let Some(target) = &change.target {
                size += target.as_str().len();
            }
            if let Some(note) = &change.note {
                size += note.len();
            }
        }
        size
    }
}
