//! Snapshot restoration: apply a chosen snapshot back onto the live document.

use std::fmt;

use tracing::{debug, warn};

use slate_model::{ElementId, Snapshot};

use crate::renderer::Renderer;

/// One element the renderer refused to recreate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RestoreFailure {
    pub id: ElementId,
    pub reason: String,
}

/// Outcome of a restoration. Restoration always runs to completion; failed
/// elements are collected here rather than aborting the pass, since history
/// may reference element kinds the host no longer supports.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RestoreReport {
    /// Number of elements successfully recreated.
    pub restored: usize,
    /// Elements the renderer rejected.
    pub failed: Vec<RestoreFailure>,
}

impl RestoreReport {
    /// Whether every element was recreated.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Human-readable notification listing what could not be restored.
impl fmt::Display for RestoreReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.failed.is_empty() {
            return write!(f, "{} element(s) restored", self.restored);
        }
        write!(
            f,
            "{} element(s) restored; could not restore: ",
            self.restored
        )?;
        for (i, failure) in self.failed.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} ({})", failure.id, failure.reason)?;
        }
        Ok(())
    }
}

/// Replace the renderer's entire live state with the snapshot's contents.
///
/// Clears the document, recreates each element in snapshot order, then
/// applies root styles, selection, and view state. Idempotent: restoring
/// the same snapshot twice yields the same observable renderer state. A
/// selection pointing at an element that failed to recreate is dropped.
pub fn restore<R: Renderer>(renderer: &mut R, snapshot: &Snapshot) -> RestoreReport {
    renderer.clear_all();

    let mut report = RestoreReport::default();
    for record in &snapshot.elements {
        match renderer.create_element(record) {
            Ok(()) => report.restored += 1,
            Err(rejected) => {
                warn!(
                    element_id = %record.id,
                    reason = %rejected.reason,
                    "Element rejected during restore, continuing"
                );
                report.failed.push(RestoreFailure {
                    id: record.id.clone(),
                    reason: rejected.reason,
                });
            }
        }
    }

    renderer.set_root_styles(&snapshot.root_style_props);

    let selection = snapshot
        .selected_id
        .as_ref()
        .filter(|id| !report.failed.iter().any(|f| f.id == **id));
    renderer.set_selection(selection);

    renderer.set_view_state(&snapshot.view_state);

    debug!(
        restored = report.restored,
        failed = report.failed.len(),
        "Snapshot restored onto renderer"
    );

    report
}
