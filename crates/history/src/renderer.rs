//! The renderer collaborator boundary.
//!
//! The engine never touches a live document directly. It reads document
//! state through this trait when capturing and writes it back when
//! restoring. Any host surface (a DOM bridge, a native canvas, the
//! in-memory [`MemoryRenderer`](crate::memory::MemoryRenderer)) implements
//! `Renderer`; the engine is generic over it.

use thiserror::Error;

use slate_model::{ElementId, ElementKind, ElementRecord, Position, StyleMap, ViewState};

/// The identity-and-content portion of one live element, as enumerated by
/// [`Renderer::list_elements`]. Styles and position are read separately per
/// element; the capturer assembles the full [`ElementRecord`].
#[derive(Clone, Debug, PartialEq)]
pub struct ElementSeed {
    pub id: ElementId,
    pub kind: ElementKind,
    pub content: String,
    pub attributes: StyleMap,
}

/// The renderer declined to recreate an element during restore, e.g. a
/// `kind` no longer supported by the host's element library.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("renderer rejected element: {reason}")]
pub struct ElementRejected {
    pub reason: String,
}

impl ElementRejected {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Live-document surface required of any host.
///
/// Reads serve snapshot capture; writes serve restore. Within one logical
/// engine operation the document is either read or written, never both
/// concurrently.
pub trait Renderer {
    // --- reads (capture path) ---

    /// All live elements in document/z-order. May be transiently empty
    /// (e.g. mid-clear); capture must tolerate that.
    fn list_elements(&self) -> Vec<ElementSeed>;

    /// Style properties of one element. Unknown ids yield an empty map.
    fn read_styles(&self, id: &ElementId) -> StyleMap;

    /// Placement of one element. Unknown ids yield the default position.
    fn read_position(&self, id: &ElementId) -> Position;

    /// Style properties of the document's root container.
    fn read_root_styles(&self) -> StyleMap;

    /// Currently selected element, if any.
    fn read_selection(&self) -> Option<ElementId>;

    /// Current viewport state (opaque to the engine).
    fn read_view_state(&self) -> ViewState;

    // --- writes (restore path) ---

    /// Remove every live element.
    fn clear_all(&mut self);

    /// Recreate one element from its record. Rejections are reported per
    /// element; restore continues with the remaining records.
    fn create_element(&mut self, record: &ElementRecord) -> Result<(), ElementRejected>;

    /// Replace the root container's style properties.
    fn set_root_styles(&mut self, styles: &StyleMap);

    /// Replace the selection (`None` clears it).
    fn set_selection(&mut self, id: Option<&ElementId>);

    /// Replace the viewport state.
    fn set_view_state(&mut self, view: &ViewState);
}
