//! In-memory reference renderer.
//!
//! `MemoryRenderer` keeps the live document as plain values. It backs
//! headless hosting (servers, CLIs, tests) and doubles as the executable
//! specification of the `Renderer` contract for real surface bindings.

use tracing::debug;

use slate_model::{ElementId, ElementKind, ElementRecord, Position, StyleMap, ViewState};

use crate::renderer::{ElementRejected, ElementSeed, Renderer};

/// A live document held entirely in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryRenderer {
    elements: Vec<ElementRecord>,
    root_styles: StyleMap,
    selection: Option<ElementId>,
    view_state: ViewState,
    /// Kind tags this surface refuses to create, for exercising partial
    /// restore failure (mirrors a host whose element library shrank).
    rejected_kinds: Vec<String>,
}

impl MemoryRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an element as a live edit (document order is
    /// append order for new ids).
    pub fn upsert_element(&mut self, record: ElementRecord) {
        match self.elements.iter_mut().find(|e| e.id == record.id) {
            Some(existing) => *existing = record,
            None => self.elements.push(record),
        }
    }

    /// Remove an element by id. Clears the selection if it pointed at it.
    pub fn remove_element(&mut self, id: &ElementId) {
        self.elements.retain(|e| &e.id != id);
        if self.selection.as_ref() == Some(id) {
            self.selection = None;
        }
    }

    /// Replace an element's content blob, if present.
    pub fn set_content(&mut self, id: &ElementId, content: impl Into<String>) {
        if let Some(element) = self.elements.iter_mut().find(|e| &e.id == id) {
            element.content = content.into();
        }
    }

    /// Set one style property on an element, if present.
    pub fn set_style(&mut self, id: &ElementId, name: impl Into<String>, value: impl Into<String>) {
        if let Some(element) = self.elements.iter_mut().find(|e| &e.id == id) {
            element.style_props.insert(name.into(), value.into());
        }
    }

    /// Move/resize an element, if present.
    pub fn set_position(&mut self, id: &ElementId, position: Position) {
        if let Some(element) = self.elements.iter_mut().find(|e| &e.id == id) {
            element.position = position;
        }
    }

    /// Mark a kind tag as unsupported; `create_element` will reject it.
    pub fn reject_kind(&mut self, tag: impl Into<String>) {
        self.rejected_kinds.push(tag.into());
    }

    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    pub fn element(&self, id: &ElementId) -> Option<&ElementRecord> {
        self.elements.iter().find(|e| &e.id == id)
    }

    pub fn elements(&self) -> &[ElementRecord] {
        &self.elements
    }
}

impl Renderer for MemoryRenderer {
    fn list_elements(&self) -> Vec<ElementSeed> {
        self.elements
            .iter()
            .map(|e| ElementSeed {
                id: e.id.clone(),
                kind: e.kind.clone(),
                content: e.content.clone(),
                attributes: e.attributes.clone(),
            })
            .collect()
    }

    fn read_styles(&self, id: &ElementId) -> StyleMap {
        self.element(id)
            .map(|e| e.style_props.clone())
            .unwrap_or_default()
    }

    fn read_position(&self, id: &ElementId) -> Position {
        self.element(id).map(|e| e.position).unwrap_or_default()
    }

    fn read_root_styles(&self) -> StyleMap {
        self.root_styles.clone()
    }

    fn read_selection(&self) -> Option<ElementId> {
        self.selection.clone()
    }

    fn read_view_state(&self) -> ViewState {
        self.view_state.clone()
    }

    fn clear_all(&mut self) {
        debug!(elements = self.elements.len(), "Clearing live document");
        self.elements.clear();
        self.selection = None;
    }

    fn create_element(&mut self, record: &ElementRecord) -> Result<(), ElementRejected> {
        let tag = record.kind.as_tag();
        if self.rejected_kinds.iter().any(|k| k == tag) {
            return Err(ElementRejected::new(format!("unsupported kind '{tag}'")));
        }
        self.elements.push(record.clone());
        Ok(())
    }

    fn set_root_styles(&mut self, styles: &StyleMap) {
        self.root_styles = styles.clone();
    }

    fn set_selection(&mut self, id: Option<&ElementId>) {
        self.selection = id.cloned();
    }

    fn set_view_state(&mut self, view: &ViewState) {
        self.view_state = view.clone();
    }
}

/// Build a text element record, for tests and examples.
pub fn text_element(id: &str, content: &str) -> ElementRecord {
    ElementRecord {
        id: ElementId::new(id),
        kind: ElementKind::Text,
        content: content.to_string(),
        style_props: StyleMap::new(),
        position: Position::new(0.0, 0.0, 200.0, 50.0),
        attributes: StyleMap::new(),
    }
}
