//! State capture: turn the live document into an immutable snapshot.

use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use slate_model::{ElementRecord, OperationInfo, Snapshot};

use crate::renderer::Renderer;

/// Capture the live document as a [`Snapshot`].
///
/// Pure function of the document at call time: assembles one
/// [`ElementRecord`] per live element (identity/content from
/// `list_elements`, styles and position read per id), plus root styles,
/// selection, and view state. A transiently empty document produces a
/// snapshot with an empty element list rather than an error.
pub fn capture<R: Renderer>(renderer: &R, operation: OperationInfo) -> Snapshot {
    let elements: Vec<ElementRecord> = renderer
        .list_elements()
        .into_iter()
        .map(|seed| {
            let style_props = renderer.read_styles(&seed.id);
            let position = renderer.read_position(&seed.id);
            ElementRecord {
                id: seed.id,
                kind: seed.kind,
                content: seed.content,
                style_props,
                position,
                attributes: seed.attributes,
            }
        })
        .collect();

    let snapshot = Snapshot {
        captured_at_ms: unix_millis(),
        operation,
        elements,
        root_style_props: renderer.read_root_styles(),
        selected_id: renderer.read_selection(),
        view_state: renderer.read_view_state(),
    };

    debug!(
        elements = snapshot.elements.len(),
        kind = ?snapshot.operation.kind,
        "Captured snapshot"
    );

    snapshot
}

/// Current wall-clock time as unix milliseconds. Display/heuristics only;
/// never used for ordering correctness.
fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use slate_model::{ChangeKind, ElementId, Position};

    use crate::memory::{text_element, MemoryRenderer};

    #[test]
    fn captures_empty_document() {
        let renderer = MemoryRenderer::new();
        let snapshot = capture(&renderer, OperationInfo::single(ChangeKind::Initial, None));
        assert!(snapshot.elements.is_empty());
        assert!(snapshot.selected_id.is_none());
        assert_eq!(snapshot.operation.kind, ChangeKind::Initial);
    }

    #[test]
    fn captures_elements_with_styles_and_position() {
        let mut renderer = MemoryRenderer::new();
        renderer.upsert_element(text_element("a", "<p>hello</p>"));
        renderer.set_style(&"a".into(), "color", "#f00");
        renderer.set_position(&"a".into(), Position::new(5.0, 6.0, 70.0, 80.0));
        renderer.set_selection(Some(&"a".into()));

        let snapshot = capture(
            &renderer,
            OperationInfo::single(ChangeKind::ElementCreate, Some("a".into())),
        );

        assert_eq!(snapshot.elements.len(), 1);
        let record = &snapshot.elements[0];
        assert_eq!(record.content, "<p>hello</p>");
        assert_eq!(record.style_props.get("color").unwrap(), "#f00");
        assert_eq!(record.position, Position::new(5.0, 6.0, 70.0, 80.0));
        assert_eq!(snapshot.selected_id, Some(ElementId::new("a")));
        assert!(snapshot.validate().is_ok());
    }

    #[test]
    fn capture_is_pure_of_live_document() {
        let mut renderer = MemoryRenderer::new();
        renderer.upsert_element(text_element("a", "v1"));
        let first = capture(&renderer, OperationInfo::single(ChangeKind::Initial, None));

        renderer.set_content(&"a".into(), "v2");
        let second = capture(&renderer, OperationInfo::single(ChangeKind::Initial, None));

        // The earlier snapshot is unaffected by later edits.
        assert_eq!(first.elements[0].content, "v1");
        assert_eq!(second.elements[0].content, "v2");
    }

    #[test]
    fn preserves_document_order() {
        let mut renderer = MemoryRenderer::new();
        renderer.upsert_element(text_element("front", ""));
        renderer.upsert_element(text_element("back", ""));
        let snapshot = capture(&renderer, OperationInfo::single(ChangeKind::Initial, None));
        assert_eq!(snapshot.elements[0].id, "front".into());
        assert_eq!(snapshot.elements[1].id, "back".into());
    }
}
