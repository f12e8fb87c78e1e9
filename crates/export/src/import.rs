//! Payload deserialization -- parsing and validating `HistoryPayload` JSON.
//!
//! Import is atomic: the payload is parsed, version-migrated, and validated
//! in full before anything is handed back. Callers only ever install a
//! payload that has passed every check.

use tracing::{debug, info, warn};

use crate::error::{ExportError, ExportResult};
use crate::payload::{HistoryPayload, PAYLOAD_VERSION};

/// Deserialize a history payload from a JSON string.
///
/// Runs version migration if the payload uses an older format, then
/// validates the structural invariants (non-empty entries, in-range cursor,
/// unique element ids, finite positions).
pub fn from_json_string(json: &str) -> ExportResult<HistoryPayload> {
    // Parse as a generic value first so the version can be checked and
    // migrated before typed deserialization.
    let mut value: serde_json::Value = serde_json::from_str(json)?;

    let version = migrate_payload(&mut value)?;
    debug!(version, "History payload version after migration");

    let payload: HistoryPayload = serde_json::from_value(value)?;

    validate_payload(&payload)?;

    info!(
        entries = payload.entries.len(),
        cursor = payload.cursor,
        "History payload imported"
    );

    Ok(payload)
}

/// Migrate a payload JSON value to the current version in-place.
///
/// Returns the version after migration. Payloads newer than
/// [`PAYLOAD_VERSION`] are rejected.
fn migrate_payload(value: &mut serde_json::Value) -> ExportResult<u32> {
    let obj = value
        .as_object_mut()
        .ok_or_else(|| ExportError::InvalidPayload {
            reason: "payload root must be a JSON object".into(),
        })?;

    let version = extract_version(obj)?;

    if version > u64::from(PAYLOAD_VERSION) {
        return Err(ExportError::UnsupportedVersion { version });
    }

    if version < u64::from(PAYLOAD_VERSION) {
        // Version 0 predates the explicit cursor field: the current state
        // was implicitly the newest entry.
        info!(from = version, to = PAYLOAD_VERSION, "Migrating history payload");
        if !obj.contains_key("cursor") {
            let last = obj
                .get("entries")
                .and_then(|e| e.as_array())
                .map(|a| a.len().saturating_sub(1))
                .unwrap_or(0);
            obj.insert("cursor".to_string(), serde_json::Value::Number(last.into()));
        }
        obj.insert(
            "version".to_string(),
            serde_json::Value::Number(PAYLOAD_VERSION.into()),
        );
    }

    Ok(PAYLOAD_VERSION)
}

/// Extract the version number from a payload JSON object.
fn extract_version(obj: &serde_json::Map<String, serde_json::Value>) -> ExportResult<u64> {
    match obj.get("version") {
        Some(serde_json::Value::Number(n)) => {
            n.as_u64().ok_or_else(|| ExportError::InvalidPayload {
                reason: "version must be a non-negative integer".into(),
            })
        }
        Some(other) => Err(ExportError::InvalidPayload {
            reason: format!("version must be a number, got {other}"),
        }),
        None => Err(ExportError::InvalidPayload {
            reason: "missing version field".into(),
        }),
    }
}

/// Validate structural invariants of a parsed payload.
fn validate_payload(payload: &HistoryPayload) -> ExportResult<()> {
    if payload.entries.is_empty() {
        return Err(ExportError::InvalidPayload {
            reason: "entries must not be empty".into(),
        });
    }

    if payload.cursor >= payload.entries.len() {
        return Err(ExportError::InvalidPayload {
            reason: format!(
                "cursor {} out of range for {} entries",
                payload.cursor,
                payload.entries.len()
            ),
        });
    }

    for (index, snapshot) in payload.entries.iter().enumerate() {
        if let Err(id) = snapshot.validate() {
            warn!(entry = index, element_id = %id, "Rejecting payload with invalid snapshot");
            return Err(ExportError::InvalidPayload {
                reason: format!("entry {index}: invalid element '{id}' (duplicate id or bad position)"),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::to_json_string;
    use slate_model::{
        ChangeKind, ElementId, ElementKind, ElementRecord, OperationInfo, Position, Snapshot,
        StyleMap, ViewState,
    };

    fn make_element(id: &str) -> ElementRecord {
        ElementRecord {
            id: ElementId::new(id),
            kind: ElementKind::Text,
            content: "<p>hi</p>".into(),
            style_props: StyleMap::new(),
            position: Position::new(10.0, 20.0, 100.0, 40.0),
            attributes: StyleMap::new(),
        }
    }

    fn make_snapshot(elements: Vec<ElementRecord>) -> Snapshot {
        Snapshot {
            captured_at_ms: 1_000,
            operation: OperationInfo::single(ChangeKind::Initial, None),
            elements,
            root_style_props: StyleMap::new(),
            selected_id: None,
            view_state: ViewState::default(),
        }
    }

    #[test]
    fn roundtrip() {
        let payload = HistoryPayload::new(
            vec![make_snapshot(vec![]), make_snapshot(vec![make_element("a")])],
            1,
        );
        let json = to_json_string(&payload).unwrap();
        let back = from_json_string(&json).unwrap();
        assert_eq!(back, payload);
    }

    #[test]
    fn rejects_unsupported_version() {
        let json = r#"{"version": 999, "entries": [], "cursor": 0}"#;
        let err = from_json_string(json).unwrap_err();
        assert!(matches!(err, ExportError::UnsupportedVersion { version: 999 }));
    }

    #[test]
    fn rejects_missing_version() {
        let json = r#"{"entries": [], "cursor": 0}"#;
        let err = from_json_string(json).unwrap_err();
        assert!(matches!(err, ExportError::InvalidPayload { .. }));
    }

    #[test]
    fn rejects_non_object_root() {
        let err = from_json_string("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, ExportError::InvalidPayload { .. }));
    }

    #[test]
    fn rejects_empty_entries() {
        let json = r#"{"version": 1, "entries": [], "cursor": 0}"#;
        let err = from_json_string(json).unwrap_err();
        assert!(matches!(err, ExportError::InvalidPayload { .. }));
    }

    #[test]
    fn rejects_cursor_out_of_range() {
        let payload = HistoryPayload {
            version: PAYLOAD_VERSION,
            entries: vec![make_snapshot(vec![])],
            cursor: 5,
        };
        let json = serde_json::to_string(&payload).unwrap();
        let err = from_json_string(&json).unwrap_err();
        assert!(matches!(err, ExportError::InvalidPayload { .. }));
    }

    #[test]
    fn rejects_duplicate_element_ids() {
        let payload = HistoryPayload::new(
            vec![make_snapshot(vec![make_element("a"), make_element("a")])],
            0,
        );
        let json = serde_json::to_string(&payload).unwrap();
        let err = from_json_string(&json).unwrap_err();
        match err {
            ExportError::InvalidPayload { reason } => assert!(reason.contains("'a'")),
            other => panic!("expected InvalidPayload, got {other}"),
        }
    }

    #[test]
    fn migrates_version_zero_cursor_to_last_entry() {
        let entries = vec![make_snapshot(vec![]), make_snapshot(vec![make_element("a")])];
        let json = serde_json::json!({
            "version": 0,
            "entries": entries,
        })
        .to_string();

        let payload = from_json_string(&json).unwrap();
        assert_eq!(payload.version, PAYLOAD_VERSION);
        assert_eq!(payload.cursor, 1);
    }

    #[test]
    fn rejects_malformed_json() {
        let err = from_json_string("{not json").unwrap_err();
        assert!(matches!(err, ExportError::Json(_)));
    }
}
