//! Payload serialization -- writing `HistoryPayload` to JSON strings.

use tracing::debug;

use crate::error::ExportResult;
use crate::payload::HistoryPayload;

/// Serialize a history payload to a pretty-printed JSON string.
pub fn to_json_string(payload: &HistoryPayload) -> ExportResult<String> {
    let json = serde_json::to_string_pretty(payload)?;
    debug!(
        entries = payload.entries.len(),
        cursor = payload.cursor,
        json_len = json.len(),
        "Serialized history payload to JSON"
    );
    Ok(json)
}

/// Serialize a history payload to a compact (non-pretty) JSON string.
pub fn to_json_string_compact(payload: &HistoryPayload) -> ExportResult<String> {
    let json = serde_json::to_string(payload)?;
    debug!(
        entries = payload.entries.len(),
        cursor = payload.cursor,
        json_len = json.len(),
        "Serialized history payload to compact JSON"
    );
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use slate_model::{ChangeKind, OperationInfo, Snapshot, StyleMap, ViewState};

    fn payload() -> HistoryPayload {
        HistoryPayload::new(
            vec![Snapshot {
                captured_at_ms: 42,
                operation: OperationInfo::single(ChangeKind::Initial, None),
                elements: Vec::new(),
                root_style_props: StyleMap::new(),
                selected_id: None,
                view_state: ViewState::default(),
            }],
            0,
        )
    }

    #[test]
    fn pretty_and_compact_parse_identically() {
        let payload = payload();
        let pretty = to_json_string(&payload).unwrap();
        let compact = to_json_string_compact(&payload).unwrap();
        assert!(pretty.len() > compact.len());

        let from_pretty: HistoryPayload = serde_json::from_str(&pretty).unwrap();
        let from_compact: HistoryPayload = serde_json::from_str(&compact).unwrap();
        assert_eq!(from_pretty, from_compact);
        assert_eq!(from_pretty, payload);
    }
}
