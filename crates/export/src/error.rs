//! Error types for history payload export/import (thiserror-based).

use thiserror::Error;

/// Errors that can occur while exporting or importing a history payload.
#[derive(Error, Debug)]
pub enum ExportError {
    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Payload version is newer than this engine understands.
    #[error("Unsupported history payload version: {version}")]
    UnsupportedVersion { version: u64 },

    /// Payload is structurally invalid (missing fields, bad cursor,
    /// duplicate element ids, non-finite positions).
    #[error("Invalid history payload: {reason}")]
    InvalidPayload { reason: String },
}

/// Convenience Result type for payload operations.
pub type ExportResult<T> = Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = ExportError::UnsupportedVersion { version: 999 };
        assert!(err.to_string().contains("999"));

        let err = ExportError::InvalidPayload {
            reason: "cursor out of range".into(),
        };
        assert!(err.to_string().contains("cursor out of range"));
    }

    #[test]
    fn json_error_conversion() {
        let result: Result<crate::payload::HistoryPayload, _> = serde_json::from_str("not json");
        let json_err = result.unwrap_err();
        let err: ExportError = json_err.into();
        assert!(matches!(err, ExportError::Json(_)));
    }
}
