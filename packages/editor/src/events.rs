//! Serializable events for hosts that talk to a session over JSON
//! (replay scripts, the browser bindings).

use crate::errors::{EditorError, EditorResult};
use serde::{Deserialize, Serialize};
use svgsync_common::{ElementRecord, SourceRange};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SyncEvent {
    /// The code editor's selection moved
    CodeSelectionChange { range: SourceRange },

    /// Elements were picked on the canvas
    VisualSelectionChange {
        #[serde(rename = "elementIds")]
        element_ids: Vec<String>,
    },

    /// A different document was loaded
    DocumentChange { elements: Vec<ElementRecord> },

    /// The same document was re-parsed
    DocumentRefresh { elements: Vec<ElementRecord> },

    DocumentClose,
}

impl SyncEvent {
    pub fn from_json(json: &str) -> EditorResult<Self> {
        let event: SyncEvent = serde_json::from_str(json)?;
        event.validate()?;
        Ok(event)
    }

    /// Parse a JSON array of events, reporting the first invalid one
    pub fn parse_script(json: &str) -> EditorResult<Vec<Self>> {
        let events: Vec<SyncEvent> = serde_json::from_str(json)?;

        for (index, event) in events.iter().enumerate() {
            event.validate().map_err(|e| EditorError::Script {
                index,
                message: e.to_string(),
            })?;
        }

        Ok(events)
    }

    /// Reject 0-based coordinates. Backwards selections are fine, the session
    /// normalizes them.
    pub fn validate(&self) -> EditorResult<()> {
        let ranges: Vec<&SourceRange> = match self {
            SyncEvent::CodeSelectionChange { range } => vec![range],
            SyncEvent::DocumentChange { elements } | SyncEvent::DocumentRefresh { elements } => {
                elements.iter().map(|e| &e.source_range).collect()
            }
            SyncEvent::VisualSelectionChange { .. } | SyncEvent::DocumentClose => Vec::new(),
        };

        for range in ranges {
            let r = range.normalized();
            SourceRange::try_new(r.start_line, r.start_column, r.end_line, r.end_column)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_code_selection() {
        let event = SyncEvent::from_json(
            r#"{ "type": "code_selection_change",
                 "range": { "startLine": 2, "startColumn": 10, "endLine": 2, "endColumn": 10 } }"#,
        )
        .unwrap();

        assert_eq!(
            event,
            SyncEvent::CodeSelectionChange {
                range: SourceRange::new(2, 10, 2, 10)
            }
        );
    }

    #[test]
    fn test_parse_visual_selection_and_close() {
        let events = SyncEvent::parse_script(
            r#"[
                { "type": "visual_selection_change", "elementIds": ["c1"] },
                { "type": "document_close" }
            ]"#,
        )
        .unwrap();

        assert_eq!(
            events[0],
            SyncEvent::VisualSelectionChange {
                element_ids: vec!["c1".to_string()]
            }
        );
        assert_eq!(events[1], SyncEvent::DocumentClose);
    }

    #[test]
    fn test_zero_based_range_rejected() {
        let err = SyncEvent::from_json(
            r#"{ "type": "code_selection_change",
                 "range": { "startLine": 0, "startColumn": 1, "endLine": 1, "endColumn": 1 } }"#,
        )
        .unwrap_err();

        assert!(matches!(err, EditorError::Range(_)));
    }

    #[test]
    fn test_script_error_names_event() {
        let err = SyncEvent::parse_script(
            r#"[
                { "type": "document_close" },
                { "type": "document_change", "elements": [
                    { "id": "a", "sourceRange": { "startLine": 1, "startColumn": 0, "endLine": 1, "endColumn": 4 } }
                ] }
            ]"#,
        )
        .unwrap_err();

        assert!(matches!(err, EditorError::Script { index: 1, .. }));
    }

    #[test]
    fn test_unknown_event_type() {
        assert!(matches!(
            SyncEvent::from_json(r#"{ "type": "code_edit" }"#),
            Err(EditorError::Json(_))
        ));
    }
}
