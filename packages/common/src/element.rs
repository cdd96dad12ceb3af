use crate::range::SourceRange;
use serde::{Deserialize, Serialize};

/// Opaque reference into the visual surface (e.g. a DOM node slot).
///
/// The core never dereferences it; it travels with the record so hosts can
/// find the rendered node for an id without a second lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RenderedHandle(pub u64);

/// One element of a parsed document, tagged with its source span
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementRecord {
    /// Unique within one document snapshot
    pub id: String,

    /// Tag name as written in the markup (`rect`, `g`, ...)
    #[serde(default)]
    pub tag: String,

    pub source_range: SourceRange,

    #[serde(default)]
    pub rendered_handle: RenderedHandle,
}

impl ElementRecord {
    pub fn new(id: impl Into<String>, source_range: SourceRange) -> Self {
        Self {
            id: id.into(),
            tag: String::new(),
            source_range,
            rendered_handle: RenderedHandle::default(),
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_handle(mut self, handle: RenderedHandle) -> Self {
        self.rendered_handle = handle;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_deserializes_without_optional_fields() {
        let json = r#"{
            "id": "r1",
            "sourceRange": { "startLine": 2, "startColumn": 1, "endLine": 2, "endColumn": 40 }
        }"#;

        let record: ElementRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id, "r1");
        assert_eq!(record.tag, "");
        assert_eq!(record.source_range, SourceRange::new(2, 1, 2, 40));
        assert_eq!(record.rendered_handle, RenderedHandle(0));
    }
}
