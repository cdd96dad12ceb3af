use serde::{Deserialize, Serialize};

/// How highlighted source ranges are decorated in the code editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HighlightStyle {
    /// CSS class the editor attaches to the decorated text
    pub class_name: String,

    /// Shown when hovering a decorated range
    pub hover_message: String,

    /// Decorate whole lines instead of the exact range
    pub whole_line: bool,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            class_name: "code-highlight".to_string(),
            hover_message: "Selected SVG element".to_string(),
            whole_line: false,
        }
    }
}

/// Where the code editor scrolls a revealed range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RevealMode {
    #[default]
    Center,
    CenterIfOutside,
    Top,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SyncOptions {
    pub highlight: HighlightStyle,
    pub reveal: RevealMode,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = SyncOptions::default();
        assert_eq!(options.highlight.class_name, "code-highlight");
        assert_eq!(options.highlight.hover_message, "Selected SVG element");
        assert!(!options.highlight.whole_line);
        assert_eq!(options.reveal, RevealMode::Center);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let options: SyncOptions =
            serde_json::from_str(r#"{ "highlight": { "wholeLine": true }, "reveal": "top" }"#)
                .unwrap();

        assert!(options.highlight.whole_line);
        assert_eq!(options.highlight.class_name, "code-highlight");
        assert_eq!(options.reveal, RevealMode::Top);
    }
}
