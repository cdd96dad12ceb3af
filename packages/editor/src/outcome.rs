use crate::store::SyncSource;
use serde::Serialize;
use std::fmt;

/// Why a listener left the state untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Another transition was in flight
    InFlight,
    /// The selection echoes ranges the visual side just mirrored
    MirrorEcho,
    EmptyIndex,
    /// Same selection as the last processed one
    UnchangedSelection,
    /// No element overlaps the code selection
    NoOverlap,
    /// None of the selected ids exist in the index
    NoResolvedElements,
    /// The code editor is detached, busy or could not decorate the ranges
    NoCodeSurface,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            SkipReason::InFlight => "sync already in flight",
            SkipReason::MirrorEcho => "echo of mirrored selection",
            SkipReason::EmptyIndex => "document has no elements",
            SkipReason::UnchangedSelection => "selection unchanged",
            SkipReason::NoOverlap => "no element at selection",
            SkipReason::NoResolvedElements => "no known element selected",
            SkipReason::NoCodeSurface => "code editor unavailable",
        };
        f.write_str(text)
    }
}

/// Result of delivering one event to a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SyncOutcome {
    /// A selection was committed and mirrored to the other surface
    Applied {
        source: SyncSource,
        #[serde(rename = "elementIds")]
        element_ids: Vec<String>,
    },

    Skipped { reason: SkipReason },

    /// The document changed while the transition was running; its work was
    /// rolled back
    Superseded,

    /// A new element index was installed
    IndexReplaced {
        #[serde(rename = "selectionReset")]
        selection_reset: bool,
    },
}

impl SyncOutcome {
    pub fn skipped(reason: SkipReason) -> Self {
        SyncOutcome::Skipped { reason }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, SyncOutcome::Applied { .. })
    }

    pub fn skip_reason(&self) -> Option<SkipReason> {
        match self {
            SyncOutcome::Skipped { reason } => Some(*reason),
            _ => None,
        }
    }
}

impl fmt::Display for SyncOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncOutcome::Applied {
                source,
                element_ids,
            } => write!(f, "applied from {:?}: [{}]", source, element_ids.join(", ")),
            SyncOutcome::Skipped { reason } => write!(f, "skipped: {}", reason),
            SyncOutcome::Superseded => f.write_str("superseded by document change"),
            SyncOutcome::IndexReplaced { selection_reset } => {
                if *selection_reset {
                    f.write_str("index replaced, selection reset")
                } else {
                    f.write_str("index replaced, selection kept")
                }
            }
        }
    }
}
