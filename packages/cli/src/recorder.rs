//! Headless surfaces for driving a session from the command line. Every
//! command the engine issues is appended to a shared log.

use serde::Serialize;
use std::cell::RefCell;
use std::rc::Rc;
use svgsync_editor::{
    CanvasSurface, CodeSurface, DecorationId, HighlightStyle, RevealMode, SourceRange,
    SyncSession,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum SurfaceCommand {
    AddDecorations {
        ranges: Vec<SourceRange>,
        handles: Vec<DecorationId>,
    },
    ReleaseDecorations {
        handles: Vec<DecorationId>,
    },
    RevealRange {
        range: SourceRange,
        mode: RevealMode,
    },
    ApplyHighlight {
        ids: Vec<String>,
    },
    ClearHighlight {
        ids: Vec<String>,
    },
}

pub type CommandLog = Rc<RefCell<Vec<SurfaceCommand>>>;

pub struct RecordingEditor {
    log: CommandLog,
    next: u64,
}

impl CodeSurface for RecordingEditor {
    fn add_decorations(
        &mut self,
        ranges: &[SourceRange],
        _style: &HighlightStyle,
    ) -> Vec<DecorationId> {
        let handles: Vec<DecorationId> = ranges
            .iter()
            .map(|_| {
                self.next += 1;
                DecorationId::new(format!("decoration-{}", self.next))
            })
            .collect();

        self.log.borrow_mut().push(SurfaceCommand::AddDecorations {
            ranges: ranges.to_vec(),
            handles: handles.clone(),
        });
        handles
    }

    fn release_decorations(&mut self, handles: &[DecorationId]) {
        self.log.borrow_mut().push(SurfaceCommand::ReleaseDecorations {
            handles: handles.to_vec(),
        });
    }

    fn reveal_range(&mut self, range: SourceRange, mode: RevealMode) {
        self.log
            .borrow_mut()
            .push(SurfaceCommand::RevealRange { range, mode });
    }
}

pub struct RecordingCanvas {
    log: CommandLog,
}

impl CanvasSurface for RecordingCanvas {
    fn apply_highlight(&mut self, element_ids: &[String]) {
        self.log.borrow_mut().push(SurfaceCommand::ApplyHighlight {
            ids: element_ids.to_vec(),
        });
    }

    fn clear_highlight(&mut self, element_ids: &[String]) {
        self.log.borrow_mut().push(SurfaceCommand::ClearHighlight {
            ids: element_ids.to_vec(),
        });
    }
}

/// Attach a recording editor and canvas to `session`, returning their
/// shared log
pub fn attach_recorders(session: &SyncSession) -> CommandLog {
    let log = CommandLog::default();

    session.attach_code_surface(Rc::new(RefCell::new(RecordingEditor {
        log: log.clone(),
        next: 0,
    })));
    session.attach_canvas_surface(Rc::new(RefCell::new(RecordingCanvas { log: log.clone() })));

    log
}

pub fn drain(log: &CommandLog) -> Vec<SurfaceCommand> {
    std::mem::take(&mut *log.borrow_mut())
}

impl std::fmt::Display for SurfaceCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn list<T: std::fmt::Display>(items: &[T]) -> String {
            items
                .iter()
                .map(|item| item.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        }

        match self {
            SurfaceCommand::AddDecorations { ranges, handles } => write!(
                f,
                "code.add_decorations [{}] -> [{}]",
                list(ranges),
                list(handles)
            ),
            SurfaceCommand::ReleaseDecorations { handles } => {
                write!(f, "code.release_decorations [{}]", list(handles))
            }
            SurfaceCommand::RevealRange { range, mode } => {
                write!(f, "code.reveal_range {} ({:?})", range, mode)
            }
            SurfaceCommand::ApplyHighlight { ids } => {
                write!(f, "canvas.apply_highlight [{}]", ids.join(", "))
            }
            SurfaceCommand::ClearHighlight { ids } => {
                write!(f, "canvas.clear_highlight [{}]", ids.join(", "))
            }
        }
    }
}
