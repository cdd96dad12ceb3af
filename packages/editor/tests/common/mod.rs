//! Recording surfaces shared by the editor integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use svgsync_editor::{
    CanvasSurface, CodeSurface, DecorationId, ElementRecord, HighlightStyle, RevealMode,
    SourceRange, SyncSession,
};

type Hook<T> = Option<Box<dyn FnMut(T)>>;

/// Code editor stand-in that remembers every command it receives
#[derive(Default)]
pub struct RecordingEditor {
    next: usize,
    pub live: Vec<DecorationId>,
    pub added: Vec<Vec<SourceRange>>,
    pub released: Vec<DecorationId>,
    pub revealed: Vec<(SourceRange, RevealMode)>,
    pub styles: Vec<HighlightStyle>,
    /// Hand back at most this many handles per call
    pub max_handles: Option<usize>,
    /// Runs inside `add_decorations`, after the handles are created
    pub on_decorate: Hook<Vec<DecorationId>>,
    /// Runs inside `reveal_range`
    pub on_reveal: Hook<SourceRange>,
}

impl CodeSurface for RecordingEditor {
    fn add_decorations(
        &mut self,
        ranges: &[SourceRange],
        style: &HighlightStyle,
    ) -> Vec<DecorationId> {
        let count = self.max_handles.map_or(ranges.len(), |max| max.min(ranges.len()));
        let handles: Vec<DecorationId> = ranges
            .iter()
            .take(count)
            .map(|_| {
                self.next += 1;
                DecorationId::new(format!("dec-{}", self.next))
            })
            .collect();

        self.live.extend(handles.iter().cloned());
        self.added.push(ranges.to_vec());
        self.styles.push(style.clone());

        if let Some(hook) = self.on_decorate.as_mut() {
            hook(handles.clone());
        }
        handles
    }

    fn release_decorations(&mut self, handles: &[DecorationId]) {
        self.live.retain(|live| !handles.contains(live));
        self.released.extend(handles.iter().cloned());
    }

    fn reveal_range(&mut self, range: SourceRange, mode: RevealMode) {
        self.revealed.push((range, mode));
        if let Some(hook) = self.on_reveal.as_mut() {
            hook(range);
        }
    }
}

/// Canvas stand-in tracking which ids are currently highlighted
#[derive(Default)]
pub struct RecordingCanvas {
    pub highlighted: Vec<String>,
    pub applied: Vec<Vec<String>>,
    pub cleared: Vec<Vec<String>>,
    /// Runs inside `apply_highlight`
    pub on_apply: Hook<Vec<String>>,
}

impl CanvasSurface for RecordingCanvas {
    fn apply_highlight(&mut self, element_ids: &[String]) {
        self.highlighted.extend(element_ids.iter().cloned());
        self.applied.push(element_ids.to_vec());
        if let Some(hook) = self.on_apply.as_mut() {
            hook(element_ids.to_vec());
        }
    }

    fn clear_highlight(&mut self, element_ids: &[String]) {
        self.highlighted.retain(|id| !element_ids.contains(id));
        self.cleared.push(element_ids.to_vec());
    }
}

pub struct Harness {
    pub session: Rc<SyncSession>,
    pub editor: Rc<RefCell<RecordingEditor>>,
    pub canvas: Rc<RefCell<RecordingCanvas>>,
}

impl Harness {
    pub fn new(records: Vec<ElementRecord>) -> Self {
        let session = Rc::new(SyncSession::new());
        let editor = Rc::new(RefCell::new(RecordingEditor::default()));
        let canvas = Rc::new(RefCell::new(RecordingCanvas::default()));

        session.attach_code_surface(editor.clone());
        session.attach_canvas_surface(canvas.clone());
        session.replace_document(records);

        Self {
            session,
            editor,
            canvas,
        }
    }

    pub fn live_decorations(&self) -> usize {
        self.editor.borrow().live.len()
    }
}

/// `r1` on line 2, `c1` on line 3
pub fn shapes() -> Vec<ElementRecord> {
    vec![
        ElementRecord::new("r1", SourceRange::new(2, 1, 2, 40)).with_tag("rect"),
        ElementRecord::new("c1", SourceRange::new(3, 1, 3, 30)).with_tag("circle"),
    ]
}

pub fn caret(line: u32, column: u32) -> SourceRange {
    SourceRange::new(line, column, line, column)
}
