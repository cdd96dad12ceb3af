//! # Sync Session
//!
//! One session per open editor. It owns the state store and the index
//! holder, and keeps shared handles to the two collaborator surfaces.
//!
//! All entry points take `&self`. Surfaces usually hold a `Weak` back to the
//! session and may call any entry point from inside a surface method; the
//! session never holds a borrow of its own state across such a call.

use crate::events::SyncEvent;
use crate::index::{ElementIndex, IndexHandle};
use crate::options::SyncOptions;
use crate::outcome::SyncOutcome;
use crate::store::{SyncSource, SyncState, SyncStore};
use crate::surfaces::{CanvasSurface, CodeSurface, DecorationId};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use svgsync_common::{ElementRecord, SourceRange};
use tracing::{debug, info, warn};

pub type SharedCodeSurface = Rc<RefCell<dyn CodeSurface>>;
pub type SharedCanvasSurface = Rc<RefCell<dyn CanvasSurface>>;

pub struct SyncSession {
    pub(crate) options: SyncOptions,
    pub(crate) store: SyncStore,
    pub(crate) index: IndexHandle,
    code_surface: RefCell<Option<SharedCodeSurface>>,
    canvas_surface: RefCell<Option<SharedCanvasSurface>>,
    /// Last code selection the code listener processed
    pub(crate) last_code_selection: Cell<Option<SourceRange>>,
}

impl Default for SyncSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncSession {
    pub fn new() -> Self {
        Self::with_options(SyncOptions::default())
    }

    pub fn with_options(options: SyncOptions) -> Self {
        Self {
            options,
            store: SyncStore::new(),
            index: IndexHandle::new(),
            code_surface: RefCell::new(None),
            canvas_surface: RefCell::new(None),
            last_code_selection: Cell::new(None),
        }
    }

    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    /// Snapshot of the latest committed state
    pub fn state(&self) -> SyncState {
        self.store.snapshot()
    }

    /// Snapshot of the current element index
    pub fn index(&self) -> Rc<ElementIndex> {
        self.index.current()
    }

    /// Decoration handles waiting for the code editor to become free
    pub fn pending_releases(&self) -> usize {
        self.store.retired_count()
    }

    // ---- collaborators ----

    /// Mount the code editor. A previously mounted editor is detached first.
    pub fn attach_code_surface<S: CodeSurface + 'static>(&self, surface: Rc<RefCell<S>>) {
        self.detach_code_surface();
        let surface: SharedCodeSurface = surface;
        *self.code_surface.borrow_mut() = Some(surface);
        debug!("Code surface attached");
    }

    /// Unmount the code editor, removing the decorations it still shows.
    ///
    /// The element selection survives; only the code highlight is dropped.
    pub fn detach_code_surface(&self) -> Option<SharedCodeSurface> {
        let surface = self.code_surface.borrow_mut().take()?;

        let mut stale = self.store.clear_code_highlight();
        stale.extend(self.store.take_retired());
        if !stale.is_empty() {
            match surface.try_borrow_mut() {
                Ok(mut editor) => editor.release_decorations(&stale),
                Err(_) => warn!(
                    handles = stale.len(),
                    "Code surface busy while detaching, decorations dropped"
                ),
            }
        }

        debug!("Code surface detached");
        Some(surface)
    }

    pub fn attach_canvas_surface<S: CanvasSurface + 'static>(&self, surface: Rc<RefCell<S>>) {
        let surface: SharedCanvasSurface = surface;
        *self.canvas_surface.borrow_mut() = Some(surface);
        debug!("Canvas surface attached");
    }

    pub fn detach_canvas_surface(&self) -> Option<SharedCanvasSurface> {
        let surface = self.canvas_surface.borrow_mut().take();
        if surface.is_some() {
            debug!("Canvas surface detached");
        }
        surface
    }

    pub(crate) fn code_surface(&self) -> Option<SharedCodeSurface> {
        self.code_surface.borrow().clone()
    }

    /// Run `f` against the code editor. `None` if it is detached or busy.
    pub(crate) fn with_code_surface<R>(&self, f: impl FnOnce(&mut dyn CodeSurface) -> R) -> Option<R> {
        let surface = self.code_surface()?;
        let mut editor = surface.try_borrow_mut().ok()?;
        Some(f(&mut *editor))
    }

    /// Run `f` against the canvas. `None` if it is detached or busy.
    pub(crate) fn with_canvas_surface<R>(
        &self,
        f: impl FnOnce(&mut dyn CanvasSurface) -> R,
    ) -> Option<R> {
        let surface = self.canvas_surface.borrow().clone()?;
        let mut canvas = surface.try_borrow_mut().ok()?;
        Some(f(&mut *canvas))
    }

    // ---- document lifecycle ----

    /// Install the elements of a newly opened document. Always resets the
    /// selection.
    pub fn replace_document(&self, records: Vec<ElementRecord>) -> SyncOutcome {
        let index = self.index.replace(records);
        info!(elements = index.len(), "Document replaced");

        self.reset_selection();
        SyncOutcome::IndexReplaced {
            selection_reset: true,
        }
    }

    /// Install the elements of a re-parse of the current document.
    ///
    /// The selection is kept when every selected id still exists; the code
    /// ranges mirrored from a visual selection then follow the new spans.
    pub fn refresh_index(&self, records: Vec<ElementRecord>) -> SyncOutcome {
        let index = self.index.replace(records);
        self.last_code_selection.set(None);

        let selected = self.store.selected_element_ids();
        if let Some(missing) = selected.iter().find(|id| !index.contains(id)) {
            info!(
                elements = index.len(),
                missing = %missing,
                "Selected element vanished on refresh, resetting selection"
            );
            self.reset_selection();
            return SyncOutcome::IndexReplaced {
                selection_reset: true,
            };
        }

        if self.store.last_sync_source() == SyncSource::Visual && !selected.is_empty() {
            let ranges = index
                .lookup(&selected)
                .iter()
                .map(|record| record.source_range)
                .collect();
            self.store.set_selected_code_ranges(ranges, SyncSource::Visual);
        }

        debug!(elements = index.len(), kept = selected.len(), "Index refreshed");
        SyncOutcome::IndexReplaced {
            selection_reset: false,
        }
    }

    /// The document was closed: empty index, default state
    pub fn close_document(&self) -> SyncOutcome {
        self.index.replace(Vec::new());
        info!("Document closed");

        self.reset_selection();
        SyncOutcome::IndexReplaced {
            selection_reset: true,
        }
    }

    /// Return to default state and clean up both surfaces.
    ///
    /// Decorations the code editor cannot take right now (it is the one
    /// calling us) are parked and released at the next opportunity.
    fn reset_selection(&self) {
        let (mut handles, ids) = self.store.reset();
        self.last_code_selection.set(None);

        handles.extend(self.store.take_retired());
        if !handles.is_empty() {
            let released = self.with_code_surface(|editor| editor.release_decorations(&handles));
            if released.is_none() {
                debug!(handles = handles.len(), "Code surface busy, parking decorations");
                self.store.park_retired(handles);
            }
        }

        if !ids.is_empty() {
            self.with_canvas_surface(|canvas| canvas.clear_highlight(&ids));
        }
    }

    /// Release `handles` plus anything parked, through an editor the caller
    /// already holds.
    pub(crate) fn release_with(&self, editor: &mut dyn CodeSurface, mut handles: Vec<DecorationId>) {
        handles.extend(self.store.take_retired());
        if !handles.is_empty() {
            editor.release_decorations(&handles);
        }
    }

    // ---- events ----

    /// Route one serialized event to the matching entry point
    pub fn dispatch(&self, event: SyncEvent) -> SyncOutcome {
        match event {
            SyncEvent::CodeSelectionChange { range } => self.on_code_selection_changed(range),
            SyncEvent::VisualSelectionChange { element_ids } => {
                self.on_visual_selection_changed(&element_ids)
            }
            SyncEvent::DocumentChange { elements } => self.replace_document(elements),
            SyncEvent::DocumentRefresh { elements } => self.refresh_index(elements),
            SyncEvent::DocumentClose => self.close_document(),
        }
    }
}
