//! # svgsync Editor
//!
//! Keeps a code editor showing SVG markup and a canvas rendering it pointed
//! at the same elements.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────┐   selection    ┌──────────────────────┐
//! │ CodeSurface          │ ─────────────→ │ code_sync            │
//! │ (text editor widget) │                │ overlap → ids        │
//! └──────────────────────┘                └──────────────────────┘
//!            ↑ decorate / reveal                    ↓ highlight
//! ┌──────────────────────┐   element ids  ┌──────────────────────┐
//! │ visual_sync          │ ←───────────── │ CanvasSurface        │
//! │ ids → ranges         │                │ (rendered drawing)   │
//! └──────────────────────┘                └──────────────────────┘
//!
//!        both listeners read ElementIndex, write SyncStore
//! ```
//!
//! Each listener brackets its work with the store's in-flight guard and tags
//! its commit with the surface it came from, so the side effects it causes on
//! the other surface never bounce back as a new sync.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use svgsync_editor::SyncSession;
//!
//! let session = Rc::new(SyncSession::new());
//! session.attach_code_surface(editor);
//! session.attach_canvas_surface(canvas);
//!
//! session.replace_document(svgsync_parser::scan(&source)?);
//! session.on_visual_selection_changed(&["c1"]);
//! ```

mod code_sync;
mod errors;
mod events;
mod index;
mod options;
mod outcome;
mod session;
mod store;
mod surfaces;
mod visual_sync;

pub use errors::{EditorError, EditorResult};
pub use events::SyncEvent;
pub use index::{ElementIndex, IndexHandle};
pub use options::{HighlightStyle, RevealMode, SyncOptions};
pub use outcome::{SkipReason, SyncOutcome};
pub use session::{SharedCanvasSurface, SharedCodeSurface, SyncSession};
pub use store::{SyncGuard, SyncSource, SyncState, SyncStore};
pub use surfaces::{CanvasSurface, CodeSurface, DecorationId};

// Re-export common types for convenience
pub use svgsync_common::{ElementRecord, Position, RenderedHandle, SourceRange};
