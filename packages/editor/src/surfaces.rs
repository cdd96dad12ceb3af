//! # Collaborator Contracts
//!
//! The two surfaces the engine drives. Neither is owned by the engine: hosts
//! attach them to a [`SyncSession`](crate::SyncSession) and deliver their
//! events back through the session's listener entry points.
//!
//! Implementations may call back into the session from inside any of these
//! methods. While a surface method runs, the surface itself is mutably
//! borrowed, so nested engine work that needs the same surface skips it.

use crate::options::{HighlightStyle, RevealMode};
use serde::{Deserialize, Serialize};
use std::fmt;
use svgsync_common::SourceRange;

/// Opaque handle for one decoration issued by the code editor
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DecorationId(pub String);

impl DecorationId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DecorationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The text-editing widget showing the markup
pub trait CodeSurface {
    /// Create one decoration per range and return their handles in order
    fn add_decorations(&mut self, ranges: &[SourceRange], style: &HighlightStyle)
        -> Vec<DecorationId>;

    /// Remove decorations; unknown handles are ignored
    fn release_decorations(&mut self, handles: &[DecorationId]);

    /// Scroll so that `range` is visible
    fn reveal_range(&mut self, range: SourceRange, mode: RevealMode);
}

/// The rendered drawing
pub trait CanvasSurface {
    /// Visually mark the elements with these ids
    fn apply_highlight(&mut self, element_ids: &[String]);

    /// Remove the mark from these ids
    fn clear_highlight(&mut self, element_ids: &[String]);
}
