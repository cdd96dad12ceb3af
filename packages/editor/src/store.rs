//! # Sync State Store
//!
//! Single-writer state for one session. Every mutation goes through one of
//! the transitions below and completes before returning; no borrow escapes,
//! so a collaborator re-entering the session never observes a partial write.

use crate::surfaces::DecorationId;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use svgsync_common::SourceRange;

/// Surface that initiated the last committed selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncSource {
    Code,
    Visual,
    #[default]
    None,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncState {
    /// Index order for code-initiated selections, selection order otherwise
    pub selected_element_ids: Vec<String>,

    /// Ranges currently decorated in the code editor
    pub selected_code_ranges: Vec<SourceRange>,

    /// One handle per entry of `selected_code_ranges`
    pub active_decoration_handles: Vec<DecorationId>,

    pub is_syncing: bool,

    pub last_sync_source: SyncSource,
}

#[derive(Debug, Default)]
pub struct SyncStore {
    state: RefCell<SyncState>,
    /// Handles dropped by a reset while the code editor was busy
    retired: RefCell<Vec<DecorationId>>,
}

impl SyncStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> SyncState {
        self.state.borrow().clone()
    }

    pub fn is_syncing(&self) -> bool {
        self.state.borrow().is_syncing
    }

    pub fn last_sync_source(&self) -> SyncSource {
        self.state.borrow().last_sync_source
    }

    pub fn selected_element_ids(&self) -> Vec<String> {
        self.state.borrow().selected_element_ids.clone()
    }

    pub fn selected_code_ranges(&self) -> Vec<SourceRange> {
        self.state.borrow().selected_code_ranges.clone()
    }

    /// True if `range` lies inside one of the mirrored code ranges
    pub fn is_within_selected_ranges(&self, range: &SourceRange) -> bool {
        self.state
            .borrow()
            .selected_code_ranges
            .iter()
            .any(|selected| selected.contains(range))
    }

    pub fn set_selected_element_ids(&self, ids: Vec<String>, source: SyncSource) {
        let mut state = self.state.borrow_mut();
        state.selected_element_ids = ids;
        state.last_sync_source = source;
    }

    pub fn set_selected_code_ranges(&self, ranges: Vec<SourceRange>, source: SyncSource) {
        let mut state = self.state.borrow_mut();
        state.selected_code_ranges = ranges;
        state.last_sync_source = source;
    }

    /// Store new decoration handles, returning the ones they replace
    pub fn set_decoration_handles(&self, handles: Vec<DecorationId>) -> Vec<DecorationId> {
        std::mem::replace(&mut self.state.borrow_mut().active_decoration_handles, handles)
    }

    pub fn set_last_sync_source(&self, source: SyncSource) {
        self.state.borrow_mut().last_sync_source = source;
    }

    /// Commit a code-initiated selection. Returns the ids it replaces.
    pub fn commit_code(&self, ids: Vec<String>) -> Vec<String> {
        let mut state = self.state.borrow_mut();
        state.last_sync_source = SyncSource::Code;
        std::mem::replace(&mut state.selected_element_ids, ids)
    }

    /// Commit a visual-initiated selection with the decorations created for
    /// it. Returns the decoration handles it replaces.
    pub fn commit_visual(
        &self,
        ids: Vec<String>,
        ranges: Vec<SourceRange>,
        handles: Vec<DecorationId>,
    ) -> Vec<DecorationId> {
        let mut state = self.state.borrow_mut();
        state.last_sync_source = SyncSource::Visual;
        state.selected_element_ids = ids;
        state.selected_code_ranges = ranges;
        std::mem::replace(&mut state.active_decoration_handles, handles)
    }

    /// Drop the code highlight while keeping the element selection.
    /// Returns the handles that must be released.
    pub fn clear_code_highlight(&self) -> Vec<DecorationId> {
        let mut state = self.state.borrow_mut();
        state.selected_code_ranges.clear();
        std::mem::take(&mut state.active_decoration_handles)
    }

    /// Return every field to its default except the in-flight flag, which
    /// belongs to the guard of a transition that may still be running.
    ///
    /// Returns the live decoration handles and the previously selected ids so
    /// the caller can clean up both surfaces.
    pub fn reset(&self) -> (Vec<DecorationId>, Vec<String>) {
        let mut state = self.state.borrow_mut();
        let defaults = SyncState {
            is_syncing: state.is_syncing,
            ..SyncState::default()
        };
        let previous = std::mem::replace(&mut *state, defaults);
        (
            previous.active_decoration_handles,
            previous.selected_element_ids,
        )
    }

    pub fn park_retired(&self, handles: Vec<DecorationId>) {
        self.retired.borrow_mut().extend(handles);
    }

    pub fn take_retired(&self) -> Vec<DecorationId> {
        std::mem::take(&mut *self.retired.borrow_mut())
    }

    pub fn retired_count(&self) -> usize {
        self.retired.borrow().len()
    }

    /// Enter a sync transition. Returns `None` if one is already in flight.
    pub fn try_begin_sync(&self) -> Option<SyncGuard<'_>> {
        let mut state = self.state.borrow_mut();
        if state.is_syncing {
            return None;
        }
        state.is_syncing = true;
        Some(SyncGuard { store: self })
    }
}

/// Clears the in-flight flag when the transition ends, including on early
/// returns.
#[must_use = "the transition ends as soon as the guard is dropped"]
pub struct SyncGuard<'a> {
    store: &'a SyncStore,
}

impl Drop for SyncGuard<'_> {
    fn drop(&mut self) {
        self.store.state.borrow_mut().is_syncing = false;
    }
}
