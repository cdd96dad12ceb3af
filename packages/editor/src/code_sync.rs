//! Code→Visual: a selection in the code editor highlights the overlapping
//! elements on the canvas.

use crate::index::ElementIndex;
use crate::outcome::{SkipReason, SyncOutcome};
use crate::session::SyncSession;
use crate::store::SyncSource;
use svgsync_common::SourceRange;
use tracing::{debug, instrument};

impl SyncSession {
    /// Listener for the code editor's selection-changed event.
    ///
    /// Backwards selections are accepted and normalized.
    #[instrument(level = "debug", skip(self))]
    pub fn on_code_selection_changed(&self, selection: SourceRange) -> SyncOutcome {
        let selection = selection.normalized();

        if self.store.is_syncing() {
            return SyncOutcome::skipped(SkipReason::InFlight);
        }

        // The code editor reporting a caret or selection inside what we just
        // highlighted for a visual pick is our own reflection
        if self.store.last_sync_source() == SyncSource::Visual
            && self.store.is_within_selected_ranges(&selection)
        {
            debug!("Ignoring echo of mirrored ranges");
            return SyncOutcome::skipped(SkipReason::MirrorEcho);
        }

        let (index, generation) = self.index.snapshot();
        if index.is_empty() {
            return SyncOutcome::skipped(SkipReason::EmptyIndex);
        }

        if self.last_code_selection.get() == Some(selection) {
            return SyncOutcome::skipped(SkipReason::UnchangedSelection);
        }
        self.last_code_selection.set(Some(selection));

        self.sync_code_to_visual(&index, generation, selection)
    }

    /// Resolve `range` against the index and highlight the matches on the
    /// canvas, regardless of what the code listener processed last.
    pub fn highlight_elements_from_code(&self, range: SourceRange) -> SyncOutcome {
        if self.store.is_syncing() {
            return SyncOutcome::skipped(SkipReason::InFlight);
        }

        let (index, generation) = self.index.snapshot();
        if index.is_empty() {
            return SyncOutcome::skipped(SkipReason::EmptyIndex);
        }

        self.sync_code_to_visual(&index, generation, range.normalized())
    }

    fn sync_code_to_visual(
        &self,
        index: &ElementIndex,
        generation: u64,
        selection: SourceRange,
    ) -> SyncOutcome {
        let ids: Vec<String> = index
            .find_overlapping(&selection)
            .iter()
            .map(|record| record.id.clone())
            .collect();

        // Zero matches keep whatever is highlighted now
        if ids.is_empty() {
            return SyncOutcome::skipped(SkipReason::NoOverlap);
        }

        let Some(_guard) = self.store.try_begin_sync() else {
            return SyncOutcome::skipped(SkipReason::InFlight);
        };

        let previous = self.store.commit_code(ids.clone());
        let painted = self.with_canvas_surface(|canvas| {
            if !previous.is_empty() {
                canvas.clear_highlight(&previous);
            }
            canvas.apply_highlight(&ids);
        });

        // The canvas replaced the document from inside apply_highlight. A
        // reset could not reach it then, so take our highlight back now.
        if self.index.generation() != generation && self.store.selected_element_ids() != ids {
            debug!("Document replaced while highlighting, discarding");
            self.with_canvas_surface(|canvas| canvas.clear_highlight(&ids));
            return SyncOutcome::Superseded;
        }

        debug!(
            elements = ids.len(),
            canvas = painted.is_some(),
            "Code selection mirrored to canvas"
        );

        SyncOutcome::Applied {
            source: SyncSource::Code,
            element_ids: ids,
        }
    }
}
