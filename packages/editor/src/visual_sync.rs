//! Visual→Code: picking elements on the canvas decorates and reveals their
//! markup in the code editor.

use crate::outcome::{SkipReason, SyncOutcome};
use crate::session::SyncSession;
use crate::store::SyncSource;
use svgsync_common::SourceRange;
use tracing::{debug, instrument, warn};

impl SyncSession {
    /// Listener for the canvas's element-selection event.
    ///
    /// Ids unknown to the current index are dropped. If none remain the
    /// state is left as it was and the code editor is not touched.
    #[instrument(level = "debug", skip(self, ids), fields(selected = ids.len()))]
    pub fn on_visual_selection_changed<S: AsRef<str>>(&self, ids: &[S]) -> SyncOutcome {
        let Some(_guard) = self.store.try_begin_sync() else {
            return SyncOutcome::skipped(SkipReason::InFlight);
        };

        let (index, generation) = self.index.snapshot();
        let (ids, ranges): (Vec<String>, Vec<SourceRange>) = index
            .lookup(ids)
            .iter()
            .map(|record| (record.id.clone(), record.source_range))
            .unzip();

        let Some(&first) = ranges.first() else {
            return SyncOutcome::skipped(SkipReason::NoResolvedElements);
        };

        let Some(surface) = self.code_surface() else {
            return SyncOutcome::skipped(SkipReason::NoCodeSurface);
        };
        let Ok(mut editor) = surface.try_borrow_mut() else {
            return SyncOutcome::skipped(SkipReason::NoCodeSurface);
        };

        // Acquire the new decorations before letting go of the old ones
        let handles = editor.add_decorations(&ranges, &self.options.highlight);

        if self.index.generation() != generation {
            debug!("Document replaced while decorating, discarding");
            self.release_with(&mut *editor, handles);
            return SyncOutcome::Superseded;
        }

        // One handle per range or nothing; a partial decoration is handed
        // back and the editor treated as unavailable
        if handles.len() != ranges.len() {
            warn!(
                ranges = ranges.len(),
                handles = handles.len(),
                "Code surface could not decorate selection"
            );
            self.release_with(&mut *editor, handles);
            return SyncOutcome::skipped(SkipReason::NoCodeSurface);
        }

        let previous = self.store.commit_visual(ids.clone(), ranges, handles);
        self.last_code_selection.set(None);
        self.release_with(&mut *editor, previous);

        editor.reveal_range(first, self.options.reveal);

        // A document change during release or reveal may have reset the
        // state, parking the handles we just stored
        if self.index.generation() != generation {
            self.release_with(&mut *editor, Vec::new());
            if self.store.selected_element_ids() != ids {
                debug!("Document replaced while revealing, discarding");
                return SyncOutcome::Superseded;
            }
        }

        debug!(elements = ids.len(), "Visual selection mirrored to code");
        SyncOutcome::Applied {
            source: SyncSource::Visual,
            element_ids: ids,
        }
    }

    /// Same as a canvas selection of `ids`
    pub fn highlight_code_from_elements<S: AsRef<str>>(&self, ids: &[S]) -> SyncOutcome {
        self.on_visual_selection_changed(ids)
    }
}
