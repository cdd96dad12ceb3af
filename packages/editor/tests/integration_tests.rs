//! Integration tests for editor crate: scanned markup driving a session

mod common;

use common::{caret, Harness};
use svgsync_editor::{SkipReason, SourceRange, SyncEvent, SyncOutcome, SyncSource, SyncState};
use svgsync_parser::scan;

const DRAWING: &str = r##"<svg width="800" height="600" xmlns="http://www.w3.org/2000/svg">
  <rect id="body" width="100" height="100" x="50" y="50" fill="#3b82f6" />
  <g id="eyes">
    <circle id="left" cx="80" cy="80" r="5" />
    <circle id="right" cx="120" cy="80" r="5" />
  </g>
</svg>"##;

#[test]
fn test_scanned_document_lifecycle() -> anyhow::Result<()> {
    let h = Harness::new(scan(DRAWING)?);
    assert_eq!(h.session.index().len(), 4);

    // Caret inside the left eye hits the eye and its group
    let outcome = h.session.on_code_selection_changed(caret(4, 10));
    assert_eq!(
        outcome,
        SyncOutcome::Applied {
            source: SyncSource::Code,
            element_ids: vec!["eyes".to_string(), "left".to_string()],
        }
    );

    // Picking the right eye on the canvas decorates its markup
    h.session.on_visual_selection_changed(&["right"]);
    let state = h.session.state();
    assert_eq!(state.selected_code_ranges, vec![SourceRange::new(5, 5, 5, 49)]);

    // Editing the markup: a new line pushes the eyes down one line
    let edited = DRAWING.replace("<g id=\"eyes\">", "<g id=\"eyes\">\n    <title>eyes</title>");
    let outcome = h.session.refresh_index(scan(&edited)?);
    assert_eq!(
        outcome,
        SyncOutcome::IndexReplaced {
            selection_reset: false
        }
    );
    assert_eq!(
        h.session.state().selected_code_ranges,
        vec![SourceRange::new(6, 5, 6, 49)]
    );

    // Deleting the right eye drops the selection
    let without_right: String = edited
        .lines()
        .filter(|line| !line.contains("id=\"right\""))
        .collect::<Vec<_>>()
        .join("\n");
    let outcome = h.session.refresh_index(scan(&without_right)?);
    assert_eq!(
        outcome,
        SyncOutcome::IndexReplaced {
            selection_reset: true
        }
    );
    assert_eq!(h.live_decorations(), 0);

    Ok(())
}

#[test]
fn test_dispatching_json_events() -> anyhow::Result<()> {
    let h = Harness::new(Vec::new());

    let records = serde_json::to_value(scan(DRAWING)?)?;
    let script = serde_json::json!([
        { "type": "document_change", "elements": records },
        { "type": "visual_selection_change", "elementIds": ["body"] },
        { "type": "code_selection_change",
          "range": { "startLine": 2, "startColumn": 5, "endLine": 2, "endColumn": 5 } },
        { "type": "code_selection_change",
          "range": { "startLine": 5, "startColumn": 6, "endLine": 5, "endColumn": 6 } },
        { "type": "document_close" }
    ]);

    let events = SyncEvent::parse_script(&script.to_string())?;
    let outcomes: Vec<SyncOutcome> = events
        .into_iter()
        .map(|event| h.session.dispatch(event))
        .collect();

    assert_eq!(
        outcomes[0],
        SyncOutcome::IndexReplaced {
            selection_reset: true
        }
    );
    assert!(outcomes[1].is_applied());
    // Caret inside the decorated rect is the editor echoing our highlight
    assert_eq!(outcomes[2].skip_reason(), Some(SkipReason::MirrorEcho));
    assert_eq!(
        outcomes[3],
        SyncOutcome::Applied {
            source: SyncSource::Code,
            element_ids: vec!["eyes".to_string(), "right".to_string()],
        }
    );
    assert_eq!(h.session.state(), SyncState::default());

    Ok(())
}
