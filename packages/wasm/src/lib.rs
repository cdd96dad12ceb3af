use std::cell::RefCell;
use std::rc::Rc;
use svgsync_editor::{
    ElementRecord, SourceRange, SyncEvent, SyncOptions, SyncOutcome, SyncSession,
};
use svgsync_parser::{get_document_id, scan_with_options, ScanOptions};
use wasm_bindgen::prelude::*;

mod js_surfaces;

use js_surfaces::{JsCanvasSurface, JsCodeSurface};

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

fn js_error(context: &str, e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("{}: {}", context, e))
}

fn outcome_json(outcome: &SyncOutcome) -> String {
    serde_json::to_string(outcome).unwrap_or_default()
}

/// Sync session for a browser host.
///
/// Element lists, events, outcomes and state cross the boundary as JSON
/// strings in the same camelCase shape the CLI's replay scripts use.
#[wasm_bindgen(js_name = SyncSession)]
pub struct WasmSyncSession {
    inner: Rc<SyncSession>,
}

#[wasm_bindgen(js_class = SyncSession)]
impl WasmSyncSession {
    /// `options` is an optional JSON `SyncOptions` object
    #[wasm_bindgen(constructor)]
    pub fn new(options: Option<String>) -> Result<WasmSyncSession, JsValue> {
        let options = match options {
            Some(json) => serde_json::from_str::<SyncOptions>(&json)
                .map_err(|e| js_error("Invalid options", e))?,
            None => SyncOptions::default(),
        };

        Ok(Self {
            inner: Rc::new(SyncSession::with_options(options)),
        })
    }

    #[wasm_bindgen(js_name = attachCodeEditor)]
    pub fn attach_code_editor(&self, editor: JsValue) -> Result<(), JsValue> {
        let surface = JsCodeSurface::new(editor)?;
        self.inner.attach_code_surface(Rc::new(RefCell::new(surface)));
        Ok(())
    }

    #[wasm_bindgen(js_name = detachCodeEditor)]
    pub fn detach_code_editor(&self) {
        self.inner.detach_code_surface();
    }

    #[wasm_bindgen(js_name = attachCanvas)]
    pub fn attach_canvas(&self, canvas: JsValue) -> Result<(), JsValue> {
        let surface = JsCanvasSurface::new(canvas)?;
        self.inner.attach_canvas_surface(Rc::new(RefCell::new(surface)));
        Ok(())
    }

    #[wasm_bindgen(js_name = detachCanvas)]
    pub fn detach_canvas(&self) {
        self.inner.detach_canvas_surface();
    }

    /// Scan markup and install it as a new document. Returns the element
    /// records as JSON.
    #[wasm_bindgen(js_name = loadSource)]
    pub fn load_source(&self, source: &str, file_path: &str) -> Result<String, JsValue> {
        let records = scan_records(source, file_path)?;
        let json = serde_json::to_string(&records).map_err(|e| js_error("Serialization error", e))?;
        self.inner.replace_document(records);
        Ok(json)
    }

    /// Re-scan markup of the current document, keeping the selection when
    /// possible. Returns the outcome as JSON.
    #[wasm_bindgen(js_name = refreshSource)]
    pub fn refresh_source(&self, source: &str, file_path: &str) -> Result<String, JsValue> {
        let records = scan_records(source, file_path)?;
        Ok(outcome_json(&self.inner.refresh_index(records)))
    }

    /// Install an element list produced elsewhere (JSON `ElementRecord[]`)
    #[wasm_bindgen(js_name = loadElements)]
    pub fn load_elements(&self, elements: &str) -> Result<String, JsValue> {
        let records: Vec<ElementRecord> =
            serde_json::from_str(elements).map_err(|e| js_error("Invalid elements", e))?;
        Ok(outcome_json(&self.inner.replace_document(records)))
    }

    #[wasm_bindgen(js_name = closeDocument)]
    pub fn close_document(&self) -> String {
        outcome_json(&self.inner.close_document())
    }

    #[wasm_bindgen(js_name = onCodeSelectionChanged)]
    pub fn on_code_selection_changed(
        &self,
        start_line: u32,
        start_column: u32,
        end_line: u32,
        end_column: u32,
    ) -> String {
        let range = SourceRange::new(start_line, start_column, end_line, end_column);
        outcome_json(&self.inner.on_code_selection_changed(range))
    }

    #[wasm_bindgen(js_name = onVisualSelectionChanged)]
    pub fn on_visual_selection_changed(&self, element_ids: Vec<String>) -> String {
        outcome_json(&self.inner.on_visual_selection_changed(&element_ids))
    }

    /// Deliver one JSON `SyncEvent`
    pub fn dispatch(&self, event: &str) -> Result<String, JsValue> {
        let event = SyncEvent::from_json(event).map_err(|e| js_error("Invalid event", e))?;
        Ok(outcome_json(&self.inner.dispatch(event)))
    }

    /// Current `SyncState` as JSON
    pub fn state(&self) -> String {
        serde_json::to_string(&self.inner.state()).unwrap_or_default()
    }
}

fn scan_records(source: &str, file_path: &str) -> Result<Vec<ElementRecord>, JsValue> {
    let options = ScanOptions {
        path: file_path.to_string(),
        ..ScanOptions::default()
    };
    scan_with_options(source, options).map_err(|e| js_error("Scan error", e))
}

/// Scan SVG markup and return its element records as JSON
#[wasm_bindgen(js_name = scanSvg)]
pub fn scan_svg_js(source: &str, file_path: &str) -> Result<String, JsValue> {
    let records = scan_records(source, file_path)?;
    serde_json::to_string(&records).map_err(|e| js_error("Serialization error", e))
}

/// Get document ID for a file path
#[wasm_bindgen(js_name = getDocumentId)]
pub fn get_document_id_js(file_path: &str) -> String {
    get_document_id(file_path)
}
