//! Adapters wrapping JavaScript objects as engine surfaces.
//!
//! A code editor object must provide:
//!
//! ```text
//! addDecorations(ranges, style) -> string[]   // one handle per range
//! releaseDecorations(handles: string[])
//! revealRange(range, mode)                     // mode: "center" | "centerIfOutside" | "top"
//! ```
//!
//! A canvas object must provide `applyHighlight(ids: string[])` and
//! `clearHighlight(ids: string[])`. Ranges and styles arrive as plain objects
//! in the same camelCase shape the JSON API uses.
//!
//! A method that throws is treated like an unavailable collaborator: the
//! call is skipped and the engine carries on.

use js_sys::{Array, Function, Reflect, JSON};
use serde::Serialize;
use svgsync_editor::{
    CanvasSurface, CodeSurface, DecorationId, HighlightStyle, RevealMode, SourceRange,
};
use wasm_bindgen::{JsCast, JsValue};

fn method(target: &JsValue, name: &str) -> Result<Function, JsValue> {
    Reflect::get(target, &JsValue::from_str(name))?
        .dyn_into::<Function>()
        .map_err(|_| JsValue::from_str(&format!("Missing method `{}`", name)))
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> JsValue {
    serde_json::to_string(value)
        .ok()
        .and_then(|json| JSON::parse(&json).ok())
        .unwrap_or(JsValue::NULL)
}

fn string_array<'a>(items: impl IntoIterator<Item = &'a str>) -> Array {
    items.into_iter().map(JsValue::from_str).collect()
}

pub struct JsCodeSurface {
    target: JsValue,
    add: Function,
    release: Function,
    reveal: Function,
}

impl JsCodeSurface {
    pub fn new(target: JsValue) -> Result<Self, JsValue> {
        Ok(Self {
            add: method(&target, "addDecorations")?,
            release: method(&target, "releaseDecorations")?,
            reveal: method(&target, "revealRange")?,
            target,
        })
    }
}

impl CodeSurface for JsCodeSurface {
    fn add_decorations(
        &mut self,
        ranges: &[SourceRange],
        style: &HighlightStyle,
    ) -> Vec<DecorationId> {
        match self.add.call2(&self.target, &to_js(ranges), &to_js(style)) {
            Ok(handles) => Array::from(&handles)
                .iter()
                .filter_map(|handle| handle.as_string())
                .map(DecorationId)
                .collect(),
            Err(_) => Vec::new(),
        }
    }

    fn release_decorations(&mut self, handles: &[DecorationId]) {
        let handles = string_array(handles.iter().map(DecorationId::as_str));
        let _ = self.release.call1(&self.target, &handles);
    }

    fn reveal_range(&mut self, range: SourceRange, mode: RevealMode) {
        let _ = self.reveal.call2(&self.target, &to_js(&range), &to_js(&mode));
    }
}

pub struct JsCanvasSurface {
    target: JsValue,
    apply: Function,
    clear: Function,
}

impl JsCanvasSurface {
    pub fn new(target: JsValue) -> Result<Self, JsValue> {
        Ok(Self {
            apply: method(&target, "applyHighlight")?,
            clear: method(&target, "clearHighlight")?,
            target,
        })
    }
}

impl CanvasSurface for JsCanvasSurface {
    fn apply_highlight(&mut self, element_ids: &[String]) {
        let ids = string_array(element_ids.iter().map(String::as_str));
        let _ = self.apply.call1(&self.target, &ids);
    }

    fn clear_highlight(&mut self, element_ids: &[String]) {
        let ids = string_array(element_ids.iter().map(String::as_str));
        let _ = self.clear.call1(&self.target, &ids);
    }
}
