//! Bridge from core progress events to a JavaScript callback

use js_sys::Function;
use pdftools_core::{Progress, ProgressSink};
use wasm_bindgen::JsValue;

/// Forwards each event as `{ current, total, percentage, status }`
///
/// A missing callback ignores progress. Errors thrown by the callback are
/// ignored so a faulty UI handler cannot abort the operation.
pub struct JsProgress<'a> {
    callback: Option<&'a Function>,
}

impl<'a> JsProgress<'a> {
    pub fn new(callback: Option<&'a Function>) -> Self {
        Self { callback }
    }
}

impl ProgressSink for JsProgress<'_> {
    fn report(&mut self, progress: &Progress) {
        if let Some(callback) = self.callback {
            if let Ok(value) = serde_wasm_bindgen::to_value(progress) {
                let _ = callback.call1(&JsValue::null(), &value);
            }
        }
    }
}
