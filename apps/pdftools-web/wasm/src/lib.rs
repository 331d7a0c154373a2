//! WASM bindings for PDF text extraction and redaction removal
//!
//! All PDF work happens in Rust; JavaScript only handles DOM events and
//! file I/O.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { initLogging, extractTextFromPdf, RedactSession } from './pkg/pdftools_wasm.js';
//!
//! await init();
//! initLogging("info");
//!
//! // Text extraction
//! const result = extractTextFromPdf(bytes, { skipFailedPages: true }, (p) => updateUI(p.percentage, p.status));
//! if (!result.hasText) showScannedWarning();
//! download(result.markdown, "document.md");
//!
//! // Redaction removal
//! const session = new RedactSession();
//! session.setProgressCallback((p) => updateUI(p.percentage, p.status));
//! session.loadDocument("file.pdf", bytes);
//! const analysis = session.analyze();
//! const cleaned = session.execute();
//! downloadBlob(cleaned, "unredacted.pdf");
//! ```

pub mod logging;
pub mod progress;
pub mod session;

use pdftools_core::{CancellationToken, ExtractOptions, ExtractedPage, RedactionOptions};
use progress::JsProgress;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

// Re-export main types for JavaScript
pub use session::{CancelHandle, DocumentSummary, RedactSession};

/// Initialize the WASM module
/// Called automatically by wasm-bindgen
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Route tracing output to the browser console
/// `level` is a filter directive such as "info" or "pdftools_core=debug"
#[wasm_bindgen(js_name = initLogging)]
pub fn init_logging(level: Option<String>) -> Result<(), JsValue> {
    let level = level.unwrap_or_else(|| logging::DEFAULT_LEVEL.to_string());
    logging::init(&level).map_err(|e| JsValue::from_str(&e))
}

/// Get the library version
#[wasm_bindgen(js_name = getVersion)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Get page count from PDF bytes
#[wasm_bindgen(js_name = getPageCount)]
pub fn get_page_count(bytes: &[u8]) -> Result<u32, JsValue> {
    pdftools_core::page_count(bytes).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Convert `[{ pageNumber, text, isEmpty }]` records to markdown
#[wasm_bindgen(js_name = convertToMarkdown)]
pub fn convert_to_markdown(pages: JsValue) -> Result<String, JsValue> {
    let pages: Vec<ExtractedPage> = serde_wasm_bindgen::from_value(pages)
        .map_err(|e| JsValue::from_str(&format!("Invalid pages: {}", e)))?;
    Ok(pdftools_core::convert_to_markdown(&pages))
}

/// Extract per-page text, plain text and markdown from a PDF
#[wasm_bindgen(js_name = extractTextFromPdf)]
pub fn extract_text_from_pdf(
    bytes: &[u8],
    options: JsValue,
    on_progress: Option<js_sys::Function>,
) -> Result<JsValue, JsValue> {
    let options: ExtractOptions = parse_options(options)?;
    let result = pdftools_core::extract_text_from_pdf(
        bytes,
        &options,
        &mut JsProgress::new(on_progress.as_ref()),
        &CancellationToken::new(),
    )
    .map_err(|e| JsValue::from_str(&format!("Text extraction failed: {}", e)))?;

    serde_wasm_bindgen::to_value(&result)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Count annotation overlays per page without changing the document
#[wasm_bindgen(js_name = analyzeRedactions)]
pub fn analyze_redactions(
    bytes: &[u8],
    on_progress: Option<js_sys::Function>,
) -> Result<JsValue, JsValue> {
    let analysis = pdftools_core::analyze_pdf(
        bytes,
        &mut JsProgress::new(on_progress.as_ref()),
        &CancellationToken::new(),
    )
    .map_err(|e| JsValue::from_str(&format!("Analysis failed: {}", e)))?;

    serde_wasm_bindgen::to_value(&analysis)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Strip annotation overlays; returns `{ data: Uint8Array, analysis }`
#[wasm_bindgen(js_name = removeRedactions)]
pub fn remove_redactions(
    bytes: &[u8],
    options: JsValue,
    on_progress: Option<js_sys::Function>,
) -> Result<JsValue, JsValue> {
    let options: RedactionOptions = parse_options(options)?;
    let outcome = pdftools_core::remove_from_pdf(
        bytes,
        &options,
        &mut JsProgress::new(on_progress.as_ref()),
        &CancellationToken::new(),
    )
    .map_err(|e| JsValue::from_str(&format!("Removal failed: {}", e)))?;

    let data = js_sys::Uint8Array::new_with_length(outcome.data.len() as u32);
    data.copy_from(&outcome.data);
    let analysis = serde_wasm_bindgen::to_value(&outcome.analysis)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))?;

    let result = js_sys::Object::new();
    js_sys::Reflect::set(&result, &JsValue::from_str("data"), &data)?;
    js_sys::Reflect::set(&result, &JsValue::from_str("analysis"), &analysis)?;
    Ok(result.into())
}

/// Deserialize an options object; `undefined` or `null` gives the defaults
pub(crate) fn parse_options<T: DeserializeOwned + Default>(value: JsValue) -> Result<T, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid options: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_version() {
        let version = get_version();
        assert!(!version.is_empty());
    }
}
