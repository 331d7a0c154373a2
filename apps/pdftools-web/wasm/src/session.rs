//! Stateful redaction session
//!
//! Holds the parsed document in Rust memory so the UI can analyze first and
//! remove afterwards without parsing the file twice.

use crate::progress::JsProgress;
use lopdf::Document;
use pdftools_core::{
    analyze_redactions, load_document, remove_redactions, CancellationToken, RedactionAnalysis,
    RedactionOptions, RemovalOutcome,
};
use serde::Serialize;
use tracing::info;
use wasm_bindgen::prelude::*;

/// Loaded document with metadata
struct LoadedDocument {
    name: String,
    size_bytes: usize,
    document: Document,
}

/// Document summary for JS serialization
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentSummary {
    pub name: String,
    pub page_count: u32,
    pub size_bytes: usize,
}

/// Handle that cancels a running session operation
///
/// Kept separate from the session so it can be called from inside a
/// progress callback while the session itself is busy.
#[wasm_bindgen]
pub struct CancelHandle {
    token: CancellationToken,
}

#[wasm_bindgen]
impl CancelHandle {
    pub fn cancel(&self) {
        self.token.cancel();
    }

    #[wasm_bindgen(getter, js_name = isCancelled)]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Analyze-then-remove session for a single document
#[wasm_bindgen]
pub struct RedactSession {
    loaded: Option<LoadedDocument>,
    analysis: Option<RedactionAnalysis>,
    options: RedactionOptions,
    cancel: CancellationToken,
    progress_callback: Option<js_sys::Function>,
}

impl Default for RedactSession {
    fn default() -> Self {
        Self::new()
    }
}

#[wasm_bindgen]
impl RedactSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            loaded: None,
            analysis: None,
            options: RedactionOptions::default(),
            cancel: CancellationToken::new(),
            progress_callback: None,
        }
    }

    /// Set a progress callback function
    /// Callback signature: ({ current, total, percentage, status }) => void
    #[wasm_bindgen(js_name = setProgressCallback)]
    pub fn set_progress_callback(&mut self, callback: js_sys::Function) {
        self.progress_callback = Some(callback);
    }

    /// Set removal options from a partial object, e.g. `{ compress: true }`
    #[wasm_bindgen(js_name = setOptions)]
    pub fn set_options(&mut self, options: JsValue) -> Result<(), JsValue> {
        self.options = crate::parse_options(options)?;
        Ok(())
    }

    /// Get a handle that can cancel the current or next operation
    #[wasm_bindgen(js_name = cancelHandle)]
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            token: self.cancel.clone(),
        }
    }

    /// Load a document, replacing any previous one
    /// Returns `{ name, pageCount, sizeBytes }`
    #[wasm_bindgen(js_name = loadDocument)]
    pub fn load_document(&mut self, name: &str, bytes: &[u8]) -> Result<JsValue, JsValue> {
        let summary = self
            .load_document_internal(name, bytes)
            .map_err(|e| JsValue::from_str(&e))?;

        serde_wasm_bindgen::to_value(&summary)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Scan the loaded document for annotation overlays
    pub fn analyze(&mut self) -> Result<JsValue, JsValue> {
        let callback = self.progress_callback.clone();
        let analysis = self
            .analyze_internal(&mut JsProgress::new(callback.as_ref()))
            .map_err(|e| JsValue::from_str(&e))?;

        serde_wasm_bindgen::to_value(&analysis)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Result of the last analysis or removal, if any
    #[wasm_bindgen(js_name = getAnalysis)]
    pub fn get_analysis(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.analysis)
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
    }

    /// Check if session is ready for execution
    #[wasm_bindgen(js_name = canExecute)]
    pub fn can_execute(&self) -> bool {
        self.loaded.is_some() && !self.cancel.is_cancelled()
    }

    /// Remove all annotations and return the cleaned PDF as Uint8Array
    pub fn execute(&mut self) -> Result<js_sys::Uint8Array, JsValue> {
        let callback = self.progress_callback.clone();
        let outcome = self
            .execute_internal(&mut JsProgress::new(callback.as_ref()))
            .map_err(|e| JsValue::from_str(&e))?;

        let array = js_sys::Uint8Array::new_with_length(outcome.data.len() as u32);
        array.copy_from(&outcome.data);
        Ok(array)
    }

    /// Drop the loaded document and clear any cancellation
    pub fn reset(&mut self) {
        self.loaded = None;
        self.analysis = None;
        self.cancel = CancellationToken::new();
    }
}

impl RedactSession {
    /// Internal method to load a document (testable without JsValue)
    fn load_document_internal(
        &mut self,
        name: &str,
        bytes: &[u8],
    ) -> Result<DocumentSummary, String> {
        let document = load_document(bytes).map_err(|e| e.to_string())?;

        let summary = DocumentSummary {
            name: name.to_string(),
            page_count: document.get_pages().len() as u32,
            size_bytes: bytes.len(),
        };
        info!(name, pages = summary.page_count, "Document loaded");

        self.loaded = Some(LoadedDocument {
            name: name.to_string(),
            size_bytes: bytes.len(),
            document,
        });
        self.analysis = None;

        Ok(summary)
    }

    fn analyze_internal(
        &mut self,
        progress: &mut JsProgress<'_>,
    ) -> Result<RedactionAnalysis, String> {
        let loaded = self.loaded.as_ref().ok_or("No document loaded")?;

        let analysis = analyze_redactions(&loaded.document, progress, &self.cancel)
            .map_err(|e| format!("Analysis failed: {}", e))?;

        self.analysis = Some(analysis.clone());
        Ok(analysis)
    }

    fn execute_internal(&mut self, progress: &mut JsProgress<'_>) -> Result<RemovalOutcome, String> {
        let loaded = self.loaded.as_ref().ok_or("No document loaded")?;

        let outcome = remove_redactions(&loaded.document, &self.options, progress, &self.cancel)
            .map_err(|e| format!("Removal failed: {}", e))?;

        info!(
            name = %loaded.name,
            input_bytes = loaded.size_bytes,
            output_bytes = outcome.data.len(),
            "Annotations removed"
        );
        self.analysis = Some(outcome.analysis.clone());
        Ok(outcome)
    }
}
