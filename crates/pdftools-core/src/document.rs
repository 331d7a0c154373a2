//! PDF object-model access
//!
//! Everything that touches `lopdf` directly lives here: loading and saving
//! documents, per-page text extraction, and reading or deleting a page's
//! annotation array. The converters above this module only see page numbers,
//! strings and annotation kinds.

use crate::content_text::extract_page_lines;
use crate::error::{PdfToolsError, Result};
use lopdf::{Document, Object, ObjectId};
use serde::Serialize;
use tracing::debug;

/// Load and validate a PDF from raw bytes
///
/// Rejects files without a `%PDF-` header and encrypted documents, since
/// neither text extraction nor annotation removal can work on them.
pub fn load_document(bytes: &[u8]) -> Result<Document> {
    if bytes.len() < 8 {
        return Err(PdfToolsError::ParseError(
            "File too small to be a valid PDF".into(),
        ));
    }

    if !bytes.starts_with(b"%PDF-") {
        return Err(PdfToolsError::ParseError(
            "Not a valid PDF file (missing %PDF- header)".into(),
        ));
    }

    let doc = Document::load_mem(bytes).map_err(|e| PdfToolsError::ParseError(e.to_string()))?;

    if doc.is_encrypted() {
        return Err(PdfToolsError::ParseError(
            "Encrypted PDFs are not supported".into(),
        ));
    }

    debug!(
        pages = doc.get_pages().len(),
        size_bytes = bytes.len(),
        "Loaded PDF"
    );
    Ok(doc)
}

/// Serialize a document back to bytes
pub fn save_document(doc: &mut Document) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| PdfToolsError::SerializationError(format!("Save failed: {}", e)))?;
    Ok(buffer)
}

/// Parse PDF bytes and return page count
pub fn page_count(bytes: &[u8]) -> Result<u32> {
    let doc = load_document(bytes)?;
    Ok(doc.get_pages().len() as u32)
}

/// Source of per-page plain text
///
/// Page numbers are 1-indexed. Implemented for `lopdf::Document`; tests and
/// alternative extractors can supply their own.
pub trait TextSource {
    fn page_count(&self) -> u32;

    fn page_text(&self, page_number: u32) -> Result<String>;
}

impl TextSource for Document {
    fn page_count(&self) -> u32 {
        self.get_pages().len() as u32
    }

    fn page_text(&self, page_number: u32) -> Result<String> {
        let render_error = |reason: String| PdfToolsError::RenderError {
            page: page_number,
            reason,
        };

        let page_id = *self
            .get_pages()
            .get(&page_number)
            .ok_or_else(|| render_error(format!("page {} not found", page_number)))?;

        extract_page_lines(self, page_id).map_err(|e| render_error(e.to_string()))
    }
}

/// Coarse annotation category, taken from the annotation's `/Subtype`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AnnotationKind {
    Redact,
    Square,
    Highlight,
    Ink,
    Other,
}

impl AnnotationKind {
    pub fn from_subtype(subtype: &[u8]) -> Self {
        match subtype {
            b"Redact" => AnnotationKind::Redact,
            b"Square" => AnnotationKind::Square,
            b"Highlight" => AnnotationKind::Highlight,
            b"Ink" => AnnotationKind::Ink,
            _ => AnnotationKind::Other,
        }
    }
}

/// Read the annotation array attached to a page
///
/// Returns `None` when the page has no `/Annots` entry, or when the entry is
/// `null` or a reference to a missing object (both mean absent in PDF). The
/// entry may be an inline array or a reference to one; any other value is a
/// malformed page. Entries that cannot be resolved to a dictionary count as
/// `Other`.
pub fn page_annotations(
    doc: &Document,
    page_number: u32,
    page_id: ObjectId,
) -> Result<Option<Vec<AnnotationKind>>> {
    let page_dict = doc
        .get_object(page_id)
        .and_then(Object::as_dict)
        .map_err(|e| PdfToolsError::MalformedPage {
            page: page_number,
            reason: e.to_string(),
        })?;

    let annots = match page_dict.get(b"Annots") {
        Ok(obj) => obj,
        Err(_) => return Ok(None),
    };

    let resolved = match doc.dereference(annots) {
        Ok((_, Object::Null)) | Err(lopdf::Error::ObjectNotFound) => return Ok(None),
        Ok((_, obj)) => obj,
        Err(e) => {
            return Err(PdfToolsError::MalformedPage {
                page: page_number,
                reason: format!("/Annots cannot be resolved: {}", e),
            })
        }
    };

    let array = resolved
        .as_array()
        .map_err(|e| PdfToolsError::MalformedPage {
            page: page_number,
            reason: format!("/Annots is not an array: {}", e),
        })?;

    let kinds: Vec<AnnotationKind> = array
        .iter()
        .map(|entry| annotation_kind(doc, entry))
        .collect();

    Ok(Some(kinds))
}

fn annotation_kind(doc: &Document, entry: &Object) -> AnnotationKind {
    doc.dereference(entry)
        .and_then(|(_, obj)| obj.as_dict())
        .and_then(|dict| dict.get(b"Subtype"))
        .and_then(Object::as_name)
        .map(AnnotationKind::from_subtype)
        .unwrap_or(AnnotationKind::Other)
}

/// Delete the `/Annots` key from a page dictionary
///
/// Returns whether an entry was present.
pub fn delete_page_annotations(
    doc: &mut Document,
    page_number: u32,
    page_id: ObjectId,
) -> Result<bool> {
    let page_dict = doc
        .get_object_mut(page_id)
        .and_then(Object::as_dict_mut)
        .map_err(|e| PdfToolsError::MalformedPage {
            page: page_number,
            reason: e.to_string(),
        })?;

    Ok(page_dict.remove(b"Annots").is_some())
}
