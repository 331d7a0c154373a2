//! Cosmetic redaction detection and removal
//!
//! Cosmetic redactions are overlays (redaction markers, filled squares,
//! highlights, ink) attached to a page as annotations. The content below them
//! is still present and extractable. Annotations are used as the signal: the
//! analyzer counts them per page and the remover strips each page's
//! annotation array as a whole.
//!
//! Redactions drawn directly into a page's content stream are neither
//! detected nor removed, and proper (content-removing) redactions are never
//! reported.

use crate::config::RedactionOptions;
use crate::document::{
    delete_page_annotations, load_document, page_annotations, save_document, AnnotationKind,
};
use crate::error::Result;
use crate::progress::{CancellationToken, Progress, ProgressSink};
use lopdf::Document;
use serde::Serialize;
use tracing::{debug, info};

const NONE_FOUND_MESSAGE: &str =
    "No cosmetic redaction annotations found. If redactions are visible, they may be permanently applied.";

const CONTENT_STREAM_NOTE: &str =
    "Black rectangles drawn directly into page content are not detected or removed.";

/// Annotation counts by subtype
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnotationBreakdown {
    pub redact: u32,
    pub square: u32,
    pub highlight: u32,
    pub ink: u32,
    pub other: u32,
}

impl AnnotationBreakdown {
    fn record(&mut self, kind: AnnotationKind) {
        match kind {
            AnnotationKind::Redact => self.redact += 1,
            AnnotationKind::Square => self.square += 1,
            AnnotationKind::Highlight => self.highlight += 1,
            AnnotationKind::Ink => self.ink += 1,
            AnnotationKind::Other => self.other += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.redact + self.square + self.highlight + self.ink + self.other
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedactionAnalysis {
    pub total_pages: u32,
    pub annotations_found: u32,
    pub annotations_removed: u32,
    /// 1-indexed, strictly increasing
    pub pages_with_redactions: Vec<u32>,
    /// Always false: permanent redactions are not detected
    pub has_proper_redactions: bool,
    pub warning_messages: Vec<String>,
    pub by_type: AnnotationBreakdown,
}

impl RedactionAnalysis {
    fn new(total_pages: u32) -> Self {
        Self {
            total_pages,
            ..Self::default()
        }
    }

    fn record_page(&mut self, page_number: u32, kinds: &[AnnotationKind]) {
        self.annotations_found += kinds.len() as u32;
        self.pages_with_redactions.push(page_number);
        for &kind in kinds {
            self.by_type.record(kind);
        }
    }
}

/// Cleaned document bytes plus what was removed
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RemovalOutcome {
    pub data: Vec<u8>,
    pub analysis: RedactionAnalysis,
}

/// Count the annotations on every page of a document
pub fn analyze_redactions(
    doc: &Document,
    progress: &mut impl ProgressSink,
    cancel: &CancellationToken,
) -> Result<RedactionAnalysis> {
    let pages = doc.get_pages();
    let total = pages.len() as u32;
    let mut analysis = RedactionAnalysis::new(total);

    for (&page_number, &page_id) in &pages {
        cancel.check()?;

        if let Some(kinds) = page_annotations(doc, page_number, page_id)? {
            if !kinds.is_empty() {
                debug!(page = page_number, count = kinds.len(), "Found annotations");
                analysis.record_page(page_number, &kinds);
            }
        }

        progress.report(&Progress::new(
            page_number,
            total,
            format!("Scanning page {} of {}", page_number, total),
        ));
    }

    if analysis.annotations_found > 0 {
        analysis.warning_messages.push(format!(
            "Found {} annotation(s) on {} page(s) that may be hiding content",
            analysis.annotations_found,
            analysis.pages_with_redactions.len()
        ));
    } else {
        analysis.warning_messages.push(NONE_FOUND_MESSAGE.to_string());
    }

    info!(
        pages = total,
        annotations = analysis.annotations_found,
        affected_pages = analysis.pages_with_redactions.len(),
        "Redaction analysis complete"
    );
    Ok(analysis)
}

/// Load PDF bytes and analyze them
pub fn analyze_pdf(
    bytes: &[u8],
    progress: &mut impl ProgressSink,
    cancel: &CancellationToken,
) -> Result<RedactionAnalysis> {
    let doc = load_document(bytes)?;
    analyze_redactions(&doc, progress, cancel)
}

/// Strip every page's annotation array and serialize the result
///
/// The input document is left untouched; a copy is modified and saved.
pub fn remove_redactions(
    doc: &Document,
    options: &RedactionOptions,
    progress: &mut impl ProgressSink,
    cancel: &CancellationToken,
) -> Result<RemovalOutcome> {
    let mut working = doc.clone();
    let pages = working.get_pages();
    let total = pages.len() as u32;
    let mut analysis = RedactionAnalysis::new(total);

    for (&page_number, &page_id) in &pages {
        cancel.check()?;

        if let Some(kinds) = page_annotations(&working, page_number, page_id)? {
            if !kinds.is_empty() {
                delete_page_annotations(&mut working, page_number, page_id)?;
                debug!(page = page_number, count = kinds.len(), "Removed annotations");
                analysis.record_page(page_number, &kinds);
                analysis.annotations_removed += kinds.len() as u32;
            }
        }

        progress.report(&Progress::new(
            page_number,
            total,
            format!("Removing annotations from page {} of {}", page_number, total),
        ));
    }

    // Content streams are left as is, see CONTENT_STREAM_NOTE.
    if analysis.annotations_removed > 0 {
        analysis.warning_messages.push(format!(
            "Removed {} annotation(s) from {} page(s)",
            analysis.annotations_removed,
            analysis.pages_with_redactions.len()
        ));
    } else {
        analysis.warning_messages.push(NONE_FOUND_MESSAGE.to_string());
    }
    analysis
        .warning_messages
        .push(CONTENT_STREAM_NOTE.to_string());

    if options.prune_orphans {
        let pruned = working.prune_objects();
        debug!(objects = pruned.len(), "Pruned unreferenced objects");
    }
    if options.compress {
        working.compress();
    }

    let data = save_document(&mut working)?;

    info!(
        removed = analysis.annotations_removed,
        affected_pages = analysis.pages_with_redactions.len(),
        output_bytes = data.len(),
        "Redaction removal complete"
    );
    Ok(RemovalOutcome { data, analysis })
}

/// Load PDF bytes and remove their annotations
pub fn remove_from_pdf(
    bytes: &[u8],
    options: &RedactionOptions,
    progress: &mut impl ProgressSink,
    cancel: &CancellationToken,
) -> Result<RemovalOutcome> {
    let doc = load_document(bytes)?;
    remove_redactions(&doc, options, progress, cancel)
}
