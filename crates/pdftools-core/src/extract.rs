//! Text extraction orchestrator
//!
//! Walks the pages of a document in order, collects their text and builds
//! the plain text and markdown renditions.

use crate::config::ExtractOptions;
use crate::document::{load_document, TextSource};
use crate::error::{PdfToolsError, Result};
use crate::markdown::convert_to_markdown;
use crate::progress::{CancellationToken, Progress, ProgressSink};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Text of a single page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedPage {
    /// 1-indexed
    pub page_number: u32,
    pub text: String,
    pub is_empty: bool,
}

impl ExtractedPage {
    /// Surrounding whitespace is trimmed before the emptiness check
    pub fn new(page_number: u32, text: &str) -> Self {
        let text = text.trim().to_string();
        Self {
            page_number,
            is_empty: text.is_empty(),
            text,
        }
    }
}

/// Result of extracting a whole document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractResult {
    pub pages: Vec<ExtractedPage>,
    pub full_text: String,
    pub markdown: String,
    /// False for scanned or image-only documents
    pub has_text: bool,
    pub total_pages: u32,
    /// Pages that failed and were recorded as empty
    pub warnings: Vec<String>,
}

impl ExtractResult {
    fn from_pages(pages: Vec<ExtractedPage>, warnings: Vec<String>) -> Self {
        let full_text = pages
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
            .trim()
            .to_string();

        Self {
            markdown: convert_to_markdown(&pages),
            has_text: pages.iter().any(|p| !p.is_empty),
            total_pages: pages.len() as u32,
            full_text,
            pages,
            warnings,
        }
    }
}

/// Extract text and markdown from PDF bytes
pub fn extract_text_from_pdf(
    bytes: &[u8],
    options: &ExtractOptions,
    progress: &mut impl ProgressSink,
    cancel: &CancellationToken,
) -> Result<ExtractResult> {
    let doc = load_document(bytes)?;
    extract_from_source(&doc, options, progress, cancel)
}

/// Extract text and markdown from any page text source
///
/// Pages are visited in increasing order with one progress event each.
/// A page failure aborts the run unless `skip_failed_pages` is set.
pub fn extract_from_source<S: TextSource + ?Sized>(
    source: &S,
    options: &ExtractOptions,
    progress: &mut impl ProgressSink,
    cancel: &CancellationToken,
) -> Result<ExtractResult> {
    let total = source.page_count();
    let mut pages = Vec::with_capacity(total as usize);
    let mut warnings = Vec::new();

    for page_number in 1..=total {
        cancel.check()?;

        let text = match source.page_text(page_number) {
            Ok(text) => text,
            Err(e @ PdfToolsError::RenderError { .. }) if options.skip_failed_pages => {
                warn!(page = page_number, error = %e, "Skipping page after extraction failure");
                warnings.push(e.to_string());
                String::new()
            }
            Err(e) => return Err(e),
        };

        let page = ExtractedPage::new(page_number, &text);
        debug!(
            page = page_number,
            chars = page.text.len(),
            empty = page.is_empty,
            "Extracted page"
        );
        pages.push(page);

        progress.report(&Progress::new(
            page_number,
            total,
            format!("Extracting text from page {} of {}", page_number, total),
        ));
    }

    let result = ExtractResult::from_pages(pages, warnings);
    info!(
        pages = result.total_pages,
        has_text = result.has_text,
        skipped = result.warnings.len(),
        "Text extraction complete"
    );
    Ok(result)
}
