//! Text extraction and cosmetic redaction removal for PDF documents
//!
//! This crate provides the client-side PDF logic behind the browser tools,
//! using lopdf for the document model.
//!
//! Two independent pipelines are available:
//! - `extract_text_from_pdf`: per-page text plus a heuristic markdown rendition
//! - `analyze_redactions` / `remove_redactions`: find and strip annotation
//!   overlays that hide content without deleting it

pub mod config;
pub mod content_text;
pub mod document;
pub mod error;
pub mod extract;
pub mod markdown;
pub mod progress;
pub mod redact;

#[cfg(test)]
mod test_support;

pub use config::{ExtractOptions, RedactionOptions};
pub use document::{load_document, page_count, save_document, AnnotationKind, TextSource};
pub use error::{PdfToolsError, Result};
pub use extract::{extract_from_source, extract_text_from_pdf, ExtractResult, ExtractedPage};
pub use markdown::convert_to_markdown;
pub use progress::{CancellationToken, Progress, ProgressSink};
pub use redact::{
    analyze_pdf, analyze_redactions, remove_from_pdf, remove_redactions, AnnotationBreakdown,
    RedactionAnalysis, RemovalOutcome,
};
