//! Options for the extraction and redaction pipelines
//!
//! Both structs deserialize from partial JSON objects; missing fields take
//! their defaults.

use serde::{Deserialize, Serialize};

/// Text extraction behaviour
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtractOptions {
    /// Record a page whose text extraction fails as empty and keep going,
    /// instead of failing the whole document
    pub skip_failed_pages: bool,
}

/// Annotation removal behaviour
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RedactionOptions {
    /// Drop annotation objects left unreferenced after removal
    pub prune_orphans: bool,
    /// Compress streams before saving
    pub compress: bool,
}

impl Default for RedactionOptions {
    fn default() -> Self {
        Self {
            prune_orphans: true,
            compress: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_gives_defaults() {
        let extract: ExtractOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(extract, ExtractOptions::default());

        let redact: RedactionOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(redact, RedactionOptions::default());
        assert!(redact.prune_orphans);
    }

    #[test]
    fn test_partial_json_overrides_one_field() {
        let redact: RedactionOptions = serde_json::from_str(r#"{"compress":true}"#).unwrap();
        assert!(redact.compress);
        assert!(redact.prune_orphans);

        let extract: ExtractOptions =
            serde_json::from_str(r#"{"skipFailedPages":true}"#).unwrap();
        assert!(extract.skip_failed_pages);
    }
}
