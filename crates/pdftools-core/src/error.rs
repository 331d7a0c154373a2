use thiserror::Error;

#[derive(Error, Debug)]
pub enum PdfToolsError {
    #[error("Failed to parse PDF: {0}")]
    ParseError(String),

    #[error("Failed to extract text from page {page}: {reason}")]
    RenderError { page: u32, reason: String },

    #[error("Malformed page {page}: {reason}")]
    MalformedPage { page: u32, reason: String },

    #[error("PDF operation failed: {0}")]
    OperationError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Operation cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, PdfToolsError>;
