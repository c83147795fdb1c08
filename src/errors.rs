/*!
 * Error types for the ttml-scenes crate.
 *
 * Only whole-document failures are represented here. Problems scoped to a
 * single element, style or region are logged and the offending unit is
 * dropped, so they never surface as an `Err`.
 */

use thiserror::Error;

/// Fatal, document-level failures: the parse produces no scenes at all
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// The input is not well-formed XML
    #[error("Failed to parse XML: {0}")]
    Xml(String),

    /// The root element is not `<tt>`
    #[error("Unexpected root element <{0}>, expected <tt>")]
    WrongRoot(String),

    /// The `<tt>` element has no `<head>` child
    #[error("Document has no <head> element")]
    MissingHead,
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from document parsing
    #[error("Document error: {0}")]
    Document(#[from] DocumentError),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
