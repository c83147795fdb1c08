/*!
 * Tests for error types and conversions
 */

use ttml_scenes::errors::{AppError, DocumentError};

#[test]
fn test_documentError_wrongRoot_shouldDisplayElementName() {
    let error = DocumentError::WrongRoot("html".to_string());
    let display = format!("{}", error);
    assert!(display.contains("<html>"));
    assert!(display.contains("<tt>"));
}

#[test]
fn test_documentError_missingHead_shouldDisplayCorrectly() {
    let display = format!("{}", DocumentError::MissingHead);
    assert!(display.contains("<head>"));
}

#[test]
fn test_appError_fromDocumentError_shouldWrap() {
    let error: AppError = DocumentError::Xml("bad token".to_string()).into();
    let display = format!("{}", error);
    assert!(display.contains("Document error"));
    assert!(display.contains("bad token"));
}

#[test]
fn test_appError_fromIoError_shouldBecomeFileError() {
    let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
    let error: AppError = io_error.into();
    assert!(matches!(error, AppError::File(_)));
}

#[test]
fn test_appError_fromAnyhow_shouldKeepMessage() {
    let error: AppError = anyhow::anyhow!("something odd").into();
    assert!(format!("{}", error).contains("something odd"));
}
