//! Error types for the struk-core library.
//!
//! Receipt text parsing itself never fails; these errors cover the OCR
//! boundary, configuration and the few string conversions that can reject
//! their input.

use thiserror::Error;

/// Main error type for the struk library.
#[derive(Error, Debug)]
pub enum StrukError {
    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Unknown expense category.
    #[error(transparent)]
    Category(#[from] CategoryParseError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors reported by the OCR collaborator.
#[derive(Error, Debug)]
pub enum OcrError {
    /// The engine failed to recognize the image.
    #[error("text recognition failed: {0}")]
    Engine(String),

    /// Invalid image format or dimensions.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// Recognition succeeded but produced no text.
    #[error("no text detected in image")]
    NoText,
}

/// A category name that is not part of the fixed category set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct CategoryParseError(pub String);

/// Result type for the struk library.
pub type Result<T> = std::result::Result<T, StrukError>;
