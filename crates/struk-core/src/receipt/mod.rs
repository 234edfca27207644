//! Receipt field extraction module.

mod parser;
pub mod rules;

pub use parser::{ParseReport, ReceiptParser};

use crate::models::receipt::ParsedReceipt;
use crate::ocr::OcrOutput;

/// Trait for receipt field extractors.
///
/// Extraction is infallible: every field degrades to a default instead of
/// failing the whole receipt.
pub trait ReceiptExtractor {
    /// Extract receipt data from OCR output, keeping its confidence.
    fn extract(&self, ocr_output: &OcrOutput) -> ParsedReceipt;

    /// Extract receipt data from plain text that did not come from OCR.
    fn extract_from_text(&self, text: &str) -> ParsedReceipt;
}
