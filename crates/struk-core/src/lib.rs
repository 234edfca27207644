//! Core library for receipt OCR processing.
//!
//! This crate provides:
//! - Amount normalization for Indonesian/English currency strings
//! - Receipt field extraction (merchant, date, total, line items)
//! - Keyword-based expense categorization
//! - An OCR boundary that feeds recognized text into the parser

pub mod error;
pub mod models;
pub mod ocr;
pub mod receipt;

pub use error::{OcrError, Result, StrukError};
pub use models::config::{OcrConfig, OcrLanguage, StrukConfig};
pub use models::receipt::{
    generate_receipt_id, Category, LineItem, ParsedReceipt, ReceiptRecord, UNKNOWN_MERCHANT,
};
pub use ocr::{BoundingBox, OcrEngine, OcrOutput, ReceiptScanner};
pub use receipt::rules::{categorize, format_currency, normalize_amount};
pub use receipt::{ParseReport, ReceiptExtractor, ReceiptParser};
