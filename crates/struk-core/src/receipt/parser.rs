//! Receipt parser driving the rule-based extractors.

use std::time::Instant;

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::models::config::ParsingConfig;
use crate::models::receipt::{Category, LineItem, ParsedReceipt, UNKNOWN_MERCHANT};
use crate::ocr::OcrOutput;

use super::rules::{
    categorize, split_lines, DateExtractor, ItemExtractor, LineExtractor, MerchantExtractor,
    TotalExtractor,
};
use super::ReceiptExtractor;

/// Result of parsing one receipt, with the fields that fell back to defaults.
#[derive(Debug, Clone)]
pub struct ParseReport {
    /// Parsed receipt.
    pub receipt: ParsedReceipt,
    /// Fields that could not be extracted.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Rule-based receipt parser.
#[derive(Debug, Clone)]
pub struct ReceiptParser {
    /// Fixed date used instead of the system clock when no date is found.
    today: Option<NaiveDate>,
    /// Whether to assign a category from keywords.
    auto_categorize: bool,
    /// Confidence reported for text that did not come from OCR.
    default_confidence: f32,
}

impl ReceiptParser {
    /// Create a new parser with default settings.
    pub fn new() -> Self {
        Self::from_config(&ParsingConfig::default())
    }

    /// Create a parser from configuration.
    pub fn from_config(config: &ParsingConfig) -> Self {
        Self {
            today: None,
            auto_categorize: config.auto_categorize,
            default_confidence: config.default_confidence,
        }
    }

    /// Use a fixed date as "today" for receipts without a date.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Set automatic categorization.
    pub fn with_auto_categorize(mut self, enabled: bool) -> Self {
        self.auto_categorize = enabled;
        self
    }

    /// Set the confidence reported for manually entered text.
    pub fn with_default_confidence(mut self, confidence: f32) -> Self {
        self.default_confidence = confidence.clamp(0.0, 1.0);
        self
    }

    /// Confidence reported for text that did not come from OCR.
    pub fn default_confidence(&self) -> f32 {
        self.default_confidence
    }

    /// Parse receipt text that did not come from OCR.
    pub fn parse(&self, text: &str) -> ParsedReceipt {
        self.parse_with_confidence(text, self.default_confidence)
    }

    /// Parse receipt text, carrying the OCR confidence through.
    pub fn parse_with_confidence(&self, text: &str, confidence: f32) -> ParsedReceipt {
        self.parse_report(text, confidence).receipt
    }

    /// Parse receipt text and report which fields fell back to defaults.
    pub fn parse_report(&self, text: &str, confidence: f32) -> ParseReport {
        let start = Instant::now();
        let mut warnings = Vec::new();

        let lines = split_lines(text);
        info!("Parsing receipt from {} lines of text", lines.len());

        let merchant = MerchantExtractor::new().extract(&lines).unwrap_or_else(|| {
            warnings.push("Could not extract merchant".to_string());
            UNKNOWN_MERCHANT.to_string()
        });

        let date = DateExtractor::new().extract(&lines).unwrap_or_else(|| {
            warnings.push("Could not extract date, using today".to_string());
            self.today()
        });

        let total = TotalExtractor::new().extract(&lines).unwrap_or_else(|| {
            warnings.push("Could not extract total".to_string());
            Default::default()
        });

        let items = ItemExtractor::new(total).extract(&lines).unwrap_or_else(|| {
            warnings.push("Could not extract line items".to_string());
            vec![LineItem::general_purchase(total)]
        });

        let category = if self.auto_categorize {
            categorize(&merchant, &items)
        } else {
            Category::Other
        };

        debug!(
            "Parsed receipt from {} on {}: total {}, {} items, {}",
            merchant,
            date,
            total,
            items.len(),
            category
        );

        ParseReport {
            receipt: ParsedReceipt {
                merchant,
                date,
                total,
                category,
                items,
                raw_text: text.to_string(),
                confidence,
            },
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }

    fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }
}

impl Default for ReceiptParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ReceiptExtractor for ReceiptParser {
    fn extract(&self, ocr_output: &OcrOutput) -> ParsedReceipt {
        self.parse_with_confidence(&ocr_output.text, ocr_output.confidence)
    }

    fn extract_from_text(&self, text: &str) -> ParsedReceipt {
        self.parse(text)
    }
}
