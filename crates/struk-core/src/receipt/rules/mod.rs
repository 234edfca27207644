//! Rule-based field extractors for Indonesian/English receipts.

pub mod amounts;
pub mod category;
pub mod dates;
pub mod items;
pub mod merchant;
pub mod patterns;
pub mod totals;

pub use amounts::{format_currency, normalize_amount};
pub use category::{categorize, CategoryRule, CATEGORY_RULES};
pub use dates::{extract_date, is_date_line, DateExtractor};
pub use items::{extract_items, ItemExtractor};
pub use merchant::{extract_merchant, MerchantExtractor};
pub use totals::{extract_total, TotalExtractor};

/// Trait for extractors that scan a receipt's line sequence.
pub trait LineExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from the receipt lines, or `None` when no rule fires.
    fn extract(&self, lines: &[&str]) -> Option<Self::Output>;
}

/// Split OCR text into trimmed, non-empty lines, preserving order.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}
