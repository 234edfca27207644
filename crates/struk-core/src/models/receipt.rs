//! Receipt and expense data models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ulid::Ulid;

use crate::error::CategoryParseError;

/// Merchant name used when no header line could be found.
pub const UNKNOWN_MERCHANT: &str = "Unknown Merchant";

/// Name of the synthetic item substituted when no line items were found.
pub const GENERAL_PURCHASE: &str = "General Purchase";

/// Structured result of parsing one receipt's OCR text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedReceipt {
    /// Business name printed in the receipt header.
    pub merchant: String,

    /// Transaction date.
    pub date: NaiveDate,

    /// Transaction total in the receipt's printed unit.
    pub total: Decimal,

    /// Expense category.
    pub category: Category,

    /// Purchased items. Never empty.
    pub items: Vec<LineItem>,

    /// Text the receipt was parsed from.
    pub raw_text: String,

    /// OCR confidence (0.0 - 1.0).
    pub confidence: f32,
}

impl ParsedReceipt {
    /// Sum of `price * quantity` over all items.
    ///
    /// Items and total are extracted independently, so this may differ from
    /// [`ParsedReceipt::total`] on noisy input.
    pub fn items_total(&self) -> Decimal {
        self.items.iter().map(LineItem::subtotal).sum()
    }
}

/// A single purchased product or service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Item name.
    pub name: String,

    /// Unit price.
    pub price: Decimal,

    /// Quantity (at least 1).
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl LineItem {
    /// Create an item, trimming the name and clamping quantity to at least 1.
    pub fn new(name: impl Into<String>, price: Decimal, quantity: u32) -> Self {
        Self {
            name: name.into().trim().to_string(),
            price,
            quantity: quantity.max(1),
        }
    }

    /// Placeholder item covering the whole receipt.
    pub fn general_purchase(total: Decimal) -> Self {
        Self::new(GENERAL_PURCHASE, total, 1)
    }

    /// Price multiplied by quantity.
    pub fn subtotal(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Expense categories.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Food & Dining")]
    FoodAndDining,
    Groceries,
    Transportation,
    Healthcare,
    Shopping,
    Utilities,
    /// Only assigned manually; no keyword rule yields it.
    Entertainment,
    #[default]
    Other,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 8] = [
        Category::FoodAndDining,
        Category::Groceries,
        Category::Transportation,
        Category::Healthcare,
        Category::Shopping,
        Category::Utilities,
        Category::Entertainment,
        Category::Other,
    ];

    /// Human-readable category name.
    pub fn name(&self) -> &'static str {
        match self {
            Category::FoodAndDining => "Food & Dining",
            Category::Groceries => "Groceries",
            Category::Transportation => "Transportation",
            Category::Healthcare => "Healthcare",
            Category::Shopping => "Shopping",
            Category::Utilities => "Utilities",
            Category::Entertainment => "Entertainment",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CategoryParseError(wanted.to_string()))
    }
}

/// An expense record ready to hand to storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptRecord {
    /// Record identifier (see [`generate_receipt_id`]).
    pub id: String,

    pub date: NaiveDate,

    pub merchant: String,

    pub total: Decimal,

    pub category: Category,

    pub items: Vec<LineItem>,

    /// Stored receipt image, if the user chose to keep it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_text: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl ReceiptRecord {
    /// Build a record with a freshly generated identifier.
    pub fn from_parsed(parsed: ParsedReceipt) -> Self {
        Self {
            id: generate_receipt_id(),
            date: parsed.date,
            merchant: parsed.merchant,
            total: parsed.total,
            category: parsed.category,
            items: parsed.items,
            image_url: None,
            raw_text: Some(parsed.raw_text),
            confidence: Some(parsed.confidence),
        }
    }

    /// Attach a stored image location.
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }
}

/// Generate a unique, time-ordered receipt identifier (`receipt_<ulid>`).
pub fn generate_receipt_id() -> String {
    format!("receipt_{}", Ulid::new().to_string().to_lowercase())
}
