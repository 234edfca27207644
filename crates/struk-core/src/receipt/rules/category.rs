//! Keyword-based expense categorization.

use crate::models::receipt::{Category, LineItem};

/// A category and the keywords that select it.
#[derive(Debug, Clone, Copy)]
pub struct CategoryRule {
    pub category: Category,
    /// Substrings looked up in the lower-cased merchant name.
    pub merchant_keywords: &'static [&'static str],
    /// Substrings looked up in the lower-cased, space-joined item names.
    pub item_keywords: &'static [&'static str],
}

impl CategoryRule {
    fn matches(&self, merchant: &str, item_names: &str) -> bool {
        self.merchant_keywords.iter().any(|k| merchant.contains(k))
            || self.item_keywords.iter().any(|k| item_names.contains(k))
    }
}

/// Rules in priority order; the first match wins.
pub static CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule {
        category: Category::FoodAndDining,
        merchant_keywords: &["restoran", "cafe", "warung", "makanan"],
        item_keywords: &["makan", "minuman"],
    },
    CategoryRule {
        category: Category::Groceries,
        merchant_keywords: &["indomaret", "alfamart", "minimarket", "supermarket"],
        item_keywords: &["susu", "roti", "beras"],
    },
    CategoryRule {
        category: Category::Transportation,
        merchant_keywords: &["bensin", "spbu", "transport"],
        item_keywords: &["bensin"],
    },
    CategoryRule {
        category: Category::Healthcare,
        merchant_keywords: &["apotek", "klinik", "rumah sakit"],
        item_keywords: &["obat"],
    },
    CategoryRule {
        category: Category::Shopping,
        merchant_keywords: &["toko", "mall", "belanja"],
        item_keywords: &[],
    },
    CategoryRule {
        category: Category::Utilities,
        merchant_keywords: &["listrik", "air", "internet", "telepon"],
        item_keywords: &[],
    },
];

/// Map a merchant and its items to an expense category.
pub fn categorize(merchant: &str, items: &[LineItem]) -> Category {
    let merchant = merchant.to_lowercase();
    let item_names = items
        .iter()
        .map(|item| item.name.to_lowercase())
        .collect::<Vec<_>>()
        .join(" ");

    CATEGORY_RULES
        .iter()
        .find(|rule| rule.matches(&merchant, &item_names))
        .map_or(Category::Other, |rule| rule.category)
}
