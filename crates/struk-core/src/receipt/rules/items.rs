//! Line item extraction from the receipt body.

use rust_decimal::Decimal;
use tracing::debug;

use crate::models::receipt::LineItem;

use super::amounts::normalize_amount;
use super::dates::is_date_line;
use super::patterns::{
    contains_any, ADDRESS_PREFIXES, ITEM_MULTIPLIER, ITEM_POS_ROW, NON_ITEM_KEYWORDS,
    TOTAL_KEYWORDS, TRAILING_NUMERIC, TRAILING_PRICE,
};
use super::LineExtractor;

/// Line item extractor.
///
/// Only lines priced strictly below the receipt total are items; a total
/// that was extracted too low therefore drops legitimate items.
#[derive(Debug, Clone, Copy)]
pub struct ItemExtractor {
    total: Decimal,
}

impl ItemExtractor {
    pub fn new(total: Decimal) -> Self {
        Self { total }
    }

    /// Parse one line into an item, if it qualifies.
    pub fn parse_line(&self, line: &str) -> Option<LineItem> {
        let amount = line_amount(line);
        if amount <= Decimal::ZERO || amount >= self.total || line.chars().count() <= 3 {
            return None;
        }

        let lower = line.to_lowercase();
        if contains_any(&lower, TOTAL_KEYWORDS)
            || contains_any(&lower, NON_ITEM_KEYWORDS)
            || ADDRESS_PREFIXES.iter().any(|p| lower.starts_with(p))
            || is_date_line(line)
        {
            return None;
        }

        let item = if let Some(caps) = ITEM_POS_ROW.captures(line) {
            // The extended price in the last column is ignored
            let quantity = caps[2].parse().unwrap_or(1);
            LineItem::new(&caps[1], normalize_amount(&caps[3]), quantity)
        } else if let Some(caps) = ITEM_MULTIPLIER.captures(line) {
            let quantity = caps[3].parse().unwrap_or(1);
            LineItem::new(&caps[1], normalize_amount(&caps[2]), quantity)
        } else {
            LineItem::new(item_name(line), amount, 1)
        };

        if item.name.is_empty() {
            return None;
        }
        Some(item)
    }
}

impl LineExtractor for ItemExtractor {
    type Output = Vec<LineItem>;

    fn extract(&self, lines: &[&str]) -> Option<Vec<LineItem>> {
        let items: Vec<LineItem> = lines.iter().filter_map(|l| self.parse_line(l)).collect();
        debug!("Extracted {} line items below total {}", items.len(), self.total);
        if items.is_empty() { None } else { Some(items) }
    }
}

/// Extract line items priced below `total`. May return an empty list.
pub fn extract_items(lines: &[&str], total: Decimal) -> Vec<LineItem> {
    ItemExtractor::new(total).extract(lines).unwrap_or_default()
}

/// Amount printed in the line's price column, or anywhere in the line when
/// it does not end in a number.
fn line_amount(line: &str) -> Decimal {
    match TRAILING_PRICE.captures(line) {
        Some(caps) => normalize_amount(&caps[1]),
        None => normalize_amount(line),
    }
}

fn item_name(line: &str) -> &str {
    match TRAILING_PRICE.find(line) {
        Some(m) => line[..m.start()].trim(),
        None => TRAILING_NUMERIC
            .find(line)
            .map_or(line, |m| &line[..m.start()])
            .trim(),
    }
}
