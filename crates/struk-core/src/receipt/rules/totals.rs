//! Transaction total extraction.

use rust_decimal::Decimal;
use tracing::debug;

use super::amounts::normalize_amount;
use super::patterns::{contains_any, LABELED_TOTAL, TOTAL_KEYWORDS};
use super::LineExtractor;

type TotalStrategy = fn(&[&str]) -> Option<Decimal>;

/// Passes in the order they are tried; the first positive amount wins.
const TOTAL_STRATEGIES: [(&str, TotalStrategy); 3] = [
    ("keyword line", keyword_line_from_bottom),
    ("labeled total", labeled_total),
    ("largest amount", largest_amount),
];

/// Total field extractor.
#[derive(Debug, Default, Clone, Copy)]
pub struct TotalExtractor;

impl TotalExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl LineExtractor for TotalExtractor {
    type Output = Decimal;

    fn extract(&self, lines: &[&str]) -> Option<Decimal> {
        TOTAL_STRATEGIES.iter().find_map(|(name, strategy)| {
            let total = strategy(lines)?;
            debug!("Total {} found by {} pass", total, name);
            Some(total)
        })
    }
}

/// Extract the transaction total, or zero when the receipt has no amounts.
pub fn extract_total(lines: &[&str]) -> Decimal {
    TotalExtractor::new().extract(lines).unwrap_or(Decimal::ZERO)
}

/// Totals are printed near the bottom, so scan upwards.
fn keyword_line_from_bottom(lines: &[&str]) -> Option<Decimal> {
    lines
        .iter()
        .rev()
        .filter(|line| contains_any(&line.to_lowercase(), TOTAL_KEYWORDS))
        .map(|line| normalize_amount(line))
        .find(|amount| amount.is_sign_positive() && !amount.is_zero())
}

/// "TOTAL BELANJA: 67,900" style lines, reading only the number after the label.
fn labeled_total(lines: &[&str]) -> Option<Decimal> {
    lines
        .iter()
        .filter(|line| {
            let lower = line.to_lowercase();
            lower.contains("total belanja") || lower.contains("total:")
        })
        .filter_map(|line| LABELED_TOTAL.captures(line))
        .map(|caps| normalize_amount(&caps[1]))
        .find(|amount| amount.is_sign_positive() && !amount.is_zero())
}

/// Last resort: the biggest number on the receipt is probably the total.
fn largest_amount(lines: &[&str]) -> Option<Decimal> {
    lines
        .iter()
        .map(|line| normalize_amount(line))
        .max()
        .filter(|amount| !amount.is_zero())
}
