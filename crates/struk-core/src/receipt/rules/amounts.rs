//! Amount normalization for Indonesian and English receipts.
//!
//! Receipts mix "50.000" (dot as thousands separator), "50,00" (comma as
//! decimal point), "50,000" and shorthand such as "50rb" or "2jt". The
//! separator role is decided by the length of the final digit group.

use regex::Regex;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

use super::patterns::{MILLION_SUFFIX, SEPARATOR_RUN, THOUSAND_SUFFIX};

const THOUSAND: i64 = 1_000;
const MILLION: i64 = 1_000_000;

/// Convert a numeric-looking fragment into an amount.
///
/// Never fails: unparseable input yields zero.
pub fn normalize_amount(fragment: &str) -> Decimal {
    let lower = fragment.to_lowercase();

    if lower.contains("rb") {
        if let Some(amount) = suffixed_amount(&lower, &THOUSAND_SUFFIX, THOUSAND) {
            return amount;
        }
    }

    if lower.contains("jt") {
        if let Some(amount) = suffixed_amount(&lower, &MILLION_SUFFIX, MILLION) {
            return amount;
        }
    }

    let cleaned: String = fragment
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();

    if cleaned.is_empty() {
        return Decimal::ZERO;
    }

    let parts: Vec<&str> = SEPARATOR_RUN.split(&cleaned).collect();

    let amount = match parts.as_slice() {
        [whole] => join_number(whole, ""),
        [whole, fraction] if fraction.len() <= 2 => join_number(whole, fraction),
        [high, low] => join_number(&format!("{}{}", high, low), ""),
        [high, mid, fraction] if fraction.len() <= 2 => {
            join_number(&format!("{}{}", high, mid), fraction)
        }
        [high, mid, low] => join_number(&format!("{}{}{}", high, mid, low), ""),
        _ => None,
    };

    amount.map(|a| a.normalize()).unwrap_or(Decimal::ZERO)
}

fn suffixed_amount(lower: &str, pattern: &Regex, multiplier: i64) -> Option<Decimal> {
    let caps = pattern.captures(lower)?;
    let number = caps[1].replacen(',', ".", 1);
    let base = Decimal::from_str(&number).ok()?;
    base.checked_mul(Decimal::from(multiplier))
        .map(|a| a.normalize())
}

fn join_number(integer: &str, fraction: &str) -> Option<Decimal> {
    if integer.is_empty() && fraction.is_empty() {
        return None;
    }
    let integer = if integer.is_empty() { "0" } else { integer };
    if fraction.is_empty() {
        Decimal::from_str(integer).ok()
    } else {
        Decimal::from_str(&format!("{}.{}", integer, fraction)).ok()
    }
}

/// Format an amount for display in the given currency.
///
/// IDR uses Indonesian grouping without fractional digits (`Rp 50.000`);
/// other currencies use English grouping with two decimals (`$1,234.56`).
pub fn format_currency(amount: Decimal, currency: &str) -> String {
    let code = currency.trim().to_uppercase();
    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };
    let amount = amount.abs();

    if code == "IDR" {
        let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
        let digits = format!("{:.0}", rounded);
        return format!("{}Rp {}", sign, group_thousands(&digits, '.'));
    }

    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let s = format!("{:.2}", rounded);
    let (integer_part, decimal_part) = s.split_once('.').unwrap_or((s.as_str(), "00"));
    let number = format!("{}.{}", group_thousands(integer_part, ','), decimal_part);

    match code.as_str() {
        "USD" => format!("{}${}", sign, number),
        "EUR" => format!("{}€{}", sign, number),
        _ => format!("{}{} {}", sign, code, number),
    }
}

fn group_thousands(digits: &str, separator: char) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let mut formatted = String::with_capacity(chars.len() + chars.len() / 3);

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            formatted.push(separator);
        }
        formatted.push(*c);
    }

    formatted
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_thousands_separators() {
        assert_eq!(normalize_amount("50.000"), dec("50000"));
        assert_eq!(normalize_amount("50,000"), dec("50000"));
        assert_eq!(normalize_amount("Rp 1.250"), dec("1250"));
    }

    #[test]
    fn test_decimal_separators() {
        assert_eq!(normalize_amount("50,00"), dec("50.00"));
        assert_eq!(normalize_amount("12.5"), dec("12.5"));
        assert_eq!(normalize_amount("50.000,00"), dec("50000.00"));
        assert_eq!(normalize_amount("1,234.56"), dec("1234.56"));
    }

    #[test]
    fn test_long_three_group_amount() {
        assert_eq!(normalize_amount("1.500.000"), dec("1500000"));
    }

    #[test]
    fn test_shorthand_suffixes() {
        assert_eq!(normalize_amount("50rb"), dec("50000"));
        assert_eq!(normalize_amount("Rp 1,5rb"), dec("1500"));
        assert_eq!(normalize_amount("2jt"), dec("2000000"));
        assert_eq!(normalize_amount("2.5 JT"), dec("2500000"));
    }

    #[test]
    fn test_unparseable_is_zero() {
        assert_eq!(normalize_amount("abc"), Decimal::ZERO);
        assert_eq!(normalize_amount(""), Decimal::ZERO);
        assert_eq!(normalize_amount(".,."), Decimal::ZERO);
        assert_eq!(normalize_amount("1.234.567.89"), Decimal::ZERO);
    }

    #[test]
    fn test_leading_separator() {
        // "Rp. 50.000" keeps an empty leading group
        assert_eq!(normalize_amount("Rp. 50.000"), dec("50000"));
        assert_eq!(normalize_amount(".5"), dec("0.5"));
    }

    #[test]
    fn test_format_idr() {
        assert_eq!(format_currency(dec("50000"), "IDR"), "Rp 50.000");
        assert_eq!(format_currency(dec("1250000"), "idr"), "Rp 1.250.000");
        assert_eq!(format_currency(dec("999.5"), "IDR"), "Rp 1.000");
        assert_eq!(format_currency(Decimal::ZERO, "IDR"), "Rp 0");
        assert_eq!(format_currency(dec("-5000"), "IDR"), "-Rp 5.000");
    }

    #[test]
    fn test_format_other_currencies() {
        assert_eq!(format_currency(dec("1234.5"), "USD"), "$1,234.50");
        assert_eq!(format_currency(dec("1234.56"), "EUR"), "€1,234.56");
        assert_eq!(format_currency(dec("12"), "SGD"), "SGD 12.00");
    }
}
