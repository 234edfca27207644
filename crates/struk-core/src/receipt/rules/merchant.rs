//! Merchant name extraction from the receipt header.

use tracing::debug;

use super::patterns::{contains_any, MERCHANT_KEYWORDS};
use super::LineExtractor;

/// Number of leading lines treated as the receipt header.
const HEADER_LINES: usize = 3;

/// Merchant field extractor.
#[derive(Debug, Default, Clone, Copy)]
pub struct MerchantExtractor;

impl MerchantExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl LineExtractor for MerchantExtractor {
    type Output = String;

    fn extract(&self, lines: &[&str]) -> Option<String> {
        let header = lines.iter().take(HEADER_LINES);

        for (i, line) in header.enumerate() {
            if contains_any(&line.to_lowercase(), MERCHANT_KEYWORDS) {
                debug!("Merchant keyword on header line {}", i);
                return Some(line.to_string());
            }
            if is_plausible_name(line) {
                debug!("Plausible merchant name on header line {}", i);
                return Some(line.to_string());
            }
        }

        lines.first().map(|line| line.to_string())
    }
}

/// Extract the merchant name, falling back to the first line.
///
/// Returns `None` only for an empty line sequence.
pub fn extract_merchant(lines: &[&str]) -> Option<String> {
    MerchantExtractor::new().extract(lines)
}

/// A reasonably sized line with no digits, e.g. a shop name.
fn is_plausible_name(line: &str) -> bool {
    let len = line.chars().count();
    len > 3 && len < 50 && !line.chars().any(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_keyword_on_first_line() {
        let lines = ["INDOMARET CABANG KEMANG", "Jl. Kemang Raya 123", "Jakarta Selatan"];
        assert_eq!(
            extract_merchant(&lines),
            Some("INDOMARET CABANG KEMANG".to_string())
        );
    }

    #[test]
    fn test_keyword_line_after_noise() {
        let lines = ["12/01/2024 10:15", "Kedai Kopi 88", "Jl. Braga 5"];
        assert_eq!(extract_merchant(&lines), Some("Kedai Kopi 88".to_string()));
    }

    #[test]
    fn test_plausible_name_without_keyword() {
        let lines = ["#0012", "Bakso Pak Kumis", "Es Teh 5.000"];
        assert_eq!(extract_merchant(&lines), Some("Bakso Pak Kumis".to_string()));
    }

    #[test]
    fn test_only_header_lines_are_scanned() {
        let lines = ["No. 1234", "NPWP 01.234", "TRX 998", "Bakso Pak Kumis"];
        assert_eq!(extract_merchant(&lines), Some("No. 1234".to_string()));
    }

    #[test]
    fn test_short_and_long_lines_are_not_names() {
        assert!(!is_plausible_name("ABC"));
        assert!(is_plausible_name("ABCD"));
        assert!(!is_plausible_name(&"A".repeat(50)));
    }

    #[test]
    fn test_empty_lines() {
        assert_eq!(extract_merchant(&[]), None);
    }
}
