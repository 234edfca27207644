//! Transaction date extraction.
//!
//! Each line is tried against an ordered list of date strategies; lines are
//! scanned top to bottom and the first valid calendar date ends the search.

use chrono::NaiveDate;
use regex::Captures;
use tracing::debug;

use super::patterns::{
    DATE_DMY, DATE_DMY_TIME, DATE_ENGLISH_SHORT, DATE_INDONESIAN_LONG, DATE_YMD, ENGLISH_MONTHS,
    INDONESIAN_MONTHS,
};
use super::LineExtractor;

type DateStrategy = fn(&str) -> Option<NaiveDate>;

/// Strategies in the order they are tried on every line.
const DATE_STRATEGIES: [(&str, DateStrategy); 5] = [
    ("day-month-year", parse_dmy),
    ("indonesian month name", parse_indonesian_long),
    ("english month name", parse_english_short),
    ("year-month-day", parse_ymd),
    ("day-month-year with time", parse_dmy_time),
];

/// Date field extractor.
#[derive(Debug, Default, Clone, Copy)]
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl LineExtractor for DateExtractor {
    type Output = NaiveDate;

    fn extract(&self, lines: &[&str]) -> Option<NaiveDate> {
        lines.iter().find_map(|line| {
            DATE_STRATEGIES.iter().find_map(|(name, strategy)| {
                let date = strategy(*line)?;
                debug!("Date {} matched {} format in {:?}", date, name, line);
                Some(date)
            })
        })
    }
}

/// Whether any date strategy recognizes a date on this line.
pub fn is_date_line(line: &str) -> bool {
    DATE_STRATEGIES.iter().any(|(_, strategy)| strategy(line).is_some())
}

/// Extract the transaction date, falling back to `today`.
pub fn extract_date(lines: &[&str], today: NaiveDate) -> NaiveDate {
    DateExtractor::new().extract(lines).unwrap_or_else(|| {
        debug!("No date found, using {}", today);
        today
    })
}

fn parse_dmy(line: &str) -> Option<NaiveDate> {
    let caps = DATE_DMY.captures(line)?;
    numeric_dmy(&caps)
}

fn parse_indonesian_long(line: &str) -> Option<NaiveDate> {
    let caps = DATE_INDONESIAN_LONG.captures(line)?;
    let month = month_number(&INDONESIAN_MONTHS, &caps[2].to_lowercase())?;
    ymd(parse_year(&caps[3])?, month, caps[1].parse().ok()?)
}

fn parse_english_short(line: &str) -> Option<NaiveDate> {
    let caps = DATE_ENGLISH_SHORT.captures(line)?;
    let abbreviation: String = caps[2].to_lowercase().chars().take(3).collect();
    let month = month_number(&ENGLISH_MONTHS, &abbreviation)?;
    ymd(parse_year(&caps[3])?, month, caps[1].parse().ok()?)
}

fn parse_ymd(line: &str) -> Option<NaiveDate> {
    let caps = DATE_YMD.captures(line)?;
    ymd(caps[1].parse().ok()?, caps[2].parse().ok()?, caps[3].parse().ok()?)
}

fn parse_dmy_time(line: &str) -> Option<NaiveDate> {
    let caps = DATE_DMY_TIME.captures(line)?;
    let hour: u32 = caps[4].parse().ok()?;
    let minute: u32 = caps[5].parse().ok()?;
    if hour >= 24 || minute >= 60 {
        return None;
    }
    numeric_dmy(&caps)
}

/// Day-first numeric date from capture groups 1..=3.
///
/// Dotted dates need a four-digit year; "1.10.000" is a grouped amount.
fn numeric_dmy(caps: &Captures<'_>) -> Option<NaiveDate> {
    let date_part = caps[0].split_whitespace().next()?;
    if date_part.contains('.') && caps[3].len() != 4 {
        return None;
    }
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    ymd(parse_year(&caps[3])?, month, day)
}

fn ymd(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_year(s: &str) -> Option<i32> {
    let year: i32 = s.parse().ok()?;
    // Two-digit years are always this century on receipts
    Some(if year < 100 { 2000 + year } else { year })
}

fn month_number(table: &[&str; 12], name: &str) -> Option<u32> {
    table
        .iter()
        .position(|m| *m == name)
        .map(|i| i as u32 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        date(2026, 3, 1)
    }

    #[test]
    fn test_indonesian_month_name() {
        assert_eq!(extract_date(&["15 januari 2024"], today()), date(2024, 1, 15));
        assert_eq!(extract_date(&["Tanggal: 3 AGUSTUS 23"], today()), date(2023, 8, 3));
    }

    #[test]
    fn test_numeric_day_first() {
        assert_eq!(extract_date(&["15/01/2024"], today()), date(2024, 1, 15));
        assert_eq!(extract_date(&["15-01-24"], today()), date(2024, 1, 15));
        assert_eq!(extract_date(&["Tgl 05.02.2024"], today()), date(2024, 2, 5));
    }

    #[test]
    fn test_dotted_date_needs_four_digit_year() {
        assert_eq!(parse_dmy("Harga 1.10.000"), None);
        assert_eq!(parse_dmy("05.02.24"), None);
        assert_eq!(parse_dmy("05.02.2024"), Some(date(2024, 2, 5)));
        assert_eq!(parse_dmy("05/02/24"), Some(date(2024, 2, 5)));
        assert_eq!(extract_date(&["Harga 1.10.000"], today()), today());
    }

    #[test]
    fn test_is_date_line() {
        assert!(is_date_line("Tanggal 15 Januari 2024"));
        assert!(is_date_line("15/01/2024 14:30 KASIR 2"));
        assert!(!is_date_line("Kopi Susu 20.000"));
    }

    #[test]
    fn test_english_month_name() {
        assert_eq!(extract_date(&["15 Jan 2024"], today()), date(2024, 1, 15));
        assert_eq!(extract_date(&["2 December 2023"], today()), date(2023, 12, 2));
    }

    #[test]
    fn test_iso_date() {
        assert_eq!(extract_date(&["2024-01-15"], today()), date(2024, 1, 15));
        assert_eq!(extract_date(&["Printed 2024/01/15 08:00"], today()), date(2024, 1, 15));
    }

    #[test]
    fn test_date_with_time() {
        assert_eq!(
            extract_date(&["15/01/2024 14:30 KASIR 2"], today()),
            date(2024, 1, 15)
        );
        assert_eq!(parse_dmy_time("15/01/2024 25:30"), None);
    }

    #[test]
    fn test_invalid_date_is_skipped() {
        let lines = ["31/02/2024", "Kasir: Budi", "14/02/2024"];
        assert_eq!(extract_date(&lines, today()), date(2024, 2, 14));
    }

    #[test]
    fn test_first_line_with_date_wins() {
        let lines = ["TOKO MAJU", "01/03/2024", "Cetak ulang 2024-03-05"];
        assert_eq!(extract_date(&lines, today()), date(2024, 3, 1));
    }

    #[test]
    fn test_falls_back_to_today() {
        let lines = ["WARUNG MAKAN SEDERHANA", "Total: 25.000"];
        assert_eq!(extract_date(&lines, today()), today());
        assert_eq!(DateExtractor::new().extract(&lines), None);
    }
}
