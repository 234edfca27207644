//! Common regex patterns and keyword tables for receipt extraction.

use lazy_static::lazy_static;
use regex::Regex;

/// Store-type words and Indonesian retail chains that mark a header line.
pub static MERCHANT_KEYWORDS: &[&str] = &[
    "toko",
    "warung",
    "restoran",
    "cafe",
    "indomaret",
    "alfamart",
    "lawson",
    "family mart",
    "minimarket",
    "supermarket",
    "mall",
    "plaza",
    "center",
    "pt.",
    "cv.",
    "ud.",
    "kedai",
    "rumah makan",
    "indomaret point",
    "alfamart point",
    "convenience store",
];

/// Words that mark a line as carrying the transaction total.
pub static TOTAL_KEYWORDS: &[&str] = &[
    "total",
    "jumlah",
    "rp",
    "grand total",
    "subtotal",
    "total bayar",
    "total pembayaran",
    "harus dibayar",
    "total belanja",
    "total transaksi",
    "total belanja:",
    "total:",
    "jumlah:",
    "rp:",
];

/// Footer lines that carry an amount but are never purchased items:
/// discount, tax, cash tendered, savings, change given.
pub static NON_ITEM_KEYWORDS: &[&str] = &["diskon", "ppn", "tunai", "hemat", "kembali"];

/// Street-address prefixes (Jalan) printed under the merchant name.
pub static ADDRESS_PREFIXES: &[&str] = &["jl.", "jl ", "jalan "];

/// Indonesian month names, January first.
pub static INDONESIAN_MONTHS: [&str; 12] = [
    "januari",
    "februari",
    "maret",
    "april",
    "mei",
    "juni",
    "juli",
    "agustus",
    "september",
    "oktober",
    "november",
    "desember",
];

/// English month abbreviations, January first.
pub static ENGLISH_MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Whether `haystack` (already lower-cased) contains any of `keywords`.
pub fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| haystack.contains(k))
}

lazy_static! {
    // Shorthand amounts: "50rb" (ribu, thousand), "2,5jt" (juta, million)
    pub static ref THOUSAND_SUFFIX: Regex = Regex::new(
        r"(\d+(?:[.,]\d+)?)\s*rb"
    ).unwrap();

    pub static ref MILLION_SUFFIX: Regex = Regex::new(
        r"(\d+(?:[.,]\d+)?)\s*jt"
    ).unwrap();

    pub static ref SEPARATOR_RUN: Regex = Regex::new(r"[.,]+").unwrap();

    // Date patterns, tried in this order
    pub static ref DATE_DMY: Regex = Regex::new(
        r"\b(\d{1,2})[./\-](\d{1,2})[./\-](\d{2,4})\b"
    ).unwrap();

    pub static ref DATE_INDONESIAN_LONG: Regex = Regex::new(
        r"(?i)\b(\d{1,2})\s+(januari|februari|maret|april|mei|juni|juli|agustus|september|oktober|november|desember)\s+(\d{2,4})\b"
    ).unwrap();

    pub static ref DATE_ENGLISH_SHORT: Regex = Regex::new(
        r"(?i)\b(\d{1,2})\s+(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+(\d{2,4})\b"
    ).unwrap();

    pub static ref DATE_YMD: Regex = Regex::new(
        r"\b(\d{4})[./\-](\d{1,2})[./\-](\d{1,2})\b"
    ).unwrap();

    pub static ref DATE_DMY_TIME: Regex = Regex::new(
        r"\b(\d{1,2})[./\-](\d{1,2})[./\-](\d{2,4})\s+(\d{1,2}):(\d{2})\b"
    ).unwrap();

    // "TOTAL BELANJA: 67,900"
    pub static ref LABELED_TOTAL: Regex = Regex::new(
        r"(?i)(?:total(?:\s+belanja)?|jumlah|rp)[:\s]*([\d.,]+)"
    ).unwrap();

    // POS layout: name, quantity, unit price, extended price
    pub static ref ITEM_POS_ROW: Regex = Regex::new(
        r"^(.+?)\s+(\d+)\s+(\d+)\s+([\d.,]+)$"
    ).unwrap();

    // "Nasi Putih   10.000 x2"
    pub static ref ITEM_MULTIPLIER: Regex = Regex::new(
        r"(?i)^(.+?)\s+([\d.,]+)\s*x\s*(\d+)$"
    ).unwrap();

    // Whitespace-separated price column at the end of a line, with an
    // optional "x<qty>" multiplier
    pub static ref TRAILING_PRICE: Regex = Regex::new(
        r"(?i)(?:^|\s)(\d[\d.,]*(?:\s*(?:rb|jt))?)(?:\s*x\s*\d+)?\s*$"
    ).unwrap();

    pub static ref TRAILING_NUMERIC: Regex = Regex::new(r"[\d.,\s]+$").unwrap();
}
