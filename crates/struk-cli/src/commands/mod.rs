//! CLI subcommands and the helpers they share.

pub mod batch;
pub mod categorize;
pub mod config;
pub mod parse;

use std::path::{Path, PathBuf};

use struk_core::format_currency;
use struk_core::models::config::StrukConfig;
use struk_core::models::receipt::ReceiptRecord;

/// Output format for parsed receipts.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per item
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    /// File extension used for batch outputs.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

/// Default configuration file location (`<config dir>/struk/config.json`).
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("struk")
        .join("config.json")
}

/// The `--config` path if given, otherwise the default location.
pub fn resolve_config_path(config_path: Option<&str>) -> PathBuf {
    config_path.map_or_else(default_config_path, PathBuf::from)
}

/// Load configuration. An explicit path must exist; a missing default file
/// falls back to built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<StrukConfig> {
    if let Some(path) = config_path {
        return Ok(StrukConfig::from_file(Path::new(path))?);
    }

    let path = default_config_path();
    if path.exists() {
        Ok(StrukConfig::from_file(&path)?)
    } else {
        Ok(StrukConfig::default())
    }
}

/// Render a record in the requested format.
pub fn format_record(
    record: &ReceiptRecord,
    format: OutputFormat,
    currency: &str,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record, currency)),
    }
}

fn format_csv(record: &ReceiptRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "id", "date", "merchant", "category", "total", "item", "quantity", "price",
    ])?;

    for item in &record.items {
        wtr.write_record([
            record.id.as_str(),
            &record.date.to_string(),
            &record.merchant,
            record.category.name(),
            &record.total.to_string(),
            &item.name,
            &item.quantity.to_string(),
            &item.price.to_string(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &ReceiptRecord, currency: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Merchant: {}\n", record.merchant));
    output.push_str(&format!("Date: {}\n", record.date));
    output.push_str(&format!("Category: {}\n", record.category));
    output.push('\n');

    output.push_str("Items:\n");
    for item in &record.items {
        let price = format_currency(item.price, currency);
        if item.quantity > 1 {
            output.push_str(&format!("  {} x{}  {}\n", item.name, item.quantity, price));
        } else {
            output.push_str(&format!("  {}  {}\n", item.name, price));
        }
    }
    output.push('\n');

    output.push_str(&format!("Total: {}\n", format_currency(record.total, currency)));
    if let Some(confidence) = record.confidence {
        output.push_str(&format!("Confidence: {:.0}%\n", confidence * 100.0));
    }

    output
}
