//! Batch command - parse many receipt text files concurrently.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use futures_util::stream::{self, StreamExt};
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use rust_decimal::Decimal;
use tracing::{debug, error, warn};

use struk_core::format_currency;
use struk_core::models::receipt::ReceiptRecord;
use struk_core::{ParseReport, ReceiptParser};

use super::{OutputFormat, format_record, load_config};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching receipt text files
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of files parsed concurrently
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of parsing a single file.
struct FileResult {
    path: PathBuf,
    record: Option<ReceiptRecord>,
    warnings: usize,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let mut files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            ext.eq_ignore_ascii_case("txt")
        })
        .collect();
    files.sort();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to parse",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        tokio::fs::create_dir_all(output_dir).await?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let parser = ReceiptParser::from_config(&config.parsing);
    let mut pending = stream::iter(files)
        .map(|path| parse_file(path, &parser))
        .buffer_unordered(args.jobs.max(1));

    let mut results = Vec::new();
    while let Some(result) = pending.next().await {
        if let Some(error_msg) = &result.error {
            if args.continue_on_error {
                warn!("Failed to parse {}: {}", result.path.display(), error_msg);
            } else {
                error!("Failed to parse {}: {}", result.path.display(), error_msg);
                pb.abandon();
                anyhow::bail!("Parsing failed for {}: {}", result.path.display(), error_msg);
            }
        }
        results.push(result);
        pb.inc(1);
    }
    drop(pending);

    pb.finish_and_clear();
    results.sort_by(|a, b| a.path.cmp(&b.path));

    if let Some(ref output_dir) = args.output_dir {
        for result in &results {
            if let Some(record) = &result.record {
                let output_name = result
                    .path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or("receipt");
                let output_path =
                    output_dir.join(format!("{}.{}", output_name, args.format.extension()));

                let content = format_record(record, args.format, &config.display.currency)?;
                tokio::fs::write(&output_path, content).await?;
                debug!("Wrote output to {}", output_path.display());
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let successful: Vec<&ReceiptRecord> = results.iter().filter_map(|r| r.record.as_ref()).collect();
    let failed: Vec<&FileResult> = results.iter().filter(|r| r.error.is_some()).collect();
    let grand_total: Decimal = successful.iter().map(|r| r.total).sum();

    println!();
    println!(
        "{} Parsed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );
    println!(
        "   Total spent: {}",
        format_currency(grand_total, &config.display.currency)
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

async fn parse_file(path: PathBuf, parser: &ReceiptParser) -> FileResult {
    let file_start = Instant::now();

    let outcome = read_and_parse(&path, parser).await;
    let processing_time_ms = file_start.elapsed().as_millis() as u64;

    match outcome {
        Ok(report) => FileResult {
            path,
            warnings: report.warnings.len(),
            record: Some(ReceiptRecord::from_parsed(report.receipt)),
            error: None,
            processing_time_ms,
        },
        Err(e) => FileResult {
            path,
            record: None,
            warnings: 0,
            error: Some(e.to_string()),
            processing_time_ms,
        },
    }
}

async fn read_and_parse(path: &Path, parser: &ReceiptParser) -> anyhow::Result<ParseReport> {
    let text = tokio::fs::read_to_string(path).await?;
    if text.trim().is_empty() {
        anyhow::bail!("No text in file");
    }
    Ok(parser.parse_report(&text, parser.default_confidence()))
}

fn write_summary(path: &Path, results: &[FileResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "merchant",
        "date",
        "category",
        "total",
        "items",
        "warnings",
        "confidence",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");

        if let Some(record) = &result.record {
            wtr.write_record([
                filename,
                "success",
                &record.merchant,
                &record.date.to_string(),
                record.category.name(),
                &record.total.to_string(),
                &record.items.len().to_string(),
                &result.warnings.to_string(),
                &format!("{:.2}", record.confidence.unwrap_or_default()),
                &result.processing_time_ms.to_string(),
                "",
            ])?;
        } else {
            wtr.write_record([
                filename,
                "error",
                "",
                "",
                "",
                "",
                "",
                "",
                "",
                &result.processing_time_ms.to_string(),
                result.error.as_deref().unwrap_or(""),
            ])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
