//! Parse command - extract an expense record from a single receipt text.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use tokio::io::AsyncReadExt;
use tracing::{debug, info, warn};

use struk_core::models::receipt::ReceiptRecord;
use struk_core::{OcrOutput, ReceiptParser};

use super::{OutputFormat, format_record, load_config};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Receipt text file, or "-" to read standard input
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// OCR confidence of the text, as a fraction or a percentage
    #[arg(long)]
    confidence: Option<f32>,

    /// Leave the category as Other
    #[arg(long)]
    no_categorize: bool,

    /// Print the fields that fell back to defaults
    #[arg(long)]
    show_warnings: bool,
}

pub async fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let text = read_input(&args.input).await?;
    if text.trim().is_empty() {
        anyhow::bail!("No text found in {}", args.input.display());
    }

    info!("Parsing receipt from {}", args.input.display());

    let parser = ReceiptParser::from_config(&config.parsing)
        .with_auto_categorize(config.parsing.auto_categorize && !args.no_categorize);

    let report = match args.confidence {
        Some(confidence) => {
            let output = OcrOutput::new(text, confidence);
            parser.parse_report(&output.text, output.confidence)
        }
        None => parser.parse_report(&text, config.parsing.default_confidence),
    };

    for warning in &report.warnings {
        warn!("{}", warning);
        if args.show_warnings {
            eprintln!("{} {}", style("⚠").yellow(), warning);
        }
    }

    let record = ReceiptRecord::from_parsed(report.receipt);
    let output = format_record(&record, args.format, &config.display.currency)?;

    if let Some(output_path) = &args.output {
        tokio::fs::write(output_path, &output).await?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

async fn read_input(input: &Path) -> anyhow::Result<String> {
    if input.as_os_str() == "-" {
        let mut text = String::new();
        tokio::io::stdin().read_to_string(&mut text).await?;
        return Ok(text);
    }

    if !input.exists() {
        anyhow::bail!("Input file not found: {}", input.display());
    }
    Ok(tokio::fs::read_to_string(input).await?)
}
