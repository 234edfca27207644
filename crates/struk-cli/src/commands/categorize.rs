//! Categorize command - look up the expense category for a merchant.

use clap::Args;
use console::style;
use rust_decimal::Decimal;

use struk_core::categorize;
use struk_core::models::receipt::{Category, LineItem};

/// Arguments for the categorize command.
#[derive(Args)]
pub struct CategorizeArgs {
    /// Merchant name as printed on the receipt
    #[arg(short, long, required_unless_present = "list")]
    merchant: Option<String>,

    /// Item name (repeatable)
    #[arg(short, long = "item")]
    items: Vec<String>,

    /// List all categories instead
    #[arg(long)]
    list: bool,
}

pub async fn run(args: CategorizeArgs) -> anyhow::Result<()> {
    if args.list {
        for category in Category::ALL {
            println!("{}", category);
        }
        return Ok(());
    }

    let merchant = args.merchant.unwrap_or_default();
    let items: Vec<LineItem> = args
        .items
        .iter()
        .map(|name| LineItem::new(name.as_str(), Decimal::ZERO, 1))
        .collect();

    let category = categorize(&merchant, &items);
    if category == Category::Other {
        eprintln!(
            "{} No category keyword matched \"{}\"",
            style("ℹ").blue(),
            merchant
        );
    }
    println!("{}", category);

    Ok(())
}
