//! Prints the per-product aggregate table without writing any files.

use anyhow::Result;
use clap::Args;
use retail_insight_analysis::{aggregate, clean, derive_all};
use retail_insight_core::{RecordSource, ReportFormatter};
use retail_insight_data::CsvRecordSource;

use super::common::{InputArgs, OutputFormat};

/// Arguments for the products command.
#[derive(Args, Debug, Clone)]
pub struct ProductsArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Show only the N products held longest in inventory
    #[arg(long)]
    pub top: Option<usize>,
}

pub fn run_products(args: ProductsArgs) -> Result<()> {
    let format = args.input.output_format()?;
    let config = args.input.load_config()?;

    let mut source = CsvRecordSource::new(&config.input.path);
    let cleaned = clean(source.load()?);
    let mut rows = aggregate(&derive_all(cleaned.transactions).records).aggregates;

    if let Some(top) = args.top {
        rows.sort_by(|a, b| {
            let a_days = a.avg_inventory_days.unwrap_or(f64::NEG_INFINITY);
            let b_days = b.avg_inventory_days.unwrap_or(f64::NEG_INFINITY);
            b_days.total_cmp(&a_days)
        });
        rows.truncate(top);
    }

    match format {
        OutputFormat::Text => print!("{}", ReportFormatter::format_table(&rows)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
    }
    Ok(())
}
