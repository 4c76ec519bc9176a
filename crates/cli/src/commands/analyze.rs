//! Full analysis run: load, analyze, print, and write outputs.

use anyhow::Result;
use clap::Args;
use retail_insight_analysis::run_pipeline;
use retail_insight_core::{AnalysisConfig, RecordSource, ReportFormatter, ReportSink};
use retail_insight_data::{CsvRecordSource, FileReportSink};

use super::common::{InputArgs, OutputFormat};

/// Arguments for the analyze command.
#[derive(Args, Debug, Clone)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Scatter chart output path (SVG)
    #[arg(long)]
    pub chart: Option<String>,

    /// Overstock report output path (CSV)
    #[arg(long)]
    pub overstock: Option<String>,

    /// Average inventory days must exceed this to count as slow-moving
    #[arg(long)]
    pub min_inventory_days: Option<f64>,

    /// Total quantity sold must be below this to count as overstocked
    #[arg(long)]
    pub max_qty_sold: Option<i64>,
}

impl AnalyzeArgs {
    fn resolve_config(&self) -> Result<AnalysisConfig> {
        let mut config = self.input.load_config()?;
        if let Some(chart) = &self.chart {
            config.output.chart_path.clone_from(chart);
        }
        if let Some(overstock) = &self.overstock {
            config.output.overstock_path.clone_from(overstock);
        }
        if let Some(days) = self.min_inventory_days {
            config.overstock.min_inventory_days = days;
        }
        if let Some(qty) = self.max_qty_sold {
            config.overstock.max_qty_sold = qty;
        }
        Ok(config)
    }
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    let format = args.input.output_format()?;
    let config = args.resolve_config()?;

    tracing::info!(
        input = %config.input.path,
        min_inventory_days = config.overstock.min_inventory_days,
        max_qty_sold = config.overstock.max_qty_sold,
        "Running inventory vs margin analysis"
    );

    let mut source = CsvRecordSource::new(&config.input.path);
    let records = source.load()?;
    let report = run_pipeline(records, &config.overstock);

    let mut sink = FileReportSink::new(&config.output, &config.chart);
    sink.write_scatter(&report.scatter)?;
    sink.write_overstock(&report.overstock)?;

    match format {
        OutputFormat::Text => {
            println!("{}", ReportFormatter::correlation_line(&report.correlation));
            println!("Saved plot to {}", sink.chart_path().display());
            println!(
                "Saved slow/overstocked items to {}",
                sink.overstock_path().display()
            );
            println!("{}", ReportFormatter::format(&report));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
