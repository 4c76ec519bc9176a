use clap::{Parser, Subcommand};

mod commands;

use commands::{AnalyzeArgs, ProductsArgs};

#[derive(Parser)]
#[command(name = "retail-insight")]
#[command(about = "Inventory aging vs profitability analysis for retail sales", long_about = None)]
struct Cli {
    /// Optional log file path (logs to file instead of stderr)
    #[arg(long, global = true)]
    log_file: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Correlate inventory days with margin, plot it, and export overstocked products
    Analyze(AnalyzeArgs),
    /// Print per-product aggregates
    Products(ProductsArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    match &cli.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::sync::Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }

    match cli.command {
        Commands::Analyze(args) => commands::run_analyze(args)?,
        Commands::Products(args) => commands::run_products(args)?,
    }

    Ok(())
}
