//! Shared argument handling for the analysis commands.

use anyhow::{anyhow, Result};
use clap::Args;
use retail_insight_core::{AnalysisConfig, ConfigLoader};

/// Output format for console reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    /// Parses an output format from string.
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(anyhow!(
                "Unknown format: '{}'. Valid formats: text, json",
                s
            )),
        }
    }
}

/// Options every command accepts for locating its input.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Config file path
    #[arg(short, long, default_value = "config/Config.toml")]
    pub config: String,

    /// Sales CSV file (overrides the config file)
    #[arg(short, long)]
    pub input: Option<String>,

    /// Output format: text, json (default: text)
    #[arg(long, default_value = "text")]
    pub format: String,
}

impl InputArgs {
    /// Loads the configuration and applies the command-line input override.
    pub fn load_config(&self) -> Result<AnalysisConfig> {
        let mut config = ConfigLoader::load(&self.config)?;
        if let Some(input) = &self.input {
            config.input.path.clone_from(input);
        }
        Ok(config)
    }

    pub fn output_format(&self) -> Result<OutputFormat> {
        OutputFormat::parse(&self.format)
    }
}
