use crate::chart::ScatterChart;
use crate::csv_storage::CsvStorage;
use anyhow::Result;
use retail_insight_core::{ChartConfig, OutputConfig, OverstockReport, ReportSink, ScatterSeries};
use std::path::PathBuf;

/// Writes the scatter chart and the overstock CSV to the filesystem.
pub struct FileReportSink {
    chart: ScatterChart,
    chart_path: PathBuf,
    overstock_path: PathBuf,
}

impl FileReportSink {
    pub fn new(output: &OutputConfig, chart: &ChartConfig) -> Self {
        Self {
            chart: ScatterChart::new(chart),
            chart_path: PathBuf::from(&output.chart_path),
            overstock_path: PathBuf::from(&output.overstock_path),
        }
    }

    pub fn chart_path(&self) -> &std::path::Path {
        &self.chart_path
    }

    pub fn overstock_path(&self) -> &std::path::Path {
        &self.overstock_path
    }
}

impl ReportSink for FileReportSink {
    fn write_scatter(&mut self, series: &ScatterSeries) -> Result<()> {
        self.chart.write(&self.chart_path, series)
    }

    fn write_overstock(&mut self, report: &OverstockReport) -> Result<()> {
        CsvStorage::write_overstock(&self.overstock_path, report)
    }
}
