use anyhow::{Context, Result};
use csv::Writer;
use retail_insight_core::{OverstockReport, ProductAggregate};
use std::fs::File;
use std::io::Write;
use std::path::Path;

pub const AGGREGATE_COLUMNS: [&str; 11] = [
    "product_id",
    "product_name",
    "category",
    "sub_category",
    "total_qty_sold",
    "total_revenue",
    "total_cost",
    "total_profit",
    "avg_margin",
    "avg_inventory_days",
    "avg_stock_on_hand",
];

pub struct CsvStorage;

impl CsvStorage {
    /// Writes the overstock report to a CSV file, one row per product in report order.
    ///
    /// Format: product_id,product_name,category,sub_category,total_qty_sold,
    /// total_revenue,total_cost,total_profit,avg_margin,avg_inventory_days,avg_stock_on_hand
    ///
    /// An empty report produces a header-only file.
    ///
    /// # Errors
    /// Returns error if file cannot be created or writing fails
    pub fn write_overstock(path: impl AsRef<Path>, report: &OverstockReport) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
        Self::write_aggregates(file, &report.rows)
            .with_context(|| format!("Failed to write CSV file: {}", path.display()))?;

        tracing::info!(path = %path.display(), rows = report.len(), "Wrote overstock report");
        Ok(())
    }

    /// Writes aggregate rows with a header to any writer.
    ///
    /// # Errors
    /// Returns error if writing fails
    pub fn write_aggregates<W: Write>(out: W, rows: &[ProductAggregate]) -> Result<()> {
        let mut writer = Writer::from_writer(out);

        writer.write_record(AGGREGATE_COLUMNS)?;

        for row in rows {
            writer.write_record(&[
                row.key.product_id.clone(),
                row.key.product_name.clone().unwrap_or_default(),
                row.key.category.clone().unwrap_or_default(),
                row.key.sub_category.clone().unwrap_or_default(),
                row.total_qty_sold.to_string(),
                row.total_revenue.normalize().to_string(),
                row.total_cost.normalize().to_string(),
                row.total_profit.normalize().to_string(),
                row.avg_margin.normalize().to_string(),
                optional(row.avg_inventory_days),
                optional(row.avg_stock_on_hand),
            ])?;
        }

        writer.flush()?;
        Ok(())
    }
}

fn optional(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
