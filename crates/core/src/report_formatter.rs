#![allow(clippy::format_push_string)]
#![allow(clippy::uninlined_format_args)]

use crate::report::{AnalysisReport, Correlation};
use crate::types::ProductAggregate;

pub struct ReportFormatter;

impl ReportFormatter {
    /// One-line correlation message, three decimals or the undefined marker.
    #[must_use]
    pub fn correlation_line(correlation: &Correlation) -> String {
        format!(
            "Pearson correlation between inventory days and profit margin: {}",
            correlation
        )
    }

    #[must_use]
    pub fn format(report: &AnalysisReport) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push_str("              INVENTORY AGING VS PROFITABILITY                 \n");
        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output.push('\n');

        output.push_str("Input Records\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        output.push_str(&format!(
            "Kept:                  {}\n",
            report.cleaning.kept
        ));
        output.push_str(&format!(
            "Dropped:               {}\n",
            report.cleaning.dropped
        ));
        for (field, count) in &report.cleaning.missing_by_field {
            output.push_str(&format!("  missing {:<14} {}\n", field.column_name(), count));
        }
        if report.cleaning.overflowed > 0 {
            output.push_str(&format!(
                "Overflowed:            {}\n",
                report.cleaning.overflowed
            ));
        }
        output.push('\n');

        output.push_str("Products\n");
        output.push_str("───────────────────────────────────────────────────────────────\n");
        output.push_str(&format!(
            "Product Groups:        {}\n",
            report.aggregates.len()
        ));
        output.push_str(&format!(
            "Plotted Points:        {}\n",
            report.scatter.len()
        ));
        output.push_str(&format!(
            "Slow / Overstocked:    {}\n",
            report.overstock.len()
        ));
        output.push('\n');

        output.push_str(&Self::correlation_line(&report.correlation));
        output.push('\n');

        if !report.overstock.is_empty() {
            output.push('\n');
            output.push_str(&Self::format_table(&report.overstock.rows));
        }

        output.push_str("═══════════════════════════════════════════════════════════════\n");
        output
    }

    /// Fixed-width table of product aggregates.
    #[must_use]
    pub fn format_table(rows: &[ProductAggregate]) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "{:<12} {:<24} {:>8} {:>12} {:>12} {:>8} {:>9}\n",
            "Product", "Name", "Qty", "Revenue", "Profit", "Margin", "Inv Days"
        ));
        output.push_str("───────────────────────────────────────────────────────────────────────────────────────────\n");
        for row in rows {
            let days = row
                .avg_inventory_days
                .map_or_else(|| "-".to_string(), |d| format!("{:.1}", d));
            output.push_str(&format!(
                "{:<12} {:<24} {:>8} {:>12.2} {:>12.2} {:>8.3} {:>9}\n",
                truncate(&row.key.product_id, 12),
                truncate(row.key.product_name.as_deref().unwrap_or("-"), 24),
                row.total_qty_sold,
                row.total_revenue,
                row.total_profit,
                row.avg_margin,
                days
            ));
        }
        output
    }
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut out: String = s.chars().take(width.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}
