//! Slow-moving, overstocked product selection.

use retail_insight_core::{OverstockReport, OverstockThresholds, ProductAggregate};
use std::cmp::Ordering;

fn is_overstocked(row: &ProductAggregate, thresholds: &OverstockThresholds) -> bool {
    match row.avg_inventory_days {
        Some(days) => {
            days > thresholds.min_inventory_days && row.total_qty_sold < thresholds.max_qty_sold
        }
        None => false,
    }
}

/// Selects products sitting in stock longer than the day threshold that also
/// sold fewer units than the quantity threshold, longest-held first.
///
/// An empty selection is a valid, empty report.
pub fn select_overstock(
    aggregates: &[ProductAggregate],
    thresholds: &OverstockThresholds,
) -> OverstockReport {
    let mut rows: Vec<ProductAggregate> = aggregates
        .iter()
        .filter(|row| is_overstocked(row, thresholds))
        .cloned()
        .collect();

    rows.sort_by(descending_days);

    tracing::info!(
        selected = rows.len(),
        min_inventory_days = thresholds.min_inventory_days,
        max_qty_sold = thresholds.max_qty_sold,
        "Selected slow-moving overstocked products"
    );
    OverstockReport { rows }
}

fn descending_days(a: &ProductAggregate, b: &ProductAggregate) -> Ordering {
    let a_days = a.avg_inventory_days.unwrap_or(f64::NEG_INFINITY);
    let b_days = b.avg_inventory_days.unwrap_or(f64::NEG_INFINITY);
    b_days.total_cmp(&a_days)
}
