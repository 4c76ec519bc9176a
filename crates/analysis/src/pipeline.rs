//! End-to-end composition of the analysis steps.

use crate::aggregator::aggregate;
use crate::cleaner::clean;
use crate::correlation::{correlate, scatter_points};
use crate::metrics::derive_all;
use crate::overstock::select_overstock;
use retail_insight_core::{AnalysisReport, OverstockThresholds, RawTransaction};

/// Runs cleaning, metric derivation, aggregation, correlation, and overstock
/// selection over one batch of records.
pub fn run_pipeline(raw: Vec<RawTransaction>, thresholds: &OverstockThresholds) -> AnalysisReport {
    let mut cleaned = clean(raw);
    let derived = derive_all(cleaned.transactions);
    let aggregated = aggregate(&derived.records);
    cleaned.summary.overflowed = derived.overflowed + aggregated.overflowed;
    let aggregates = aggregated.aggregates;

    let scatter = scatter_points(&aggregates);
    let correlation = correlate(&scatter);

    let overstock = select_overstock(&aggregates, thresholds);

    AnalysisReport {
        cleaning: cleaned.summary,
        aggregates,
        correlation,
        scatter,
        overstock,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use retail_insight_core::{Correlation, DegenerateInput, RequiredField};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn make_raw(
        order_id: &str,
        product_id: &str,
        name: &str,
        quantity: i64,
        unit_price: Option<Decimal>,
        cost_price: Decimal,
        inventory_days: f64,
    ) -> RawTransaction {
        RawTransaction {
            order_id: Some(order_id.to_string()),
            order_date: NaiveDate::from_ymd_opt(2024, 6, 1),
            region: Some("South".to_string()),
            category: Some("Office Supplies".to_string()),
            sub_category: Some("Storage".to_string()),
            product_id: Some(product_id.to_string()),
            product_name: Some(name.to_string()),
            quantity: Some(quantity),
            unit_price,
            cost_price: Some(cost_price),
            inventory_days: Some(inventory_days),
            stock_on_hand: Some(25.0),
        }
    }

    fn five_records() -> Vec<RawTransaction> {
        vec![
            make_raw("O-1", "P-1", "Storage Box", 4, Some(dec!(20)), dec!(12), 90.0),
            make_raw("O-2", "P-2", "File Cart", 30, Some(dec!(50)), dec!(35), 20.0),
            make_raw("O-3", "P-1", "Storage Box", 3, None, dec!(12), 999.0),
            make_raw("O-4", "P-1", "Storage Box", 6, Some(dec!(20)), dec!(14), 70.0),
            make_raw("O-5", "P-2", "File Cart", 10, Some(dec!(50)), dec!(40), 40.0),
        ]
    }

    #[test]
    fn five_records_two_products() {
        let report = run_pipeline(five_records(), &OverstockThresholds::default());

        assert_eq!(report.cleaning.kept, 4);
        assert_eq!(report.cleaning.dropped, 1);
        assert_eq!(report.cleaning.overflowed, 0);
        assert_eq!(
            report.cleaning.missing_by_field.get(&RequiredField::UnitPrice),
            Some(&1)
        );

        assert_eq!(report.aggregates.len(), 2);
        let p1 = &report.aggregates[0];
        assert_eq!(p1.key.product_id, "P-1");
        assert_eq!(p1.total_qty_sold, 10);
        assert_eq!(p1.total_revenue, dec!(200));
        assert_eq!(p1.total_cost, dec!(132));
        assert_eq!(p1.total_profit, dec!(68));
        // (0.4 + 0.3) / 2
        assert_eq!(p1.avg_margin, dec!(0.35));
        assert_eq!(p1.avg_inventory_days, Some(80.0));

        let p2 = &report.aggregates[1];
        assert_eq!(p2.total_qty_sold, 40);
        assert_eq!(p2.avg_inventory_days, Some(30.0));

        assert_eq!(
            report.correlation,
            Correlation::Undefined(DegenerateInput::TooFewObservations { observed: 2 })
        );

        assert_eq!(report.overstock.len(), 1);
        assert_eq!(report.overstock.rows[0].key.product_id, "P-1");
        assert_eq!(report.scatter.len(), 2);
    }

    #[test]
    fn three_products_give_a_coefficient() {
        let mut records = five_records();
        records.push(make_raw("O-6", "P-3", "Shelf", 2, Some(dec!(10)), dec!(9), 55.0));
        let report = run_pipeline(records, &OverstockThresholds::default());
        assert_eq!(report.aggregates.len(), 3);
        let r = report.correlation.coefficient().expect("three points vary");
        assert!((-1.0..=1.0).contains(&r));
    }

    #[test]
    fn all_records_invalid_gives_empty_outputs() {
        let records = vec![make_raw("O-1", "P-1", "Box", 1, None, dec!(1), 100.0)];
        let report = run_pipeline(records, &OverstockThresholds::default());
        assert!(report.aggregates.is_empty());
        assert!(report.overstock.is_empty());
        assert_eq!(
            report.correlation,
            Correlation::Undefined(DegenerateInput::TooFewObservations { observed: 0 })
        );
    }

    #[test]
    fn oversized_amounts_are_counted_not_fatal() {
        let mut records = five_records();
        // revenue 1e12 * 1e17 is out of range
        records.push(make_raw(
            "O-6",
            "P-9",
            "Pallet",
            1_000_000_000_000,
            Some(Decimal::from(100_000_000_000_000_000_i64)),
            dec!(1),
            10.0,
        ));
        // each revenue fits, the P-8 total does not
        let huge = Decimal::from_i128_with_scale(5 * 10_i128.pow(28), 0);
        records.push(make_raw("O-7", "P-8", "Vault", 1, Some(huge), dec!(0), 70.0));
        records.push(make_raw("O-8", "P-8", "Vault", 1, Some(huge), dec!(0), 70.0));

        let report = run_pipeline(records, &OverstockThresholds::default());

        assert_eq!(report.cleaning.kept, 7);
        assert_eq!(report.cleaning.overflowed, 2);
        let ids: Vec<_> = report
            .aggregates
            .iter()
            .map(|a| a.key.product_id.as_str())
            .collect();
        assert_eq!(ids, vec!["P-1", "P-2", "P-8"]);
        assert_eq!(report.aggregates[2].total_revenue, huge);
        assert_eq!(report.aggregates[2].record_count, 1);
    }
}
