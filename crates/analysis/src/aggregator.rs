//! Groups derived transactions by product and reduces each group.
//!
//! Quantity, revenue, cost, and profit are summed. Margin, inventory days, and
//! stock on hand are averaged per record. The average margin is the mean of
//! per-record margins, so every transaction weighs the same regardless of its
//! size; it generally differs from `total_profit / total_revenue`.

use crate::metrics::ArithmeticOverflow;
use retail_insight_core::{DerivedTransaction, ProductAggregate, ProductKey};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Running sum and count for a mean over values that may be absent.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct OptionalMean {
    sum: f64,
    count: usize,
}

impl OptionalMean {
    fn add(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.sum += v;
            self.count += 1;
        }
    }

    fn finish(self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Per-group running totals, finalized only after every record is seen.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductAccumulator {
    records: usize,
    qty_sold: i64,
    revenue: Decimal,
    cost: Decimal,
    profit: Decimal,
    margin_sum: Decimal,
    inventory_days: OptionalMean,
    stock_on_hand: OptionalMean,
}

impl ProductAccumulator {
    /// Folds one record into the totals.
    ///
    /// Either every total takes the record or none does.
    ///
    /// # Errors
    /// Returns [`ArithmeticOverflow`] if any running total would leave its range
    pub fn add(&mut self, record: &DerivedTransaction) -> Result<(), ArithmeticOverflow> {
        let tx = &record.transaction;
        let m = &record.metrics;

        let qty_sold = self
            .qty_sold
            .checked_add(tx.quantity)
            .ok_or(ArithmeticOverflow::of("quantity sold"))?;
        let revenue = checked_total(self.revenue, m.revenue, "revenue")?;
        let cost = checked_total(self.cost, m.cost, "cost")?;
        let profit = checked_total(self.profit, m.profit, "profit")?;
        let margin_sum = checked_total(self.margin_sum, m.profit_margin, "margin sum")?;

        self.records += 1;
        self.qty_sold = qty_sold;
        self.revenue = revenue;
        self.cost = cost;
        self.profit = profit;
        self.margin_sum = margin_sum;
        self.inventory_days.add(tx.inventory_days);
        self.stock_on_hand.add(tx.stock_on_hand);
        Ok(())
    }

    /// Number of records folded in so far.
    #[must_use]
    pub fn records(&self) -> usize {
        self.records
    }

    /// Converts the totals into an aggregate row.
    ///
    /// Only called for groups created from at least one record.
    #[must_use]
    pub fn finish(self, key: ProductKey) -> ProductAggregate {
        let avg_margin = if self.records == 0 {
            Decimal::ZERO
        } else {
            self.margin_sum / Decimal::from(self.records)
        };

        ProductAggregate {
            key,
            total_qty_sold: self.qty_sold,
            total_revenue: self.revenue,
            total_cost: self.cost,
            total_profit: self.profit,
            avg_margin,
            avg_inventory_days: self.inventory_days.finish(),
            avg_stock_on_hand: self.stock_on_hand.finish(),
            record_count: self.records,
        }
    }
}

fn checked_total(
    total: Decimal,
    value: Decimal,
    amount: &'static str,
) -> Result<Decimal, ArithmeticOverflow> {
    total
        .checked_add(value)
        .ok_or(ArithmeticOverflow::of(amount))
}

/// Aggregate rows plus how many records could not be added to their group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregation {
    pub aggregates: Vec<ProductAggregate>,
    pub overflowed: usize,
}

/// Reduces derived records to one aggregate per [`ProductKey`].
///
/// Rows come out in ascending key order. A record that would push a group
/// total out of range is logged and left out of that group.
pub fn aggregate(records: &[DerivedTransaction]) -> Aggregation {
    let mut groups: BTreeMap<ProductKey, ProductAccumulator> = BTreeMap::new();
    let mut overflowed = 0;

    for record in records {
        let acc = groups.entry(record.transaction.product_key()).or_default();
        if let Err(e) = acc.add(record) {
            tracing::warn!(
                order_id = %record.transaction.order_id,
                product_id = %record.transaction.product_id,
                error = %e,
                "Skipping transaction in product totals"
            );
            overflowed += 1;
        }
    }

    let aggregates: Vec<ProductAggregate> = groups
        .into_iter()
        .filter(|(_, acc)| acc.records() > 0)
        .map(|(key, acc)| acc.finish(key))
        .collect();

    tracing::info!(
        records = records.len(),
        products = aggregates.len(),
        overflowed,
        "Aggregated transactions by product"
    );
    Aggregation {
        aggregates,
        overflowed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::derive_metrics;
    use chrono::NaiveDate;
    use retail_insight_core::Transaction;
    use rust_decimal_macros::dec;

    fn make_record(
        product_id: &str,
        quantity: i64,
        unit_price: Decimal,
        cost_price: Decimal,
        inventory_days: Option<f64>,
    ) -> DerivedTransaction {
        derive_metrics(Transaction {
            order_id: format!("{product_id}-{quantity}"),
            order_date: NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
            region: Some("Central".to_string()),
            category: Some("Furniture".to_string()),
            sub_category: Some("Chairs".to_string()),
            product_id: product_id.to_string(),
            product_name: Some(format!("{product_id} name")),
            quantity,
            unit_price,
            cost_price,
            inventory_days,
            stock_on_hand: Some(10.0),
        })
        .unwrap()
    }

    #[test]
    fn sums_and_means_for_one_group() {
        let records = vec![
            make_record("FUR-1", 2, dec!(10), dec!(6), Some(30.0)),
            make_record("FUR-1", 3, dec!(10), dec!(6), Some(60.0)),
            make_record("FUR-1", 5, dec!(10), dec!(6), Some(90.0)),
        ];

        let rows = aggregate(&records).aggregates;
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.total_qty_sold, 10);
        assert_eq!(row.total_revenue, dec!(100));
        assert_eq!(row.total_cost, dec!(60));
        assert_eq!(row.total_profit, dec!(40));
        assert_eq!(row.avg_margin, dec!(0.4));
        assert_eq!(row.avg_inventory_days, Some(60.0));
        assert_eq!(row.avg_stock_on_hand, Some(10.0));
        assert_eq!(row.record_count, 3);
    }

    #[test]
    fn average_margin_is_mean_of_ratios() {
        let records = vec![
            make_record("FUR-1", 2, dec!(10), dec!(6), Some(30.0)),
            make_record("FUR-1", 3, dec!(10), dec!(6), Some(30.0)),
            make_record("FUR-1", 5, dec!(10), dec!(6), Some(30.0)),
            // zero revenue, margin 0
            make_record("FUR-1", 4, dec!(0), dec!(6), Some(30.0)),
        ];

        let row = &aggregate(&records).aggregates[0];
        assert_eq!(row.total_revenue, dec!(100));
        assert_eq!(row.total_cost, dec!(84));
        assert_eq!(row.total_profit, dec!(16));
        // (0.4 + 0.4 + 0.4 + 0) / 4
        assert_eq!(row.avg_margin, dec!(0.3));
        let ratio_of_sums = row.total_profit / row.total_revenue;
        assert_eq!(ratio_of_sums, dec!(0.16));
        assert_ne!(row.avg_margin, ratio_of_sums);
    }

    #[test]
    fn groups_by_full_key() {
        let mut renamed = make_record("FUR-1", 1, dec!(5), dec!(1), Some(10.0));
        renamed.transaction.product_name = Some("Different label".to_string());

        let records = vec![
            make_record("FUR-1", 1, dec!(5), dec!(1), Some(10.0)),
            make_record("FUR-2", 1, dec!(5), dec!(1), Some(10.0)),
            renamed,
            make_record("FUR-1", 2, dec!(5), dec!(1), Some(10.0)),
        ];

        let rows = aggregate(&records).aggregates;
        assert_eq!(rows.len(), 3);
        let fur1: Vec<_> = rows
            .iter()
            .filter(|r| r.key.product_id == "FUR-1")
            .collect();
        assert_eq!(fur1.len(), 2);
        let total: i64 = fur1.iter().map(|r| r.total_qty_sold).sum();
        assert_eq!(total, 4);
    }

    #[test]
    fn missing_inventory_days_are_skipped_in_mean() {
        let records = vec![
            make_record("FUR-1", 1, dec!(5), dec!(1), Some(20.0)),
            make_record("FUR-1", 1, dec!(5), dec!(1), None),
            make_record("FUR-1", 1, dec!(5), dec!(1), Some(40.0)),
        ];
        let row = &aggregate(&records).aggregates[0];
        assert_eq!(row.avg_inventory_days, Some(30.0));
        assert_eq!(row.record_count, 3);
    }

    #[test]
    fn all_missing_inventory_days_gives_none() {
        let records = vec![make_record("FUR-1", 1, dec!(5), dec!(1), None)];
        assert_eq!(aggregate(&records).aggregates[0].avg_inventory_days, None);
    }

    #[test]
    fn negative_values_flow_into_totals() {
        let records = vec![
            make_record("FUR-1", 4, dec!(10), dec!(5), Some(5.0)),
            make_record("FUR-1", -1, dec!(10), dec!(5), Some(5.0)),
        ];
        let row = &aggregate(&records).aggregates[0];
        assert_eq!(row.total_qty_sold, 3);
        assert_eq!(row.total_revenue, dec!(30));
        assert_eq!(row.total_profit, dec!(15));
    }

    #[test]
    fn result_is_independent_of_input_order() {
        let mut records = vec![
            make_record("B", 1, dec!(3), dec!(2), Some(1.0)),
            make_record("A", 2, dec!(3), dec!(1), Some(2.0)),
            make_record("B", 3, dec!(4), dec!(2), Some(3.0)),
        ];
        let forward = aggregate(&records);
        records.reverse();
        let backward = aggregate(&records);
        assert_eq!(forward, backward);
        assert_eq!(forward.aggregates[0].key.product_id, "A");
    }

    #[test]
    fn empty_input_has_no_groups() {
        assert_eq!(aggregate(&[]), Aggregation::default());
    }

    #[test]
    fn accumulator_counts_records() {
        let mut acc = ProductAccumulator::default();
        acc.add(&make_record("X", 1, dec!(1), dec!(1), None)).unwrap();
        acc.add(&make_record("X", 1, dec!(1), dec!(1), None)).unwrap();
        assert_eq!(acc.records(), 2);
    }

    #[test]
    fn revenue_total_out_of_range_drops_the_record() {
        // each revenue fits, their sum does not
        let unit_price = Decimal::from_i128_with_scale(5 * 10_i128.pow(28), 0);
        let records = vec![
            make_record("BIG", 1, unit_price, Decimal::ZERO, Some(10.0)),
            make_record("BIG", 1, unit_price, Decimal::ZERO, Some(90.0)),
        ];

        let result = aggregate(&records);
        assert_eq!(result.overflowed, 1);
        assert_eq!(result.aggregates.len(), 1);
        let row = &result.aggregates[0];
        assert_eq!(row.record_count, 1);
        assert_eq!(row.total_revenue, unit_price);
        assert_eq!(row.avg_inventory_days, Some(10.0));
    }

    #[test]
    fn failed_add_leaves_totals_untouched() {
        let mut acc = ProductAccumulator::default();
        let mut first = make_record("Q", 1, dec!(1), dec!(1), Some(5.0));
        first.transaction.quantity = i64::MAX;
        acc.add(&first).unwrap();
        let before = acc.clone();

        let second = make_record("Q", 1, dec!(1), dec!(1), Some(50.0));
        assert_eq!(
            acc.add(&second),
            Err(ArithmeticOverflow::of("quantity sold"))
        );
        assert_eq!(acc, before);
    }
}
