//! Domain types for retail transaction analysis.
//!
//! Records move through three shapes: [`RawTransaction`] as supplied by a
//! loader, [`Transaction`] once every required field is known to be present,
//! and [`DerivedTransaction`] once the financial metrics are attached.
//! Aggregation reduces derived records to one [`ProductAggregate`] per
//! [`ProductKey`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One sale line exactly as the loader produced it. Any field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawTransaction {
    pub order_id: Option<String>,
    pub order_date: Option<NaiveDate>,
    pub region: Option<String>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub product_id: Option<String>,
    pub product_name: Option<String>,
    pub quantity: Option<i64>,
    pub unit_price: Option<Decimal>,
    pub cost_price: Option<Decimal>,
    pub inventory_days: Option<f64>,
    pub stock_on_hand: Option<f64>,
}

/// Fields a record must carry to take part in the analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequiredField {
    OrderId,
    OrderDate,
    ProductId,
    Quantity,
    UnitPrice,
    CostPrice,
}

impl RequiredField {
    pub const ALL: [RequiredField; 6] = [
        RequiredField::OrderId,
        RequiredField::OrderDate,
        RequiredField::ProductId,
        RequiredField::Quantity,
        RequiredField::UnitPrice,
        RequiredField::CostPrice,
    ];

    #[must_use]
    pub fn column_name(self) -> &'static str {
        match self {
            Self::OrderId => "order_id",
            Self::OrderDate => "order_date",
            Self::ProductId => "product_id",
            Self::Quantity => "quantity",
            Self::UnitPrice => "unit_price",
            Self::CostPrice => "cost_price",
        }
    }
}

impl std::fmt::Display for RequiredField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.column_name())
    }
}

/// A sale line with every required field present.
///
/// Built only through [`RawTransaction::into_valid`], so downstream code never
/// has to re-check presence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub order_id: String,
    pub order_date: NaiveDate,
    pub region: Option<String>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
    pub product_id: String,
    pub product_name: Option<String>,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub cost_price: Decimal,
    pub inventory_days: Option<f64>,
    pub stock_on_hand: Option<f64>,
}

impl RawTransaction {
    /// Converts into a [`Transaction`], or reports the first missing required field
    /// in [`RequiredField::ALL`] order.
    ///
    /// # Errors
    ///
    /// Returns the missing [`RequiredField`] when the record is incomplete.
    pub fn into_valid(self) -> Result<Transaction, RequiredField> {
        let RawTransaction {
            order_id,
            order_date,
            region,
            category,
            sub_category,
            product_id,
            product_name,
            quantity,
            unit_price,
            cost_price,
            inventory_days,
            stock_on_hand,
        } = self;

        Ok(Transaction {
            order_id: order_id.ok_or(RequiredField::OrderId)?,
            order_date: order_date.ok_or(RequiredField::OrderDate)?,
            region,
            category,
            sub_category,
            product_id: product_id.ok_or(RequiredField::ProductId)?,
            product_name,
            quantity: quantity.ok_or(RequiredField::Quantity)?,
            unit_price: unit_price.ok_or(RequiredField::UnitPrice)?,
            cost_price: cost_price.ok_or(RequiredField::CostPrice)?,
            inventory_days,
            stock_on_hand,
        })
    }
}

impl Transaction {
    /// Composite identity used to group this record.
    #[must_use]
    pub fn product_key(&self) -> ProductKey {
        ProductKey {
            product_id: self.product_id.clone(),
            product_name: self.product_name.clone(),
            category: self.category.clone(),
            sub_category: self.sub_category.clone(),
        }
    }
}

/// Financial metrics computed from a single transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionMetrics {
    pub revenue: Decimal,
    pub cost: Decimal,
    pub profit: Decimal,
    /// Profit over revenue; exactly zero when revenue is zero.
    pub profit_margin: Decimal,
}

/// A valid transaction together with its derived metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedTransaction {
    pub transaction: Transaction,
    pub metrics: TransactionMetrics,
}

/// Grouping identity: product id plus its descriptive labels.
///
/// Records sharing an id but disagreeing on a label land in different groups.
/// An absent label is a value of its own.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProductKey {
    pub product_id: String,
    pub product_name: Option<String>,
    pub category: Option<String>,
    pub sub_category: Option<String>,
}

/// Summary statistics for one product group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductAggregate {
    pub key: ProductKey,
    pub total_qty_sold: i64,
    pub total_revenue: Decimal,
    pub total_cost: Decimal,
    pub total_profit: Decimal,
    /// Mean of per-record margins, not `total_profit / total_revenue`.
    pub avg_margin: Decimal,
    pub avg_inventory_days: Option<f64>,
    pub avg_stock_on_hand: Option<f64>,
    pub record_count: usize,
}
