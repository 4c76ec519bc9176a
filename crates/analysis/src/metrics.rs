//! Per-transaction financial metrics.

use retail_insight_core::{DerivedTransaction, Transaction, TransactionMetrics};
use rust_decimal::Decimal;
use thiserror::Error;

/// A money amount left the range a `Decimal` can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{amount} overflowed")]
pub struct ArithmeticOverflow {
    pub amount: &'static str,
}

impl ArithmeticOverflow {
    pub(crate) fn of(amount: &'static str) -> Self {
        Self { amount }
    }
}

/// Profit as a fraction of revenue.
///
/// Zero revenue yields a margin of exactly zero, whatever the sign of profit.
/// Returns `None` when the quotient does not fit in a `Decimal`.
pub fn profit_margin(revenue: Decimal, profit: Decimal) -> Option<Decimal> {
    if revenue.is_zero() {
        return Some(Decimal::ZERO);
    }
    profit.checked_div(revenue)
}

/// Computes revenue, cost, profit, and margin for one transaction.
///
/// Negative inputs are carried through unchanged.
///
/// # Errors
/// Returns [`ArithmeticOverflow`] naming the first amount out of range
pub fn compute_metrics(tx: &Transaction) -> Result<TransactionMetrics, ArithmeticOverflow> {
    let quantity = Decimal::from(tx.quantity);
    let revenue = quantity
        .checked_mul(tx.unit_price)
        .ok_or(ArithmeticOverflow::of("revenue"))?;
    let cost = quantity
        .checked_mul(tx.cost_price)
        .ok_or(ArithmeticOverflow::of("cost"))?;
    let profit = revenue
        .checked_sub(cost)
        .ok_or(ArithmeticOverflow::of("profit"))?;
    let profit_margin =
        profit_margin(revenue, profit).ok_or(ArithmeticOverflow::of("profit margin"))?;

    Ok(TransactionMetrics {
        revenue,
        cost,
        profit,
        profit_margin,
    })
}

/// # Errors
/// Returns [`ArithmeticOverflow`] if the metrics cannot be represented
pub fn derive_metrics(tx: Transaction) -> Result<DerivedTransaction, ArithmeticOverflow> {
    let metrics = compute_metrics(&tx)?;
    Ok(DerivedTransaction {
        transaction: tx,
        metrics,
    })
}

/// Derived records in input order, plus how many were left out on overflow.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Derivation {
    pub records: Vec<DerivedTransaction>,
    pub overflowed: usize,
}

/// Derives metrics for every transaction.
///
/// A transaction whose amounts overflow is logged and left out rather than
/// aborting the batch.
pub fn derive_all(transactions: Vec<Transaction>) -> Derivation {
    let mut derivation = Derivation {
        records: Vec::with_capacity(transactions.len()),
        overflowed: 0,
    };

    for tx in transactions {
        let order_id = tx.order_id.clone();
        match derive_metrics(tx) {
            Ok(record) => derivation.records.push(record),
            Err(e) => {
                tracing::warn!(order_id = %order_id, error = %e, "Skipping transaction");
                derivation.overflowed += 1;
            }
        }
    }

    derivation
}
