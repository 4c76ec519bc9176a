//! Drops records that are missing any required field.

use retail_insight_core::{CleaningSummary, RawTransaction, Transaction};

/// Valid transactions in input order plus a tally of what was dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleaningOutcome {
    pub transactions: Vec<Transaction>,
    pub summary: CleaningSummary,
}

/// Keeps every record whose required fields are all present, preserving order.
///
/// Incomplete records are excluded, never reported as an error.
pub fn clean(raw: Vec<RawTransaction>) -> CleaningOutcome {
    let mut outcome = CleaningOutcome {
        transactions: Vec::with_capacity(raw.len()),
        summary: CleaningSummary::default(),
    };

    for (index, record) in raw.into_iter().enumerate() {
        match record.into_valid() {
            Ok(tx) => outcome.transactions.push(tx),
            Err(field) => {
                tracing::debug!(index, %field, "Dropping record with missing required field");
                outcome.summary.dropped += 1;
                *outcome.summary.missing_by_field.entry(field).or_default() += 1;
            }
        }
    }
    outcome.summary.kept = outcome.transactions.len();

    tracing::info!(
        kept = outcome.summary.kept,
        dropped = outcome.summary.dropped,
        "Cleaned transaction records"
    );
    outcome
}
