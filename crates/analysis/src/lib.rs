//! Profitability versus inventory-aging analysis.
//!
//! A single synchronous pass over in-memory records:
//! - drop records missing a required field
//! - derive revenue, cost, profit, and margin per record
//! - aggregate per product group
//! - correlate average inventory days with average margin
//! - select slow-moving, overstocked products
//!
//! No I/O happens here; loading and writing belong to `retail-insight-data`.

pub mod aggregator;
pub mod cleaner;
pub mod correlation;
pub mod metrics;
pub mod overstock;
pub mod pipeline;

pub use aggregator::{aggregate, Aggregation, ProductAccumulator};
pub use cleaner::{clean, CleaningOutcome};
pub use correlation::{correlate, inventory_margin_correlation, pearson, scatter_points, MIN_OBSERVATIONS};
pub use metrics::{
    compute_metrics, derive_all, derive_metrics, profit_margin, ArithmeticOverflow, Derivation,
};
pub use overstock::select_overstock;
pub use pipeline::run_pipeline;
