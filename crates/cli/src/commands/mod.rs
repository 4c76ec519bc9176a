//! CLI commands for the retail analysis tool.

pub mod analyze;
pub mod common;
pub mod products;

pub use analyze::{run_analyze, AnalyzeArgs};
pub use products::{run_products, ProductsArgs};
