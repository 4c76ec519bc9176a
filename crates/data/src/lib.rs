//! Input and output collaborators for the retail analysis pipeline.
//!
//! This crate provides:
//! - CSV loading of raw transaction records
//! - CSV export of the overstock report
//! - SVG rendering of the inventory-days vs margin scatter plot
//! - A filesystem sink that writes both outputs

pub mod chart;
pub mod csv_loader;
pub mod csv_storage;
pub mod sink;

pub use chart::ScatterChart;
pub use csv_loader::CsvRecordSource;
pub use csv_storage::CsvStorage;
pub use sink::FileReportSink;
