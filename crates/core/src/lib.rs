pub mod config;
pub mod config_loader;
pub mod report;
pub mod report_formatter;
pub mod traits;
pub mod types;

pub use config::{AnalysisConfig, ChartConfig, InputConfig, OutputConfig, OverstockThresholds};
pub use config_loader::ConfigLoader;
pub use report::{
    AnalysisReport, CleaningSummary, Correlation, DegenerateInput, OverstockReport,
    ScatterSeries, SeriesAxis,
};
pub use report_formatter::ReportFormatter;
pub use traits::{RecordSource, ReportSink};
pub use types::{
    DerivedTransaction, ProductAggregate, ProductKey, RawTransaction, RequiredField,
    Transaction, TransactionMetrics,
};
