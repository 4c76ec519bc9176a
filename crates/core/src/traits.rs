use crate::report::{OverstockReport, ScatterSeries};
use crate::types::RawTransaction;
use anyhow::Result;

/// Supplies raw transaction records, in input order.
pub trait RecordSource {
    fn load(&mut self) -> Result<Vec<RawTransaction>>;
}

/// Receives the pipeline outputs that leave the process.
pub trait ReportSink {
    fn write_scatter(&mut self, series: &ScatterSeries) -> Result<()>;
    fn write_overstock(&mut self, report: &OverstockReport) -> Result<()>;
}

impl RecordSource for Vec<RawTransaction> {
    fn load(&mut self) -> Result<Vec<RawTransaction>> {
        Ok(std::mem::take(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_source_hands_over_records_once() {
        let mut source = vec![RawTransaction::default(), RawTransaction::default()];
        assert_eq!(source.load().unwrap().len(), 2);
        assert!(source.load().unwrap().is_empty());
    }
}
