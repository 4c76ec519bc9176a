use retail_insight_analysis::run_pipeline;
use retail_insight_core::{ChartConfig, OutputConfig, OverstockThresholds, ReportSink};
use retail_insight_data::{CsvRecordSource, FileReportSink};

const SALES: &str = "\
order_id,order_date,region,category,sub_category,product_id,product_name,quantity,unit_price,cost_price,inventory_days,stock_on_hand
A-1,2024-04-01,West,Technology,Accessories,TEC-AC-1,Wireless Mouse,2,25.00,15.00,120,60
A-2,2024-04-02,East,Technology,Accessories,TEC-AC-1,Wireless Mouse,1,25.00,15.00,100,59
A-3,2024-04-03,East,Furniture,Tables,FUR-TA-1,Folding Table,3,80.00,70.00,65,12
A-4,2024-04-04,South,Furniture,Tables,FUR-TA-1,Folding Table,,80.00,70.00,65,11
A-5,2024-04-05,South,Office Supplies,Labels,OFF-LA-1,Address Labels,40,3.00,1.00,10,500
A-6,2024-04-06,Central,Office Supplies,Labels,OFF-LA-1,Address Labels,0,3.00,1.00,12,500
";

#[test]
fn csv_in_pipeline_csv_out() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sales.csv");
    std::fs::write(&input, SALES).unwrap();

    let records = CsvRecordSource::from_path(&input).unwrap();
    assert_eq!(records.len(), 6);

    let report = run_pipeline(records, &OverstockThresholds::default());
    assert_eq!(report.cleaning.kept, 5);
    assert_eq!(report.aggregates.len(), 3);
    assert!(report.correlation.coefficient().is_some());

    let output = OutputConfig {
        chart_path: dir.path().join("chart.svg").display().to_string(),
        overstock_path: dir.path().join("slow.csv").display().to_string(),
    };
    let mut sink = FileReportSink::new(&output, &ChartConfig::default());
    sink.write_scatter(&report.scatter).unwrap();
    sink.write_overstock(&report.overstock).unwrap();

    let mut reader = csv::Reader::from_path(&output.overstock_path).unwrap();
    let ids: Vec<String> = reader
        .records()
        .map(|r| r.unwrap()[0].to_string())
        .collect();
    // mouse: 110 days, 3 sold; table: 65 days, 3 sold; labels: fast movers
    assert_eq!(ids, vec!["TEC-AC-1", "FUR-TA-1"]);

    let svg = std::fs::read_to_string(&output.chart_path).unwrap();
    assert_eq!(svg.matches("<circle").count(), 3);
}
