//! Loads raw transaction records from a headered CSV file.
//!
//! Columns are matched by header name, extra columns are ignored, and a
//! column that is absent altogether reads as missing for every row.
//! Empty cells and the usual null markers (`NA`, `null`, `NaN`, ...) are
//! missing values. A non-empty cell that does not parse is logged and also
//! treated as missing, so the cleaner decides what to do with the record.

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use retail_insight_core::{RawTransaction, RecordSource};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Cell values read as missing, in addition to the empty string.
const NULL_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-NaN", "-nan", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a",
    "nan", "null",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// One CSV row with every cell kept as text.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CsvRow {
    order_id: Option<String>,
    order_date: Option<String>,
    region: Option<String>,
    category: Option<String>,
    sub_category: Option<String>,
    product_id: Option<String>,
    product_name: Option<String>,
    quantity: Option<String>,
    unit_price: Option<String>,
    cost_price: Option<String>,
    inventory_days: Option<String>,
    stock_on_hand: Option<String>,
}

/// Reads transactions from a CSV file on disk.
pub struct CsvRecordSource {
    path: PathBuf,
}

impl CsvRecordSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Reads every record from the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or is not well-formed CSV.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Vec<RawTransaction>> {
        let path = path.as_ref();
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(path)
            .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

        let records = read_records(reader)
            .with_context(|| format!("Failed to read CSV file: {}", path.display()))?;

        tracing::info!(path = %path.display(), records = records.len(), "Loaded transaction records");
        Ok(records)
    }

    /// Reads every record from an in-memory or streamed CSV source.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not well-formed CSV.
    pub fn from_reader<R: Read>(input: R) -> Result<Vec<RawTransaction>> {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(input);
        read_records(reader)
    }
}

impl RecordSource for CsvRecordSource {
    fn load(&mut self) -> Result<Vec<RawTransaction>> {
        Self::from_path(&self.path)
    }
}

fn read_records<R: Read>(mut reader: csv::Reader<R>) -> Result<Vec<RawTransaction>> {
    let mut records = Vec::new();

    for (index, result) in reader.deserialize::<CsvRow>().enumerate() {
        // header is line 1
        let line = index + 2;
        let row = result.with_context(|| format!("Malformed CSV row at line {line}"))?;
        records.push(convert_row(row, line));
    }

    Ok(records)
}

fn convert_row(row: CsvRow, line: usize) -> RawTransaction {
    RawTransaction {
        order_id: text(row.order_id),
        order_date: parsed(row.order_date, line, "order_date", parse_date),
        region: text(row.region),
        category: text(row.category),
        sub_category: text(row.sub_category),
        product_id: text(row.product_id),
        product_name: text(row.product_name),
        quantity: parsed(row.quantity, line, "quantity", parse_quantity),
        unit_price: parsed(row.unit_price, line, "unit_price", parse_decimal),
        cost_price: parsed(row.cost_price, line, "cost_price", parse_decimal),
        inventory_days: parsed(row.inventory_days, line, "inventory_days", parse_float),
        stock_on_hand: parsed(row.stock_on_hand, line, "stock_on_hand", parse_float),
    }
}

fn text(cell: Option<String>) -> Option<String> {
    cell.filter(|v| !is_null(v))
}

fn is_null(value: &str) -> bool {
    value.is_empty() || NULL_MARKERS.contains(&value)
}

fn parsed<T>(
    cell: Option<String>,
    line: usize,
    column: &'static str,
    parse: fn(&str) -> Option<T>,
) -> Option<T> {
    let value = text(cell)?;
    let result = parse(&value);
    if result.is_none() {
        tracing::warn!(line, column, value = %value, "Unparseable value treated as missing");
    }
    result
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })
}

/// Whole numbers, including decimal spellings such as `5.0`.
fn parse_quantity(value: &str) -> Option<i64> {
    if let Ok(q) = value.parse::<i64>() {
        return Some(q);
    }
    let d = parse_decimal(value)?;
    if d.fract().is_zero() {
        d.to_i64()
    } else {
        None
    }
}

fn parse_decimal(value: &str) -> Option<Decimal> {
    Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .ok()
}

fn parse_float(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|v| v.is_finite())
}
