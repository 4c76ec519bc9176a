//! Pipeline outputs handed to reporters and callers.

use crate::types::{ProductAggregate, RequiredField};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Why a correlation coefficient could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum DegenerateInput {
    #[error("need at least 3 paired observations, got {observed}")]
    TooFewObservations { observed: usize },
    #[error("{column} column has zero variance")]
    ZeroVariance { column: SeriesAxis },
    #[error("series lengths differ ({left} vs {right})")]
    LengthMismatch { left: usize, right: usize },
    #[error("values or their moments are not finite")]
    NonFinite,
}

/// Which side of a paired series a diagnosis refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesAxis {
    X,
    Y,
}

impl std::fmt::Display for SeriesAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::X => write!(f, "first"),
            Self::Y => write!(f, "second"),
        }
    }
}

/// Pearson coefficient, or the explicit marker that it is undefined.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Correlation {
    Coefficient(f64),
    Undefined(DegenerateInput),
}

impl Correlation {
    #[must_use]
    pub fn coefficient(&self) -> Option<f64> {
        match self {
            Self::Coefficient(r) => Some(*r),
            Self::Undefined(_) => None,
        }
    }

    #[must_use]
    pub fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined(_))
    }
}

impl std::fmt::Display for Correlation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Coefficient(r) => write!(f, "{r:.3}"),
            Self::Undefined(reason) => write!(f, "undefined ({reason})"),
        }
    }
}

/// Paired points for the inventory-days vs margin scatter plot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScatterSeries {
    pub inventory_days: Vec<f64>,
    pub margins: Vec<f64>,
}

impl ScatterSeries {
    #[must_use]
    pub fn len(&self) -> usize {
        self.inventory_days.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inventory_days.is_empty()
    }

    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.inventory_days
            .iter()
            .copied()
            .zip(self.margins.iter().copied())
    }
}

/// Slow-moving, overstocked products, most days in stock first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverstockReport {
    pub rows: Vec<ProductAggregate>,
}

impl OverstockReport {
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// How many records survived cleaning and why the rest were dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleaningSummary {
    pub kept: usize,
    pub dropped: usize,
    pub missing_by_field: BTreeMap<RequiredField, usize>,
    /// Kept records later left out because an amount or a product total
    /// exceeded the `Decimal` range.
    #[serde(default)]
    pub overflowed: usize,
}

/// Everything one pipeline run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub cleaning: CleaningSummary,
    pub aggregates: Vec<ProductAggregate>,
    pub correlation: Correlation,
    pub scatter: ScatterSeries,
    pub overstock: OverstockReport,
}
