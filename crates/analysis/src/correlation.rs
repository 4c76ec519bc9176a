//! Correlation between average inventory days and average margin.
//!
//! Uses the sample Pearson coefficient: covariance over the product of
//! standard deviations, each divided by `n - 1`. The divisors cancel, but
//! they are kept explicit so the quantities match their textbook definitions.

use retail_insight_core::{Correlation, DegenerateInput, ProductAggregate, ScatterSeries, SeriesAxis};
use rust_decimal::prelude::ToPrimitive;

/// Smallest number of paired observations with a meaningful coefficient.
///
/// Two points always lie on a line, so `r` would be exactly +1 or -1.
pub const MIN_OBSERVATIONS: usize = 3;

/// Calculates the Pearson correlation coefficient between two series.
///
/// Returns [`Correlation::Undefined`] for fewer than [`MIN_OBSERVATIONS`] observations,
/// mismatched lengths, a series without variance, or values whose moments
/// do not fit in an `f64`.
pub fn pearson(x: &[f64], y: &[f64]) -> Correlation {
    if x.len() != y.len() {
        return Correlation::Undefined(DegenerateInput::LengthMismatch {
            left: x.len(),
            right: y.len(),
        });
    }
    if x.len() < MIN_OBSERVATIONS {
        return Correlation::Undefined(DegenerateInput::TooFewObservations { observed: x.len() });
    }
    if !x.iter().chain(y).all(|v| v.is_finite()) {
        return Correlation::Undefined(DegenerateInput::NonFinite);
    }
    if is_constant(x) {
        return Correlation::Undefined(DegenerateInput::ZeroVariance {
            column: SeriesAxis::X,
        });
    }
    if is_constant(y) {
        return Correlation::Undefined(DegenerateInput::ZeroVariance {
            column: SeriesAxis::Y,
        });
    }

    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    let mut sum_yy = 0.0;

    for (xi, yi) in x.iter().zip(y.iter()) {
        let dx = xi - mean_x;
        let dy = yi - mean_y;
        sum_xy += dx * dy;
        sum_xx += dx * dx;
        sum_yy += dy * dy;
    }

    let dof = n - 1.0;
    let covariance = sum_xy / dof;
    let std_x = (sum_xx / dof).sqrt();
    let std_y = (sum_yy / dof).sqrt();

    if !(covariance.is_finite() && std_x.is_finite() && std_y.is_finite()) {
        return Correlation::Undefined(DegenerateInput::NonFinite);
    }
    if std_x == 0.0 {
        return Correlation::Undefined(DegenerateInput::ZeroVariance {
            column: SeriesAxis::X,
        });
    }
    if std_y == 0.0 {
        return Correlation::Undefined(DegenerateInput::ZeroVariance {
            column: SeriesAxis::Y,
        });
    }

    // Rounding can push |r| a hair past 1 for perfectly linear data.
    Correlation::Coefficient((covariance / (std_x * std_y)).clamp(-1.0, 1.0))
}

fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

/// Paired (average inventory days, average margin) observations.
///
/// Products without any inventory-days value are left out.
pub fn scatter_points(aggregates: &[ProductAggregate]) -> ScatterSeries {
    let mut series = ScatterSeries::default();
    for row in aggregates {
        let Some(days) = row.avg_inventory_days else {
            continue;
        };
        let Some(margin) = row.avg_margin.to_f64() else {
            tracing::warn!(product_id = %row.key.product_id, "Average margin not representable as f64");
            continue;
        };
        series.inventory_days.push(days);
        series.margins.push(margin);
    }
    series
}

/// Pearson correlation between average inventory days and average margin
/// across product aggregates.
pub fn inventory_margin_correlation(aggregates: &[ProductAggregate]) -> Correlation {
    correlate(&scatter_points(aggregates))
}

/// Correlates the two axes of a scatter series.
pub fn correlate(series: &ScatterSeries) -> Correlation {
    let correlation = pearson(&series.inventory_days, &series.margins);

    match &correlation {
        Correlation::Coefficient(r) => {
            tracing::info!(coefficient = r, observations = series.len(), "Computed correlation");
        }
        Correlation::Undefined(reason) => {
            tracing::warn!(%reason, observations = series.len(), "Correlation undefined");
        }
    }
    correlation
}
