//! SVG scatter plot of average inventory days against average margin.

#![allow(clippy::format_push_string)]

use anyhow::{Context, Result};
use retail_insight_core::{ChartConfig, ScatterSeries};
use std::path::Path;

const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 55.0;
const TICKS: usize = 5;

pub struct ScatterChart {
    width: u32,
    height: u32,
    title: String,
    x_label: String,
    y_label: String,
}

/// Closed interval an axis covers.
#[derive(Debug, Clone, Copy, PartialEq)]
struct AxisRange {
    min: f64,
    max: f64,
}

impl AxisRange {
    /// Spans the values with 5% padding; degenerate spans are widened.
    fn covering(values: impl Iterator<Item = f64>) -> Self {
        let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        if !min.is_finite() || !max.is_finite() {
            return Self { min: 0.0, max: 1.0 };
        }
        if (max - min).abs() < f64::EPSILON {
            let pad = if min == 0.0 { 1.0 } else { min.abs() * 0.1 };
            return Self {
                min: min - pad,
                max: max + pad,
            };
        }
        let pad = (max - min) * 0.05;
        Self {
            min: min - pad,
            max: max + pad,
        }
    }

    fn fraction(&self, value: f64) -> f64 {
        (value - self.min) / (self.max - self.min)
    }

    fn tick(&self, i: usize) -> f64 {
        self.min + (self.max - self.min) * i as f64 / TICKS as f64
    }
}

impl ScatterChart {
    pub fn new(config: &ChartConfig) -> Self {
        Self {
            width: config.width.max(200),
            height: config.height.max(150),
            title: config.title.clone(),
            x_label: "Average Inventory Days".to_string(),
            y_label: "Average Profit Margin".to_string(),
        }
    }

    /// Renders the series as a standalone SVG document.
    ///
    /// An empty series renders the axes and grid without points.
    #[must_use]
    pub fn render(&self, series: &ScatterSeries) -> String {
        let width = f64::from(self.width);
        let height = f64::from(self.height);
        let plot_w = width - MARGIN_LEFT - MARGIN_RIGHT;
        let plot_h = height - MARGIN_TOP - MARGIN_BOTTOM;

        let x_range = AxisRange::covering(series.inventory_days.iter().copied());
        let y_range = AxisRange::covering(series.margins.iter().copied());
        let to_px = |x: f64| MARGIN_LEFT + x_range.fraction(x) * plot_w;
        let to_py = |y: f64| MARGIN_TOP + (1.0 - y_range.fraction(y)) * plot_h;

        let mut svg = String::new();
        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
            w = self.width,
            h = self.height
        ));
        svg.push_str("<rect width=\"100%\" height=\"100%\" fill=\"white\"/>\n");

        // grid and tick labels
        svg.push_str("<g stroke=\"#dddddd\" stroke-width=\"1\">\n");
        for i in 0..=TICKS {
            let gx = MARGIN_LEFT + plot_w * i as f64 / TICKS as f64;
            let gy = MARGIN_TOP + plot_h * i as f64 / TICKS as f64;
            svg.push_str(&format!(
                "<line x1=\"{gx:.1}\" y1=\"{MARGIN_TOP:.1}\" x2=\"{gx:.1}\" y2=\"{:.1}\"/>\n",
                MARGIN_TOP + plot_h
            ));
            svg.push_str(&format!(
                "<line x1=\"{MARGIN_LEFT:.1}\" y1=\"{gy:.1}\" x2=\"{:.1}\" y2=\"{gy:.1}\"/>\n",
                MARGIN_LEFT + plot_w
            ));
        }
        svg.push_str("</g>\n");

        svg.push_str("<g font-family=\"sans-serif\" font-size=\"11\" fill=\"#333333\">\n");
        for i in 0..=TICKS {
            let gx = MARGIN_LEFT + plot_w * i as f64 / TICKS as f64;
            let gy = MARGIN_TOP + plot_h * (1.0 - i as f64 / TICKS as f64);
            svg.push_str(&format!(
                "<text x=\"{gx:.1}\" y=\"{:.1}\" text-anchor=\"middle\">{}</text>\n",
                MARGIN_TOP + plot_h + 16.0,
                tick_label(x_range.tick(i))
            ));
            svg.push_str(&format!(
                "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\">{}</text>\n",
                MARGIN_LEFT - 6.0,
                gy + 4.0,
                tick_label(y_range.tick(i))
            ));
        }
        svg.push_str("</g>\n");

        svg.push_str(&format!(
            "<rect x=\"{MARGIN_LEFT:.1}\" y=\"{MARGIN_TOP:.1}\" width=\"{plot_w:.1}\" height=\"{plot_h:.1}\" fill=\"none\" stroke=\"#333333\"/>\n"
        ));

        svg.push_str("<g fill=\"#1f77b4\">\n");
        for (x, y) in series.points() {
            svg.push_str(&format!(
                "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"4\"/>\n",
                to_px(x),
                to_py(y)
            ));
        }
        svg.push_str("</g>\n");

        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"24\" font-family=\"sans-serif\" font-size=\"16\" text-anchor=\"middle\">{}</text>\n",
            width / 2.0,
            escape(&self.title)
        ));
        svg.push_str(&format!(
            "<text x=\"{:.1}\" y=\"{:.1}\" font-family=\"sans-serif\" font-size=\"13\" text-anchor=\"middle\">{}</text>\n",
            MARGIN_LEFT + plot_w / 2.0,
            height - 12.0,
            escape(&self.x_label)
        ));
        svg.push_str(&format!(
            "<text transform=\"translate(16 {:.1}) rotate(-90)\" font-family=\"sans-serif\" font-size=\"13\" text-anchor=\"middle\">{}</text>\n",
            MARGIN_TOP + plot_h / 2.0,
            escape(&self.y_label)
        ));
        svg.push_str("</svg>\n");
        svg
    }

    /// Renders and saves the chart.
    ///
    /// # Errors
    /// Returns error if the file cannot be written
    pub fn write(&self, path: impl AsRef<Path>, series: &ScatterSeries) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.render(series))
            .with_context(|| format!("Failed to write chart: {}", path.display()))?;
        tracing::info!(path = %path.display(), points = series.len(), "Wrote scatter chart");
        Ok(())
    }
}

fn tick_label(value: f64) -> String {
    if value.abs() >= 100.0 {
        format!("{value:.0}")
    } else if value.abs() >= 1.0 {
        format!("{value:.1}")
    } else {
        format!("{value:.2}")
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
