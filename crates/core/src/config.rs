use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub overstock: OverstockThresholds,
    pub chart: ChartConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub chart_path: String,
    pub overstock_path: String,
}

/// Slow-moving, overstocked selection. Both bounds are strict.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OverstockThresholds {
    /// Average inventory days must exceed this.
    pub min_inventory_days: f64,
    /// Total quantity sold must be below this.
    pub max_qty_sold: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for OverstockThresholds {
    fn default() -> Self {
        Self {
            min_inventory_days: 60.0,
            max_qty_sold: 20,
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 500,
            title: "Inventory Days vs Profit Margin".to_string(),
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            input: InputConfig {
                path: "sales.csv".to_string(),
            },
            output: OutputConfig {
                chart_path: "inventory_vs_margin.svg".to_string(),
                overstock_path: "slow_overstock.csv".to_string(),
            },
            overstock: OverstockThresholds::default(),
            chart: ChartConfig::default(),
        }
    }
}
