use serde::Deserialize;

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data: DataSettings,
    pub analytics: AnalyticsParams,
}

/// Where the one persisted artifact, the price table, lives.
#[derive(Debug, Clone, Deserialize)]
pub struct DataSettings {
    /// Path to the cleaned CSV price table (one row per trading day, one
    /// `<Asset>_Price` column per asset).
    pub price_table_path: String,
}

/// Tunable parameters of the analytics pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyticsParams {
    /// Width of the trailing moving average applied after rebasing to 100.
    pub smoothing_window: usize,
    /// Annualization base for volatility and Sharpe (252 trading days).
    pub trading_days_per_year: u32,
    /// Confidence level for historical VaR (0.95 reads the 5th percentile).
    pub var_confidence: f64,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            price_table_path: "data/us_market_prices.csv".to_string(),
        }
    }
}

impl Default for AnalyticsParams {
    fn default() -> Self {
        Self {
            smoothing_window: 14,
            trading_days_per_year: 252,
            var_confidence: 0.95,
        }
    }
}
