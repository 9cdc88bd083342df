use core_types::Grade;
use serde::{Deserialize, Serialize};

/// The full risk/return profile of one asset, derived from its raw (not
/// normalized) price history.
///
/// This struct is the final output of the `StatisticsEngine` and the data
/// transfer object for the leaderboard view. Sharpe, skewness, and kurtosis
/// are NaN when the underlying returns have zero variance; the undefined
/// value is reported rather than raised so one flat series cannot take down
/// a whole batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetStatistics {
    pub asset: String,

    // I. Return
    /// (p_last / p_first - 1) * 100.
    pub total_return_pct: f64,

    // II. Risk
    /// Sample stdev of daily returns, annualized over 252 trading days, in %.
    pub annualized_volatility_pct: f64,
    /// Annualized mean return over annualized volatility; NaN on zero stdev.
    pub sharpe_ratio: f64,
    /// 5th percentile of daily returns, in % (a negative number).
    pub var_95_pct: f64,
    /// Worst decline from a running maximum, in % (always <= 0).
    pub max_drawdown_pct: f64,

    // III. Shape of the return distribution
    /// Third standardized moment of daily returns.
    pub skewness: f64,
    /// Fourth standardized moment (plain, not excess; normal is around 3).
    pub kurtosis: f64,

    /// Letter grade from the total-return cutoffs.
    pub grade: Grade,
}

/// Descriptive summary of one (normalized) series for the overview table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub asset: String,
    pub start: f64,
    pub close: f64,
    pub max: f64,
    pub min: f64,
    pub average: f64,
    /// Start-to-close change in %.
    pub change_pct: f64,
    /// Sample stdev of the series, the overview's volatility column.
    pub volatility: f64,
}
