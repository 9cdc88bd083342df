use crate::error::AnalyticsError;
use crate::math::{mean, percentile, sample_stdev};
use crate::report::{AssetStatistics, SeriesSummary};
use configuration::AnalyticsParams;
use core_types::{Grade, PriceFrame};
use tracing::warn;

/// A stateless calculator for per-asset risk/return statistics.
///
/// Works on the raw price frame; every asset is independent, so a failure on
/// one asset never aborts the batch.
#[derive(Debug, Clone)]
pub struct StatisticsEngine {
    params: AnalyticsParams,
}

impl StatisticsEngine {
    pub fn new(params: AnalyticsParams) -> Self {
        Self { params }
    }

    /// Computes the full statistics record for one asset of the raw frame.
    pub fn asset_statistics(
        &self,
        frame: &PriceFrame,
        asset: &str,
    ) -> Result<AssetStatistics, AnalyticsError> {
        let prices = frame
            .column(asset)
            .ok_or_else(|| AnalyticsError::UnknownAsset(asset.to_string()))?;
        if prices.len() < 2 {
            return Err(AnalyticsError::NotEnoughData(format!(
                "{asset} has {} price(s), need at least 2",
                prices.len()
            )));
        }

        let returns = daily_returns(prices);
        let trading_days = f64::from(self.params.trading_days_per_year);
        let stdev = sample_stdev(&returns);

        // Zero-volatility Sharpe is undefined; reported as NaN so the
        // presentation can render "n/a" for this one cell.
        let sharpe_ratio = if stdev == 0.0 {
            f64::NAN
        } else {
            (mean(&returns) * trading_days) / (stdev * trading_days.sqrt())
        };

        let total_return_pct = total_return_pct(prices).ok_or_else(|| {
            AnalyticsError::NotEnoughData(format!("{asset} has no price history"))
        })?;

        Ok(AssetStatistics {
            asset: asset.to_string(),
            total_return_pct,
            annualized_volatility_pct: stdev * trading_days.sqrt() * 100.0,
            sharpe_ratio,
            var_95_pct: percentile(&returns, 1.0 - self.params.var_confidence) * 100.0,
            max_drawdown_pct: max_drawdown_pct(prices),
            skewness: standardized_moment(&returns, 3),
            kurtosis: standardized_moment(&returns, 4),
            grade: Grade::from_total_return(total_return_pct),
        })
    }

    /// Statistics for every asset of the frame, in column order.
    ///
    /// Per-asset failures are logged and carried in the result; they never
    /// abort computation for the other assets.
    pub fn all_statistics(
        &self,
        frame: &PriceFrame,
    ) -> Vec<(String, Result<AssetStatistics, AnalyticsError>)> {
        frame
            .assets()
            .iter()
            .map(|asset| {
                let result = self.asset_statistics(frame, asset);
                if let Err(e) = &result {
                    warn!(asset = %asset, error = %e, "skipping asset statistics");
                }
                (asset.clone(), result)
            })
            .collect()
    }

    /// Descriptive summary of one column for the overview table, usually
    /// called on the normalized frame.
    pub fn series_summary(
        &self,
        frame: &PriceFrame,
        asset: &str,
    ) -> Result<SeriesSummary, AnalyticsError> {
        let values = frame
            .column(asset)
            .ok_or_else(|| AnalyticsError::UnknownAsset(asset.to_string()))?;
        if values.is_empty() {
            return Err(AnalyticsError::EmptyInput);
        }

        let start = values[0];
        let close = values[values.len() - 1];
        Ok(SeriesSummary {
            asset: asset.to_string(),
            start,
            close,
            max: values.iter().cloned().fold(f64::NEG_INFINITY, f64::max),
            min: values.iter().cloned().fold(f64::INFINITY, f64::min),
            average: mean(values),
            change_pct: (close - start) / start * 100.0,
            volatility: sample_stdev(values),
        })
    }
}

/// Daily simple returns `r_t = p_t / p_{t-1} - 1`.
pub fn daily_returns(prices: &[f64]) -> Vec<f64> {
    prices.windows(2).map(|w| w[1] / w[0] - 1.0).collect()
}

/// Total return over the whole history, in %. None on an empty slice.
pub fn total_return_pct(prices: &[f64]) -> Option<f64> {
    let first = *prices.first()?;
    let last = *prices.last()?;
    Some((last / first - 1.0) * 100.0)
}

/// Worst peak-to-trough decline in %, tracked against the running maximum.
/// Zero for a series that never dips below a previous high.
fn max_drawdown_pct(prices: &[f64]) -> f64 {
    let mut running_max = f64::NEG_INFINITY;
    let mut worst = 0.0f64;
    for &price in prices {
        running_max = running_max.max(price);
        let drawdown = price / running_max - 1.0;
        worst = worst.min(drawdown);
    }
    worst * 100.0
}

/// n-th standardized population moment; NaN on zero variance.
fn standardized_moment(values: &[f64], order: i32) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let m = mean(values);
    let n = values.len() as f64;
    let variance = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / n;
    if variance == 0.0 {
        return f64::NAN;
    }
    let central: f64 = values.iter().map(|v| (v - m).powi(order)).sum::<f64>() / n;
    central / variance.powf(f64::from(order) / 2.0)
}
