pub mod correlation;
pub mod engine;
pub mod error;
mod math;
pub mod normalize;
pub mod report;
pub mod seasonal;

// Re-export the core types to provide a clean public API.
pub use correlation::{AssetCorrelation, CorrelationMatrix, CorrelationPair, correlation_matrix};
pub use engine::{StatisticsEngine, daily_returns, total_return_pct};
pub use error::AnalyticsError;
pub use normalize::normalize;
pub use report::{AssetStatistics, SeriesSummary};
pub use seasonal::{
    MonthlyDetail, MonthlyStats, SeasonalAggregate, month_name, seasonal_aggregate,
};
