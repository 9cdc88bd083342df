use crate::math::{mean, sample_stdev};
use chrono::Datelike;
use core_types::AssetSeries;
use serde::{Deserialize, Serialize};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// English month name for a 1-based month number. Out-of-range input is
/// clamped rather than panicking.
pub fn month_name(month: u32) -> &'static str {
    MONTH_NAMES[month.clamp(1, 12) as usize - 1]
}

/// Per-year seasonal breakdown of one asset's (normalized) series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalAggregate {
    pub asset: String,
    pub year: i32,
    /// The series sliced to this calendar year.
    pub slice: AssetSeries,
    /// Exactly 12 entries, January through December; months without data
    /// carry `stats: None`.
    pub months: Vec<MonthlyDetail>,
    /// 1-based month with the highest start-to-end change, ignoring empty
    /// months. None when the whole year is empty.
    pub best_month: Option<u32>,
    /// 1-based month with the lowest start-to-end change.
    pub worst_month: Option<u32>,
    /// Average of the populated months' mean values.
    pub average_monthly_mean: Option<f64>,
    /// Sample stdev of the yearly slice, the year's volatility proxy.
    pub volatility: Option<f64>,
}

/// One month's card: either an explicit "no data" marker or its statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyDetail {
    /// 1-based calendar month.
    pub month: u32,
    /// Number of trading days observed in the month.
    pub days: usize,
    pub stats: Option<MonthlyStats>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyStats {
    pub start: f64,
    pub end: f64,
    pub high: f64,
    pub low: f64,
    pub mean: f64,
    /// Start-to-end change within the month, in %.
    pub change_pct: f64,
    /// High-to-low spread relative to the low, in %.
    pub range_pct: f64,
}

/// Slices one asset's series to a calendar year and aggregates it by month.
///
/// Never fails: a year (or month) with no observations produces explicit
/// empty results rather than an error, so the caller can iterate all twelve
/// months unconditionally.
pub fn seasonal_aggregate(series: &AssetSeries, year: i32) -> SeasonalAggregate {
    let mut slice_dates = Vec::new();
    let mut slice_values = Vec::new();
    for (date, value) in series.dates.iter().zip(&series.values) {
        if date.year() == year {
            slice_dates.push(*date);
            slice_values.push(*value);
        }
    }

    let slice = AssetSeries {
        name: series.name.clone(),
        dates: slice_dates,
        values: slice_values,
    };

    let months: Vec<MonthlyDetail> = (1..=12).map(|month| monthly_detail(&slice, month)).collect();

    let mut best: Option<(u32, f64)> = None;
    let mut worst: Option<(u32, f64)> = None;
    let mut monthly_means = Vec::new();
    for detail in &months {
        let Some(stats) = &detail.stats else { continue };
        monthly_means.push(stats.mean);
        // First month wins ties.
        if best.is_none_or(|(_, change)| stats.change_pct > change) {
            best = Some((detail.month, stats.change_pct));
        }
        if worst.is_none_or(|(_, change)| stats.change_pct < change) {
            worst = Some((detail.month, stats.change_pct));
        }
    }

    let volatility = (slice.len() >= 2).then(|| sample_stdev(&slice.values));

    SeasonalAggregate {
        asset: series.name.clone(),
        year,
        best_month: best.map(|(month, _)| month),
        worst_month: worst.map(|(month, _)| month),
        average_monthly_mean: (!monthly_means.is_empty()).then(|| mean(&monthly_means)),
        volatility,
        slice,
        months,
    }
}

fn monthly_detail(slice: &AssetSeries, month: u32) -> MonthlyDetail {
    let values: Vec<f64> = slice
        .dates
        .iter()
        .zip(&slice.values)
        .filter(|(date, _)| date.month() == month)
        .map(|(_, value)| *value)
        .collect();

    if values.is_empty() {
        return MonthlyDetail {
            month,
            days: 0,
            stats: None,
        };
    }

    let start = values[0];
    let end = values[values.len() - 1];
    let high = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let low = values.iter().cloned().fold(f64::INFINITY, f64::min);

    MonthlyDetail {
        month,
        days: values.len(),
        stats: Some(MonthlyStats {
            start,
            end,
            high,
            low,
            mean: mean(&values),
            change_pct: (end - start) / start * 100.0,
            range_pct: (high - low) / low * 100.0,
        }),
    }
}
