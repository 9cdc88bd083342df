use crate::error::AnalyticsError;
use core_types::PriceFrame;

/// Rebases every column to 100 at its first observation, smooths it with a
/// trailing moving average, and drops the first (anchor) row.
///
/// Partial windows are allowed at the start: position `i` averages the up to
/// `window` most recent points available so far, never fewer than one. The
/// output is a regular [`PriceFrame`], so the transform can be applied to its
/// own output; each pass trims exactly one row.
pub fn normalize(frame: &PriceFrame, window: usize) -> Result<PriceFrame, AnalyticsError> {
    if frame.is_empty() {
        return Err(AnalyticsError::EmptyInput);
    }
    if window == 0 {
        return Err(AnalyticsError::InvalidWindow(window));
    }

    let mut named_columns = Vec::with_capacity(frame.asset_count());
    for (name, values) in frame.iter_columns() {
        let first = values[0];
        let rebased: Vec<f64> = values.iter().map(|v| v / first * 100.0).collect();
        let smoothed = rolling_mean(&rebased, window);
        // Row 0 is the rebasing anchor, not an observation.
        named_columns.push((name.to_string(), smoothed[1..].to_vec()));
    }

    let dates = frame.dates()[1..].to_vec();
    PriceFrame::new(dates, named_columns).map_err(|e| AnalyticsError::Internal(e.to_string()))
}

/// Trailing simple moving average with partial windows at the start.
fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    for i in 0..values.len() {
        let start = (i + 1).saturating_sub(window);
        let slice = &values[start..=i];
        out.push(slice.iter().sum::<f64>() / slice.len() as f64);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn frame(values: Vec<f64>) -> PriceFrame {
        let dates: Vec<NaiveDate> = (1..=values.len() as u32)
            .map(|day| NaiveDate::from_ymd_opt(2022, 3, day).unwrap())
            .collect();
        PriceFrame::new(dates, vec![("Asset_Price".to_string(), values)]).unwrap()
    }

    #[test]
    fn rebases_smooths_and_trims() {
        // Raw [10, 12, 11] -> rebased [100, 120, 110] -> partial rolling
        // mean [100, 110, 110] -> post-trim [110, 110].
        let normalized = normalize(&frame(vec![10.0, 12.0, 11.0]), 14).unwrap();
        let column = normalized.column("Asset_Price").unwrap();
        assert_eq!(normalized.len(), 2);
        assert_relative_eq!(column[0], 110.0);
        assert_relative_eq!(column[1], 110.0);
    }

    #[test]
    fn window_one_disables_smoothing() {
        let normalized = normalize(&frame(vec![10.0, 12.0, 11.0]), 1).unwrap();
        let column = normalized.column("Asset_Price").unwrap();
        assert_relative_eq!(column[0], 120.0);
        assert_relative_eq!(column[1], 110.0);
    }

    #[test]
    fn window_bounds_the_average_once_full() {
        let values: Vec<f64> = (1..=6).map(|v| v as f64).collect();
        let averaged = rolling_mean(&values, 3);
        assert_relative_eq!(averaged[0], 1.0);
        assert_relative_eq!(averaged[1], 1.5);
        assert_relative_eq!(averaged[2], 2.0);
        // From here the window is saturated at 3 points.
        assert_relative_eq!(averaged[3], 3.0);
        assert_relative_eq!(averaged[5], 5.0);
    }

    #[test]
    fn empty_frame_is_rejected() {
        let empty = PriceFrame::new(vec![], vec![("Asset_Price".to_string(), vec![])]).unwrap();
        assert!(matches!(
            normalize(&empty, 14),
            Err(AnalyticsError::EmptyInput)
        ));
    }

    #[test]
    fn zero_window_is_rejected() {
        assert!(matches!(
            normalize(&frame(vec![10.0, 11.0]), 0),
            Err(AnalyticsError::InvalidWindow(0))
        ));
    }

    #[test]
    fn renormalizing_trims_exactly_one_row() {
        let once = normalize(&frame(vec![10.0, 12.0, 11.0, 13.0]), 14).unwrap();
        let twice = normalize(&once, 14).unwrap();
        assert_eq!(once.len(), 3);
        assert_eq!(twice.len(), 2);
        // Values change (the scale is rebased again) but the shape contract
        // holds and consumers can take either frame.
        assert_eq!(twice.assets(), once.assets());
    }
}
