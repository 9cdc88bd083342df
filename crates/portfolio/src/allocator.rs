use crate::error::PortfolioError;
use analytics::total_return_pct;
use core_types::PriceFrame;
use rust_decimal::Decimal;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One funded line of an allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationLine {
    pub asset: String,
    /// Total return of the raw price history, in % (always > 0 here).
    pub total_return_pct: f64,
    /// Share of the investment, proportional to the return. The weights of
    /// all lines sum to 1.
    pub weight: f64,
    /// Dollar amount, rounded to cents.
    pub amount: Decimal,
}

/// Why an allocation came back empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllocationWarning {
    /// None of the selected assets had a positive total return.
    NoPositiveReturn,
}

/// The result of [`allocate`]: funded lines, the assets that were excluded
/// for non-positive returns, and a warning flag when nothing was fundable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioAllocation {
    pub total_investment: Decimal,
    pub lines: Vec<AllocationLine>,
    /// Selected assets with total return <= 0; they receive no money and do
    /// not dilute the weight base.
    pub excluded: Vec<String>,
    pub warning: Option<AllocationWarning>,
}

/// Splits `total_investment` across the selected assets, proportionally to
/// each asset's positive total return computed from the raw price frame.
///
/// Assets with non-positive returns are excluded from both the output lines
/// and the weight denominator. An all-excluded selection is a warning on an
/// empty allocation, not an error: the caller still gets a renderable result.
pub fn allocate(
    frame: &PriceFrame,
    selected: &[String],
    total_investment: Decimal,
) -> Result<PortfolioAllocation, PortfolioError> {
    // --- 1. Validation ---
    if selected.is_empty() {
        return Err(PortfolioError::EmptySelection);
    }
    if total_investment <= dec!(0) {
        return Err(PortfolioError::InvalidInvestment(total_investment));
    }

    // --- 2. Total return per selected asset (duplicates collapse) ---
    let mut candidates: Vec<(String, f64)> = Vec::new();
    let mut excluded = Vec::new();
    for asset in selected {
        if candidates.iter().any(|(name, _)| name == asset) || excluded.contains(asset) {
            continue;
        }
        let prices = frame
            .column(asset)
            .ok_or_else(|| PortfolioError::UnknownAsset(asset.clone()))?;
        let total_return = total_return_pct(prices)
            .ok_or_else(|| PortfolioError::ReturnUnavailable(asset.clone()))?;
        if total_return > 0.0 {
            candidates.push((asset.clone(), total_return));
        } else {
            excluded.push(asset.clone());
        }
    }

    if candidates.is_empty() {
        warn!("no selected asset has a positive total return; allocation is empty");
        return Ok(PortfolioAllocation {
            total_investment,
            lines: Vec::new(),
            excluded,
            warning: Some(AllocationWarning::NoPositiveReturn),
        });
    }

    // --- 3. Return-proportional weights over the surviving set ---
    let mut return_decimals = Vec::with_capacity(candidates.len());
    for (asset, total_return) in &candidates {
        let value = Decimal::from_f64(*total_return)
            .ok_or_else(|| PortfolioError::ReturnUnavailable(asset.clone()))?;
        return_decimals.push(value);
    }
    let return_sum: Decimal = return_decimals.iter().sum();

    let lines = candidates
        .into_iter()
        .zip(return_decimals)
        .map(|((asset, total_return), return_decimal)| {
            let weight = return_decimal / return_sum;
            AllocationLine {
                asset,
                total_return_pct: total_return,
                weight: weight.to_f64().unwrap_or(f64::NAN),
                amount: (weight * total_investment).round_dp(2),
            }
        })
        .collect();

    Ok(PortfolioAllocation {
        total_investment,
        lines,
        excluded,
        warning: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn frame(columns: Vec<(&str, Vec<f64>)>) -> PriceFrame {
        let rows = columns[0].1.len();
        let dates: Vec<NaiveDate> = (1..=rows as u32)
            .map(|day| NaiveDate::from_ymd_opt(2022, 6, day).unwrap())
            .collect();
        PriceFrame::new(
            dates,
            columns
                .into_iter()
                .map(|(name, values)| (name.to_string(), values))
                .collect(),
        )
        .unwrap()
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn splits_proportionally_to_positive_returns() {
        // A +20%, B -5%, C +10% with $300: B is excluded, A gets $200,
        // C gets $100 and the weights are 2/3 and 1/3.
        let frame = frame(vec![
            ("A_Price", vec![100.0, 120.0]),
            ("B_Price", vec![100.0, 95.0]),
            ("C_Price", vec![100.0, 110.0]),
        ]);
        let allocation =
            allocate(&frame, &names(&["A_Price", "B_Price", "C_Price"]), dec!(300)).unwrap();

        assert_eq!(allocation.excluded, ["B_Price"]);
        assert!(allocation.warning.is_none());
        assert_eq!(allocation.lines.len(), 2);

        let a = &allocation.lines[0];
        let c = &allocation.lines[1];
        assert_eq!(a.asset, "A_Price");
        assert_relative_eq!(a.weight, 2.0 / 3.0, max_relative = 1e-12);
        assert_eq!(a.amount, dec!(200.00));
        assert_eq!(c.asset, "C_Price");
        assert_relative_eq!(c.weight, 1.0 / 3.0, max_relative = 1e-12);
        assert_eq!(c.amount, dec!(100.00));

        let amount_sum: Decimal = allocation.lines.iter().map(|l| l.amount).sum();
        assert_eq!(amount_sum, dec!(300.00));
        let weight_sum: f64 = allocation.lines.iter().map(|l| l.weight).sum();
        assert_relative_eq!(weight_sum, 1.0, max_relative = 1e-12);
    }

    #[test]
    fn all_negative_selection_is_a_warning_not_an_error() {
        let frame = frame(vec![
            ("A_Price", vec![100.0, 90.0]),
            ("B_Price", vec![100.0, 100.0]),
        ]);
        let allocation =
            allocate(&frame, &names(&["A_Price", "B_Price"]), dec!(1000)).unwrap();
        assert!(allocation.lines.is_empty());
        assert_eq!(allocation.warning, Some(AllocationWarning::NoPositiveReturn));
        assert_eq!(allocation.excluded, ["A_Price", "B_Price"]);
    }

    #[test]
    fn empty_selection_is_rejected() {
        let frame = frame(vec![("A_Price", vec![100.0, 110.0])]);
        assert!(matches!(
            allocate(&frame, &[], dec!(100)),
            Err(PortfolioError::EmptySelection)
        ));
    }

    #[test]
    fn non_positive_investment_is_rejected() {
        let frame = frame(vec![("A_Price", vec![100.0, 110.0])]);
        assert!(matches!(
            allocate(&frame, &names(&["A_Price"]), dec!(0)),
            Err(PortfolioError::InvalidInvestment(_))
        ));
    }

    #[test]
    fn unknown_asset_is_rejected() {
        let frame = frame(vec![("A_Price", vec![100.0, 110.0])]);
        assert!(matches!(
            allocate(&frame, &names(&["Z_Price"]), dec!(100)),
            Err(PortfolioError::UnknownAsset(_))
        ));
    }

    #[test]
    fn duplicate_selections_collapse() {
        let frame = frame(vec![("A_Price", vec![100.0, 110.0])]);
        let allocation =
            allocate(&frame, &names(&["A_Price", "A_Price"]), dec!(500)).unwrap();
        assert_eq!(allocation.lines.len(), 1);
        assert_eq!(allocation.lines[0].amount, dec!(500.00));
    }
}
