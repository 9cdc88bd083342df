use crate::error::AnalyticsError;
use core_types::PriceFrame;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Pairwise Pearson correlation matrix over the columns of a frame.
///
/// Symmetric with a unit diagonal. A zero-variance column has no defined
/// correlation with anything; those entries are NaN so the presentation
/// layer can still render the rest of the matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationMatrix {
    assets: Vec<String>,
    values: Vec<Vec<f64>>,
}

/// One asset's correlation with another, as ranked by
/// [`CorrelationMatrix::asset_correlations`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetCorrelation {
    pub asset: String,
    pub coefficient: f64,
}

/// An unordered asset pair with its coefficient, as ranked by
/// [`CorrelationMatrix::pair_rankings`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationPair {
    pub first: String,
    pub second: String,
    pub coefficient: f64,
}

/// Computes the full correlation matrix, normally over the normalized frame.
pub fn correlation_matrix(frame: &PriceFrame) -> Result<CorrelationMatrix, AnalyticsError> {
    if frame.is_empty() || frame.asset_count() == 0 {
        return Err(AnalyticsError::EmptyInput);
    }

    let columns: Vec<&[f64]> = frame.iter_columns().map(|(_, values)| values).collect();
    let n = columns.len();
    let mut values = vec![vec![1.0; n]; n];

    for i in 0..n {
        for j in (i + 1)..n {
            let r = pearson(columns[i], columns[j]);
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Ok(CorrelationMatrix {
        assets: frame.assets().to_vec(),
        values,
    })
}

impl CorrelationMatrix {
    /// Asset names in original column order.
    pub fn assets(&self) -> &[String] {
        &self.assets
    }

    /// The raw coefficient rows, indexed like [`Self::assets`].
    pub fn values(&self) -> &[Vec<f64>] {
        &self.values
    }

    /// The coefficient for a pair of assets, if both are present.
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.position(a)?;
        let j = self.position(b)?;
        Some(self.values[i][j])
    }

    /// Projects the matrix onto a subset of assets without recomputation.
    ///
    /// Names not present in the matrix are skipped, matching how the
    /// category lists tolerate assets missing from the loaded table.
    pub fn submatrix(&self, names: &[&str]) -> CorrelationMatrix {
        let indices: Vec<usize> = names.iter().filter_map(|n| self.position(n)).collect();
        let assets = indices.iter().map(|&i| self.assets[i].clone()).collect();
        let values = indices
            .iter()
            .map(|&i| indices.iter().map(|&j| self.values[i][j]).collect())
            .collect();
        CorrelationMatrix { assets, values }
    }

    /// One asset's correlation with every other asset, sorted descending.
    ///
    /// The asset itself is excluded. Ties (and NaN entries) keep their
    /// original column order under the stable sort.
    pub fn asset_correlations(
        &self,
        asset: &str,
    ) -> Result<Vec<AssetCorrelation>, AnalyticsError> {
        let row = self
            .position(asset)
            .ok_or_else(|| AnalyticsError::UnknownAsset(asset.to_string()))?;

        let mut ranked: Vec<AssetCorrelation> = self
            .assets
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != row)
            .map(|(i, name)| AssetCorrelation {
                asset: name.clone(),
                coefficient: self.values[row][i],
            })
            .collect();

        ranked.sort_by(|a, b| {
            b.coefficient
                .partial_cmp(&a.coefficient)
                .unwrap_or(Ordering::Equal)
        });
        Ok(ranked)
    }

    /// Every unordered pair ranked by coefficient, descending. The head is
    /// the "top positive" list, the tail the "top negative" one.
    pub fn pair_rankings(&self) -> Vec<CorrelationPair> {
        let mut pairs = Vec::new();
        for i in 0..self.assets.len() {
            for j in (i + 1)..self.assets.len() {
                pairs.push(CorrelationPair {
                    first: self.assets[i].clone(),
                    second: self.assets[j].clone(),
                    coefficient: self.values[i][j],
                });
            }
        }
        pairs.sort_by(|a, b| {
            b.coefficient
                .partial_cmp(&a.coefficient)
                .unwrap_or(Ordering::Equal)
        });
        pairs
    }

    fn position(&self, asset: &str) -> Option<usize> {
        self.assets.iter().position(|a| a == asset)
    }
}

/// Sample Pearson correlation of two equally long series.
///
/// NaN when either series has zero variance (undefined correlation).
fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n == 0 {
        return f64::NAN;
    }
    let mean_x = x[..n].iter().sum::<f64>() / n as f64;
    let mean_y = y[..n].iter().sum::<f64>() / n as f64;

    let mut covariance = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for i in 0..n {
        let dx = x[i] - mean_x;
        let dy = y[i] - mean_y;
        covariance += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    if var_x == 0.0 || var_y == 0.0 {
        return f64::NAN;
    }
    covariance / (var_x.sqrt() * var_y.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn frame(columns: Vec<(&str, Vec<f64>)>) -> PriceFrame {
        let rows = columns[0].1.len();
        let dates: Vec<NaiveDate> = (1..=rows as u32)
            .map(|day| NaiveDate::from_ymd_opt(2022, 3, day).unwrap())
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

    fn sample_matrix() -> CorrelationMatrix {
        correlation_matrix(&frame(vec![
            ("A_Price", vec![1.0, 2.0, 3.0, 4.0]),
            ("B_Price", vec![2.0, 4.0, 6.0, 8.0]),
            ("C_Price", vec![4.0, 3.0, 2.0, 1.0]),
            ("D_Price", vec![1.0, 3.0, 2.0, 4.0]),
        ]))
        .unwrap()
    }

    #[test]
    fn symmetric_with_unit_diagonal() {
        let matrix = sample_matrix();
        for a in matrix.assets() {
            assert_relative_eq!(matrix.get(a, a).unwrap(), 1.0);
            for b in matrix.assets() {
                assert_relative_eq!(
                    matrix.get(a, b).unwrap(),
                    matrix.get(b, a).unwrap()
                );
            }
        }
    }

    #[test]
    fn perfectly_linear_pairs() {
        let matrix = sample_matrix();
        assert_relative_eq!(matrix.get("A_Price", "B_Price").unwrap(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(matrix.get("A_Price", "C_Price").unwrap(), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn ranking_excludes_self_and_sorts_descending() {
        let matrix = sample_matrix();
        let ranked = matrix.asset_correlations("A_Price").unwrap();
        assert_eq!(ranked.len(), 3);
        assert!(ranked.iter().all(|c| c.asset != "A_Price"));
        for window in ranked.windows(2) {
            assert!(window[0].coefficient >= window[1].coefficient);
        }
        assert_eq!(ranked[0].asset, "B_Price");
        assert_eq!(ranked[2].asset, "C_Price");
    }

    #[test]
    fn ties_keep_original_column_order() {
        // B and C are both exact copies of A, so their coefficients tie at 1.
        let matrix = correlation_matrix(&frame(vec![
            ("A_Price", vec![1.0, 2.0, 3.0]),
            ("C_Price", vec![1.0, 2.0, 3.0]),
            ("B_Price", vec![1.0, 2.0, 3.0]),
        ]))
        .unwrap();
        let ranked = matrix.asset_correlations("A_Price").unwrap();
        assert_eq!(ranked[0].asset, "C_Price");
        assert_eq!(ranked[1].asset, "B_Price");
    }

    #[test]
    fn zero_variance_column_yields_nan_not_a_crash() {
        let matrix = correlation_matrix(&frame(vec![
            ("A_Price", vec![1.0, 2.0, 3.0]),
            ("Flat_Price", vec![5.0, 5.0, 5.0]),
        ]))
        .unwrap();
        assert!(matrix.get("A_Price", "Flat_Price").unwrap().is_nan());
        // The diagonal is still exact.
        assert_relative_eq!(matrix.get("Flat_Price", "Flat_Price").unwrap(), 1.0);
    }

    #[test]
    fn submatrix_is_a_pure_projection() {
        let matrix = sample_matrix();
        let sub = matrix.submatrix(&["C_Price", "A_Price", "Missing_Price"]);
        assert_eq!(sub.assets(), ["C_Price", "A_Price"]);
        assert_relative_eq!(
            sub.get("C_Price", "A_Price").unwrap(),
            matrix.get("C_Price", "A_Price").unwrap()
        );
    }

    #[test]
    fn pair_rankings_cover_each_pair_once() {
        let matrix = sample_matrix();
        let pairs = matrix.pair_rankings();
        assert_eq!(pairs.len(), 6); // C(4, 2)
        assert_relative_eq!(pairs[0].coefficient, 1.0, epsilon = 1e-12);
        assert_relative_eq!(pairs[5].coefficient, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn unknown_asset_is_an_error() {
        assert!(matches!(
            sample_matrix().asset_correlations("Nope_Price"),
            Err(AnalyticsError::UnknownAsset(_))
        ));
    }

    #[test]
    fn empty_frame_is_rejected() {
        let empty = PriceFrame::new(vec![], vec![]).unwrap();
        assert!(matches!(
            correlation_matrix(&empty),
            Err(AnalyticsError::EmptyInput)
        ));
    }
}
