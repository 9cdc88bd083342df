use crate::error::CoreError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A columnar table of daily values for a basket of assets.
///
/// One ordered date index shared by every column; columns are keyed by the
/// asset name from the source table (e.g. "Apple_Price"). The same type
/// carries raw prices and normalized series, so every downstream consumer
/// accepts a frame regardless of how many transformations produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceFrame {
    dates: Vec<NaiveDate>,
    assets: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl PriceFrame {
    /// Builds a frame from a date index and named columns.
    ///
    /// Column order is preserved and acts as the tie-break order for every
    /// ranking downstream. Every column must match the index length.
    pub fn new(
        dates: Vec<NaiveDate>,
        named_columns: Vec<(String, Vec<f64>)>,
    ) -> Result<Self, CoreError> {
        let mut assets = Vec::with_capacity(named_columns.len());
        let mut columns = Vec::with_capacity(named_columns.len());

        for (name, values) in named_columns {
            if values.len() != dates.len() {
                return Err(CoreError::InvalidInput(
                    name,
                    format!(
                        "column has {} values but the date index has {}",
                        values.len(),
                        dates.len()
                    ),
                ));
            }
            if assets.contains(&name) {
                return Err(CoreError::DuplicateAsset(name));
            }
            assets.push(name);
            columns.push(values);
        }

        Ok(Self {
            dates,
            assets,
            columns,
        })
    }

    /// The shared date index.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Asset names in original column order.
    pub fn assets(&self) -> &[String] {
        &self.assets
    }

    /// Number of rows (trading days).
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn asset_count(&self) -> usize {
        self.assets.len()
    }

    pub fn contains(&self, asset: &str) -> bool {
        self.assets.iter().any(|a| a == asset)
    }

    /// The values of one asset column, if present.
    pub fn column(&self, asset: &str) -> Option<&[f64]> {
        let idx = self.assets.iter().position(|a| a == asset)?;
        Some(&self.columns[idx])
    }

    /// Iterates columns in original order as `(name, values)` pairs.
    pub fn iter_columns(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.assets
            .iter()
            .map(String::as_str)
            .zip(self.columns.iter().map(Vec::as_slice))
    }

    /// Extracts one asset's history as an owned series.
    pub fn series(&self, asset: &str) -> Option<AssetSeries> {
        let values = self.column(asset)?;
        Some(AssetSeries {
            name: asset.to_string(),
            dates: self.dates.clone(),
            values: values.to_vec(),
        })
    }
}

/// One asset's dated history, the unit the seasonal aggregator works on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSeries {
    pub name: String,
    pub dates: Vec<NaiveDate>,
    pub values: Vec<f64>,
}

impl AssetSeries {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// First observation as `(date, value)`.
    pub fn first(&self) -> Option<(NaiveDate, f64)> {
        Some((*self.dates.first()?, *self.values.first()?))
    }

    /// Last observation as `(date, value)`.
    pub fn last(&self) -> Option<(NaiveDate, f64)> {
        Some((*self.dates.last()?, *self.values.last()?))
    }

    /// Highest observation with the date it occurred on.
    pub fn high(&self) -> Option<(NaiveDate, f64)> {
        self.argbest(|candidate, best| candidate > best)
    }

    /// Lowest observation with the date it occurred on.
    pub fn low(&self) -> Option<(NaiveDate, f64)> {
        self.argbest(|candidate, best| candidate < best)
    }

    pub fn mean(&self) -> Option<f64> {
        if self.values.is_empty() {
            return None;
        }
        Some(self.values.iter().sum::<f64>() / self.values.len() as f64)
    }

    // First extremum wins on ties, matching idxmax/idxmin in the source data.
    fn argbest(&self, better: impl Fn(f64, f64) -> bool) -> Option<(NaiveDate, f64)> {
        let mut best = (*self.dates.first()?, *self.values.first()?);
        for (date, value) in self.dates.iter().zip(&self.values).skip(1) {
            if better(*value, best.1) {
                best = (*date, *value);
            }
        }
        Some(best)
    }
}
