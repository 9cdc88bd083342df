use crate::error::LoadError;
use chrono::NaiveDate;
use core_types::PriceFrame;
use std::path::Path;
use tracing::info;

/// Loads the cleaned price table from a CSV file into a [`PriceFrame`].
///
/// Expected layout: a `Date` first column (`YYYY-MM-DD`) followed by one
/// `<Asset>_Price` column per asset, one row per trading day, no gaps. The
/// source data is pre-cleaned upstream, so any malformed cell is a fatal
/// [`LoadError`], not something to repair here.
pub fn load_price_table(path: impl AsRef<Path>) -> Result<PriceFrame, LoadError> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)?;

    let headers = reader.headers()?.clone();
    let date_header = headers.iter().next().unwrap_or("");
    if date_header != "Date" {
        return Err(LoadError::MissingDateColumn(date_header.to_string()));
    }
    let asset_names: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();

    let mut dates: Vec<NaiveDate> = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); asset_names.len()];

    for (index, record) in reader.records().enumerate() {
        let record = record?;
        // 1-based file line, counting the header.
        let row = index + 2;

        let raw_date = record.get(0).unwrap_or("");
        let date = raw_date.parse::<NaiveDate>().map_err(|_| LoadError::DateParse {
            row,
            value: raw_date.to_string(),
        })?;
        if let Some(previous) = dates.last() {
            if date <= *previous {
                return Err(LoadError::OutOfOrderDate {
                    row,
                    value: date.to_string(),
                });
            }
        }
        dates.push(date);

        for (column_index, name) in asset_names.iter().enumerate() {
            let raw = record.get(column_index + 1).unwrap_or("");
            let value = raw.parse::<f64>().map_err(|_| LoadError::BadValue {
                row,
                column: name.clone(),
                value: raw.to_string(),
            })?;
            columns[column_index].push(value);
        }
    }

    if dates.is_empty() {
        return Err(LoadError::Empty);
    }

    let frame = PriceFrame::new(dates, asset_names.into_iter().zip(columns).collect())?;

    info!(
        rows = frame.len(),
        assets = frame.asset_count(),
        path = %path.display(),
        "loaded price table"
    );

    Ok(frame)
}
