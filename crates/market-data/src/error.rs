use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    // I/O failures (including a missing file) surface through the csv
    // reader, so they arrive wrapped in this variant.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Price table must start with a 'Date' column, found '{0}'")]
    MissingDateColumn(String),

    #[error("Row {row}: unparseable date '{value}'")]
    DateParse { row: usize, value: String },

    #[error("Row {row}, column '{column}': unparseable price '{value}'")]
    BadValue {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Row {row}: date {value} is not after the previous row")]
    OutOfOrderDate { row: usize, value: String },

    #[error("Price table contains no data rows")]
    Empty,

    #[error("Invalid price table: {0}")]
    Shape(#[from] core_types::CoreError),
}
