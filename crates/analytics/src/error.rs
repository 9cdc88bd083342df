use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("Cannot compute over an empty table")]
    EmptyInput,

    #[error("Smoothing window must be at least 1, got {0}")]
    InvalidWindow(usize),

    #[error("Unknown asset: {0}")]
    UnknownAsset(String),

    #[error("Not enough data to perform calculation: {0}")]
    NotEnoughData(String),

    #[error("An unexpected error occurred during analytics calculation: {0}")]
    Internal(String),
}
