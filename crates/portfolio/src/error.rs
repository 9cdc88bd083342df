use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PortfolioError {
    #[error("No assets selected for allocation")]
    EmptySelection,

    #[error("Total investment must be positive, got {0}")]
    InvalidInvestment(Decimal),

    #[error("Unknown asset: {0}")]
    UnknownAsset(String),

    #[error("Failed to compute total return for {0}")]
    ReturnUnavailable(String),
}
