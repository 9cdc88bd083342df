pub mod enums;
pub mod error;
pub mod frame;

// Re-export the core types to provide a clean public API.
pub use enums::{AssetCategory, CorrelationStrength, Grade};
pub use error::CoreError;
pub use frame::{AssetSeries, PriceFrame};
