pub mod allocator;
pub mod error;

// Re-export the core types to provide a clean public API.
pub use allocator::{AllocationLine, AllocationWarning, PortfolioAllocation, allocate};
pub use error::PortfolioError;
