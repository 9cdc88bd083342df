pub mod error;
pub mod loader;

// Re-export the core types to provide a clean public API.
pub use error::LoadError;
pub use loader::load_price_table;
