// API client for the remote product catalog
pub mod fakestore;

// Re-export common types
pub use fakestore::{ApiProduct, ApiRating, CatalogClient, CatalogError};
