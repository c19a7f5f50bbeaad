// Storefront business logic: catalog snapshot, query engine, session cart
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod providers;
pub mod query;

pub use cart::{Cart, CartLine};
pub use catalog::{Catalog, CatalogProvider};
pub use config::Config;
pub use error::Error;
pub use models::{PriceRange, Product, ProductId, Rating, StarBreakdown};
pub use providers::FakeStoreProvider;
pub use query::{Query, SortKey};

/// Result type alias because typing Result<T, Error> everywhere is tedious
pub type Result<T> = std::result::Result<T, Error>;
