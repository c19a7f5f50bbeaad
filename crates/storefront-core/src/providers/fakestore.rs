// Fake Store provider - bridges the API client with the CatalogProvider trait
use std::time::Duration;

use async_trait::async_trait;
use storefront_api::{ApiProduct, CatalogClient, CatalogError};
use tracing::warn;

use crate::{
    catalog::CatalogProvider,
    config::ApiConfig,
    models::{Product, ProductId, Rating},
    Error, Result,
};

/// Wrapper around CatalogClient that implements CatalogProvider
pub struct FakeStoreProvider {
    client: CatalogClient,
}

impl FakeStoreProvider {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = CatalogClient::with_options(
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
        )
        .map_err(unavailable)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl CatalogProvider for FakeStoreProvider {
    async fn fetch_products(&self) -> Result<Vec<Product>> {
        let products = self.client.get_products().await.map_err(unavailable)?;
        Ok(products.into_iter().map(api_to_product).collect())
    }

    async fn fetch_product(&self, id: ProductId) -> Result<Product> {
        self.client
            .get_product(id.0)
            .await
            .map(api_to_product)
            .map_err(|e| fetch_error(id, e))
    }

    async fn fetch_category(&self, category: &str) -> Result<Vec<Product>> {
        let products = self
            .client
            .get_products_in_category(category)
            .await
            .map_err(unavailable)?;

        Ok(products.into_iter().map(api_to_product).collect())
    }

    async fn fetch_categories(&self) -> Result<Vec<String>> {
        self.client.get_categories().await.map_err(unavailable)
    }
}

/// A missing product stays distinguishable; anything else is unavailability
fn fetch_error(id: ProductId, err: CatalogError) -> Error {
    match err {
        CatalogError::NotFound(_) => Error::NotFound(id),
        other => unavailable(other),
    }
}

/// Every transport failure looks the same to callers
fn unavailable(err: CatalogError) -> Error {
    warn!("Catalog request failed: {}", err);
    Error::Unavailable(err.to_string())
}

/// Convert an API product to our internal Product model
fn api_to_product(api: ApiProduct) -> Product {
    Product {
        id: ProductId(api.id),
        title: api.title,
        price: api.price,
        category: api.category,
        description: api.description,
        image: api.image,
        rating: api.rating.map(|r| Rating {
            rate: r.rate,
            count: r.count,
        }),
    }
}
