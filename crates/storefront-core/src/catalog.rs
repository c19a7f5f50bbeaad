use tracing::{debug, info};

use crate::{
    models::{PriceRange, Product, ProductId},
    query::{self, Query},
    Result,
};

/// Source of catalog data
///
/// The HTTP-backed implementation lives in `providers`; tests swap in a mock.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn fetch_products(&self) -> Result<Vec<Product>>;
    async fn fetch_product(&self, id: ProductId) -> Result<Product>;
    async fn fetch_category(&self, category: &str) -> Result<Vec<Product>>;
    async fn fetch_categories(&self) -> Result<Vec<String>>;
}

/// A fetched, read-only product list
///
/// Fetch once per view, then query as often as the filters change.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Fetch the whole catalog
    pub async fn load(provider: &dyn CatalogProvider) -> Result<Self> {
        let products = provider.fetch_products().await?;
        info!("Loaded {} products", products.len());
        Ok(Self { products })
    }

    /// Fetch only one category's products
    pub async fn load_category(provider: &dyn CatalogProvider, category: &str) -> Result<Self> {
        let products = provider.fetch_category(category).await?;
        info!("Loaded {} products in {}", products.len(), category);
        Ok(Self { products })
    }

    pub fn from_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn in_category(&self, category: &str) -> Vec<&Product> {
        query::apply(&self.products, &Query::new().category(category))
    }

    /// Free-text match over title, description and category
    pub fn matching(&self, text: &str) -> Vec<&Product> {
        query::apply(&self.products, &Query::new().text(text))
    }

    /// Derived view for the given filters. Recomputed on every call.
    pub fn query(&self, query: &Query) -> Vec<&Product> {
        let view = query::apply(&self.products, query);
        debug!(
            "Query {:?} kept {} of {} products",
            query,
            view.len(),
            self.products.len()
        );
        view
    }

    /// Distinct categories in first-seen order
    pub fn categories(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for product in &self.products {
            if !seen.contains(&product.category.as_str()) {
                seen.push(&product.category);
            }
        }
        seen
    }

    pub fn price_range(&self) -> PriceRange {
        PriceRange::covering(&self.products)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::fixtures::product, Error};
    use rust_decimal::Decimal;

    fn sample() -> Vec<Product> {
        vec![
            product(1, "Backpack", Decimal::new(10995, 2), "men's clothing"),
            product(2, "Gold Ring", Decimal::new(695, 0), "jewelery"),
            product(3, "Monitor", Decimal::new(59999, 2), "electronics"),
            product(4, "Slim Shirt", Decimal::new(2230, 2), "men's clothing"),
        ]
    }

    #[tokio::test]
    async fn test_load_uses_provider() {
        let mut provider = MockCatalogProvider::new();
        provider
            .expect_fetch_products()
            .times(1)
            .returning(|| Ok(sample()));

        let catalog = Catalog::load(&provider).await.unwrap();
        assert_eq!(catalog.len(), 4);
        assert_eq!(catalog.get(ProductId(3)).unwrap().title, "Monitor");
        assert!(catalog.get(ProductId(9)).is_none());
    }

    #[tokio::test]
    async fn test_load_failure_surfaces_unavailable() {
        let mut provider = MockCatalogProvider::new();
        provider
            .expect_fetch_products()
            .returning(|| Err(Error::Unavailable("connection refused".into())));

        let err = Catalog::load(&provider).await.unwrap_err();
        assert!(matches!(err, Error::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_load_category() {
        let mut provider = MockCatalogProvider::new();
        provider
            .expect_fetch_category()
            .with(mockall::predicate::eq("jewelery"))
            .returning(|_| Ok(vec![product(2, "Gold Ring", Decimal::from(695), "jewelery")]));

        let catalog = Catalog::load_category(&provider, "jewelery").await.unwrap();
        assert_eq!(catalog.categories(), vec!["jewelery"]);
    }

    #[test]
    fn test_lookups() {
        let catalog = Catalog::from_products(sample());

        let ids: Vec<u64> = catalog
            .in_category("men's clothing")
            .iter()
            .map(|p| p.id.0)
            .collect();
        assert_eq!(ids, vec![1, 4]);

        let ids: Vec<u64> = catalog.matching("ring").iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![2]);
    }

    #[test]
    fn test_categories_first_seen_order() {
        let catalog = Catalog::from_products(sample());
        assert_eq!(
            catalog.categories(),
            vec!["men's clothing", "jewelery", "electronics"]
        );
    }

    #[test]
    fn test_price_range() {
        let catalog = Catalog::from_products(sample());
        let range = catalog.price_range();
        assert_eq!(range.max, Decimal::from(695));
    }

    #[test]
    fn test_query_does_not_mutate_snapshot() {
        let catalog = Catalog::from_products(sample());
        let query = Query::new().sort_by(crate::query::SortKey::PriceAsc);
        let first: Vec<u64> = catalog.query(&query).iter().map(|p| p.id.0).collect();
        assert_eq!(first, vec![4, 1, 3, 2]);

        let order: Vec<u64> = catalog.products().iter().map(|p| p.id.0).collect();
        assert_eq!(order, vec![1, 2, 3, 4]);
    }
}
