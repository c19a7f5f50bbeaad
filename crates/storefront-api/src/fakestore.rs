use std::time::Duration;

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const FAKESTORE_API_BASE: &str = "https://fakestoreapi.com";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    ParseError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// HTTP client for a Fake Store compatible catalog
pub struct CatalogClient {
    client: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(FAKESTORE_API_BASE)
    }

    /// Point the client at another deployment of the same API
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        Self::with_options(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_options(base_url: &str, timeout: Duration) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            reqwest::header::USER_AGENT,
            reqwest::header::HeaderValue::from_static("Storefront/0.1.0"),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET /products
    pub async fn get_products(&self) -> Result<Vec<ApiProduct>> {
        self.get_json(&self.products_url(), "products").await
    }

    /// GET /products/{id}
    pub async fn get_product(&self, id: u64) -> Result<ApiProduct> {
        self.get_json(&self.product_url(id), &format!("product {}", id))
            .await
    }

    /// GET /products/category/{name}
    pub async fn get_products_in_category(&self, category: &str) -> Result<Vec<ApiProduct>> {
        self.get_json(&self.category_url(category), &format!("category {}", category))
            .await
    }

    /// GET /products/categories
    pub async fn get_categories(&self) -> Result<Vec<String>> {
        let url = format!("{}/products/categories", self.base_url);
        self.get_json(&url, "categories").await
    }

    fn products_url(&self) -> String {
        format!("{}/products", self.base_url)
    }

    fn product_url(&self, id: u64) -> String {
        format!("{}/products/{}", self.base_url, id)
    }

    fn category_url(&self, category: &str) -> String {
        format!(
            "{}/products/category/{}",
            self.base_url,
            urlencoding::encode(category)
        )
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str, what: &str) -> Result<T> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;

        if response.status() == 404 {
            return Err(CatalogError::NotFound(what.to_string()));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::RequestFailed(format!(
                "Status {}: {}",
                status, body
            )));
        }

        let body = response.text().await?;
        decode_body(&body, what)
    }
}

/// The API answers unknown ids with 200 and an empty body, so emptiness means not found
fn decode_body<T: DeserializeOwned>(body: &str, what: &str) -> Result<T> {
    if body.trim().is_empty() || body.trim() == "null" {
        return Err(CatalogError::NotFound(what.to_string()));
    }
    Ok(serde_json::from_str(body)?)
}

/// Product as the catalog API returns it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiProduct {
    pub id: u64,
    pub title: String,
    pub price: Decimal,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub rating: Option<ApiRating>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ApiRating {
    pub rate: f64,
    #[serde(default)]
    pub count: u32,
}
