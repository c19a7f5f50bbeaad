// Filtering and ordering over an already-fetched product list
use std::str::FromStr;

use rust_decimal::Decimal;

use crate::{models::Product, Error};

/// How a listing is ordered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Keep the catalog's order
    #[default]
    Default,
    PriceAsc,
    PriceDesc,
    RatingDesc,
    NameAsc,
    /// Title matches first, everything else after
    Relevance,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Default => "default",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::RatingDesc => "rating-desc",
            SortKey::NameAsc => "name-asc",
            SortKey::Relevance => "relevance",
        }
    }

    pub fn all() -> [SortKey; 6] {
        [
            SortKey::Default,
            SortKey::PriceAsc,
            SortKey::PriceDesc,
            SortKey::RatingDesc,
            SortKey::NameAsc,
            SortKey::Relevance,
        ]
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // The short names are what the storefront's sort dropdown sends
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "default" => Ok(SortKey::Default),
            "price-asc" | "price-low" => Ok(SortKey::PriceAsc),
            "price-desc" | "price-high" => Ok(SortKey::PriceDesc),
            "rating-desc" | "rating" => Ok(SortKey::RatingDesc),
            "name-asc" | "name" => Ok(SortKey::NameAsc),
            "relevance" => Ok(SortKey::Relevance),
            _ => Err(Error::InvalidSortKey(s.to_string())),
        }
    }
}

/// Listing parameters: text, category, price bounds and ordering
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    pub text: String,
    pub category: Option<String>,
    pub price_min: Option<Decimal>,
    pub price_max: Option<Decimal>,
    pub sort_key: SortKey,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn price_between(mut self, min: Option<Decimal>, max: Option<Decimal>) -> Self {
        self.price_min = min;
        self.price_max = max;
        self
    }

    pub fn sort_by(mut self, sort_key: SortKey) -> Self {
        self.sort_key = sort_key;
        self
    }

    /// Lowercased, trimmed search text; `None` when there is nothing to match
    fn needle(&self) -> Option<String> {
        let text = self.text.trim();
        if text.is_empty() {
            None
        } else {
            Some(text.to_lowercase())
        }
    }

    /// Does the product pass every filter in this query?
    pub fn matches(&self, product: &Product) -> bool {
        self.matches_with(product, self.needle().as_deref())
    }

    fn matches_with(&self, product: &Product, needle: Option<&str>) -> bool {
        if let Some(category) = &self.category {
            if !product.category.eq_ignore_ascii_case(category.trim()) {
                return false;
            }
        }

        if let Some(min) = self.price_min {
            if product.price < min {
                return false;
            }
        }

        if let Some(max) = self.price_max {
            if product.price > max {
                return false;
            }
        }

        match needle {
            Some(needle) => text_matches(product, needle),
            None => true,
        }
    }
}

fn text_matches(product: &Product, needle: &str) -> bool {
    product.title.to_lowercase().contains(needle)
        || product.description.to_lowercase().contains(needle)
        || product.category.to_lowercase().contains(needle)
}

/// Filter then sort. Pure: the same input always yields the same view.
pub fn apply<'a, I>(products: I, query: &Query) -> Vec<&'a Product>
where
    I: IntoIterator<Item = &'a Product>,
{
    let needle = query.needle();
    let mut view: Vec<&Product> = products
        .into_iter()
        .filter(|p| query.matches_with(p, needle.as_deref()))
        .collect();

    sort(&mut view, query.sort_key, needle.as_deref());
    view
}

/// Stable in-place sort; ties keep their incoming order
pub fn sort(view: &mut [&Product], key: SortKey, needle: Option<&str>) {
    match key {
        SortKey::Default => {}
        SortKey::PriceAsc => view.sort_by(|a, b| a.price.cmp(&b.price)),
        SortKey::PriceDesc => view.sort_by(|a, b| b.price.cmp(&a.price)),
        SortKey::RatingDesc => view.sort_by(|a, b| b.rate().total_cmp(&a.rate())),
        SortKey::NameAsc => view.sort_by_cached_key(|p| p.title.to_lowercase()),
        SortKey::Relevance => {
            if let Some(needle) = needle {
                // false sorts before true, so negate to put title hits first
                view.sort_by_cached_key(|p| !p.title.to_lowercase().contains(needle));
            }
        }
    }
}
