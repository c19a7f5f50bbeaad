use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Catalog-assigned product identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        ProductId(id)
    }
}

/// A catalog item. Read-only once fetched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: Decimal,
    pub category: String,
    pub description: String,
    /// Image URI
    pub image: String,
    pub rating: Option<Rating>,
}

impl Product {
    /// Average rating, with a missing rating counting as zero
    pub fn rate(&self) -> f64 {
        self.rating.map(|r| r.rate).unwrap_or(0.0)
    }

    pub fn stars(&self) -> StarBreakdown {
        StarBreakdown::from_rate(self.rate())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub rate: f64,
    pub count: u32,
}

/// How a rating splits into full, half and empty stars out of five
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarBreakdown {
    pub full: u8,
    pub half: u8,
    pub empty: u8,
}

impl StarBreakdown {
    pub const MAX_STARS: u8 = 5;

    pub fn from_rate(rate: f64) -> Self {
        let rate = if rate.is_finite() {
            rate.clamp(0.0, Self::MAX_STARS as f64)
        } else {
            0.0
        };

        let full = rate.floor() as u8;
        let half = u8::from(rate.fract() != 0.0);
        let empty = Self::MAX_STARS - rate.ceil() as u8;

        Self { full, half, empty }
    }

    /// Render as a compact star string, e.g. "★★★½☆"
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(Self::MAX_STARS as usize * 3);
        out.extend(std::iter::repeat('★').take(self.full as usize));
        out.extend(std::iter::repeat('½').take(self.half as usize));
        out.extend(std::iter::repeat('☆').take(self.empty as usize));
        out
    }
}

/// Inclusive price bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Decimal,
    pub max: Decimal,
}

impl PriceRange {
    pub fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    /// Default filter for a listing: zero up to the highest price rounded up
    pub fn covering<'a>(products: impl IntoIterator<Item = &'a Product>) -> Self {
        let max = products
            .into_iter()
            .map(|p| p.price)
            .max()
            .map(|p| p.ceil())
            .unwrap_or(Decimal::ZERO);

        Self {
            min: Decimal::ZERO,
            max,
        }
    }

    pub fn contains(&self, price: Decimal) -> bool {
        price >= self.min && price <= self.max
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn product(id: u64, title: &str, price: Decimal, category: &str) -> Product {
        Product {
            id: ProductId(id),
            title: title.to_string(),
            price,
            category: category.to_string(),
            description: String::new(),
            image: format!("https://fakestoreapi.com/img/{}.jpg", id),
            rating: None,
        }
    }

    pub fn rated(mut product: Product, rate: f64, count: u32) -> Product {
        product.rating = Some(Rating { rate, count });
        product
    }
}
