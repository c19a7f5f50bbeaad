use thiserror::Error;

use crate::models::ProductId;

/// Everything the storefront can report back to a caller
///
/// Transport problems all collapse into `Unavailable`; the caller's only
/// recovery is to query again.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),

    #[error("Product not found: {0}")]
    NotFound(ProductId),

    #[error("Invalid cart: {0}")]
    InvalidCart(String),

    #[error("Unknown sort key: {0}")]
    InvalidSortKey(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl Error {
    /// True for failures that a fresh fetch might fix
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Unavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_unavailable_is_transient() {
        assert!(Error::Unavailable("timeout".into()).is_transient());
        assert!(!Error::NotFound(ProductId(3)).is_transient());
        assert!(!Error::InvalidSortKey("cheapest".into()).is_transient());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            Error::NotFound(ProductId(42)).to_string(),
            "Product not found: 42"
        );
        assert_eq!(
            Error::InvalidSortKey("cheapest".into()).to_string(),
            "Unknown sort key: cheapest"
        );
    }
}
