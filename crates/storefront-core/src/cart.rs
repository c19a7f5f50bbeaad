use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    models::{Product, ProductId},
    Error,
};

/// A product and how many of it are in the cart. Quantity is never zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// Saturates at `Decimal::MAX` instead of overflowing
    pub fn subtotal(&self) -> Decimal {
        self.product.price.saturating_mul(Decimal::from(self.quantity))
    }
}

/// Session shopping cart
///
/// Lines keep the order in which products were first added. The cart is a
/// plain value: whoever holds `&mut Cart` is the only writer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit, merging with an existing line for the same product
    pub fn add(&mut self, product: &Product) {
        self.add_quantity(product, 1);
    }

    /// Add `quantity` units at once; zero does nothing
    pub fn add_quantity(&mut self, product: &Product, quantity: u32) {
        if quantity == 0 {
            return;
        }

        match self.position(product.id) {
            Some(idx) => {
                let line = &mut self.lines[idx];
                line.quantity = line.quantity.saturating_add(quantity);
                debug!("cart: {} now x{}", product.id, line.quantity);
            }
            None => {
                self.lines.push(CartLine {
                    product: product.clone(),
                    quantity,
                });
                debug!("cart: added {} x{}", product.id, quantity);
            }
        }
    }

    pub fn remove(&mut self, id: ProductId) {
        if let Some(idx) = self.position(id) {
            self.lines.remove(idx);
            debug!("cart: removed {}", id);
        }
    }

    /// Set a line's quantity. Zero or negative removes the line; unknown ids are ignored.
    pub fn set_quantity(&mut self, id: ProductId, quantity: i64) {
        let Some(idx) = self.position(id) else {
            return;
        };

        if quantity <= 0 {
            self.lines.remove(idx);
            debug!("cart: removed {} (quantity {})", id, quantity);
            return;
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        self.lines[idx].quantity = quantity;
        debug!("cart: {} set to x{}", id, quantity);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn get(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product.id == id)
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct products
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn total(&self) -> Decimal {
        self.lines
            .iter()
            .map(CartLine::subtotal)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    fn position(&self, id: ProductId) -> Option<usize> {
        self.lines.iter().position(|line| line.product.id == id)
    }
}

/// Deserialized carts must hold the same invariants as built ones
impl TryFrom<Vec<CartLine>> for Cart {
    type Error = Error;

    fn try_from(lines: Vec<CartLine>) -> Result<Self, Self::Error> {
        for (idx, line) in lines.iter().enumerate() {
            if line.quantity == 0 {
                return Err(Error::InvalidCart(format!(
                    "product {} has quantity 0",
                    line.product.id
                )));
            }
            if lines[..idx].iter().any(|l| l.product.id == line.product.id) {
                return Err(Error::InvalidCart(format!(
                    "product {} appears more than once",
                    line.product.id
                )));
            }
        }

        Ok(Self { lines })
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}
