//! Session cart model.
//!
//! A cart is an ordered list of line items. There is no quantity field:
//! adding the same product twice yields two lines. The cart is stored in the
//! session as plain JSON, so line items carry only `(id, name, price)`.

use serde::{Deserialize, Serialize};

use crate::catalog::Product;
use crate::types::{Price, ProductId};

/// A single cart line, projected from a [`Product`] without its image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
}

impl From<&Product> for CartItem {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            name: product.name.to_owned(),
            price: product.price,
        }
    }
}

/// Ordered collection of cart lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append a line to the end of the cart.
    pub fn add(&mut self, item: CartItem) {
        self.items.push(item);
    }

    /// Remove the line at `index`.
    ///
    /// Returns the removed line, or `None` (leaving the cart untouched) when
    /// the index is out of range.
    pub fn remove(&mut self, index: usize) -> Option<CartItem> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    /// Sum of all line prices; zero for an empty cart.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(|item| item.price).sum()
    }

    /// Names of all lines, in cart order.
    #[must_use]
    pub fn item_names(&self) -> Vec<String> {
        self.items.iter().map(|item| item.name.clone()).collect()
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<CartItem> for Cart {
    fn from_iter<I: IntoIterator<Item = CartItem>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::catalog::{catalog, find_product};

    fn item(id: i64, minor: i64) -> CartItem {
        CartItem {
            id: ProductId::new(id),
            name: format!("product {id}"),
            price: Price::from_minor(minor),
        }
    }

    #[test]
    fn test_empty_cart_total_is_zero() {
        assert_eq!(Cart::new().total(), Price::ZERO);
    }

    #[test]
    fn test_total_is_sum_of_lines() {
        let cart: Cart = [item(1, 2000), item(3, 4000), item(4, 26000)]
            .into_iter()
            .collect();
        assert_eq!(cart.total(), Price::from_minor(32000));
    }

    #[test]
    fn test_free_item_does_not_change_total() {
        let mut cart = Cart::new();
        cart.add(item(1, 2000));
        let before = cart.total();
        cart.add(item(2, 0));
        assert_eq!(cart.total(), before);
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn test_same_product_twice_gives_two_lines() {
        let product = find_product(ProductId::new(1)).unwrap();
        let mut cart = Cart::new();
        cart.add(CartItem::from(product));
        cart.add(CartItem::from(product));
        assert_eq!(cart.len(), 2);
        assert_eq!(cart.total(), Price::from_minor(4000));
    }

    #[test]
    fn test_remove_by_position() {
        let mut cart: Cart = [item(1, 100), item(2, 200), item(3, 300)]
            .into_iter()
            .collect();
        let removed = cart.remove(1).unwrap();
        assert_eq!(removed.id, ProductId::new(2));
        assert_eq!(cart.item_names(), vec!["product 1", "product 3"]);
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut cart: Cart = [item(1, 100)].into_iter().collect();
        let before = cart.clone();
        assert!(cart.remove(1).is_none());
        assert!(cart.remove(usize::MAX).is_none());
        assert_eq!(cart, before);
    }

    #[test]
    fn test_cart_item_drops_image() {
        let product = catalog().first().unwrap();
        let json = serde_json::to_value(CartItem::from(product)).unwrap();
        assert!(json.get("image_url").is_none());
        assert_eq!(json["name"], product.name);
    }

    #[test]
    fn test_session_json_is_plain_list() {
        let cart: Cart = [item(5, 22000)].into_iter().collect();
        let json = serde_json::to_string(&cart).unwrap();
        assert_eq!(json, r#"[{"id":5,"name":"product 5","price":"220.00"}]"#);
        let back: Cart = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cart);
    }
}
