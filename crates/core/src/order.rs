//! Order ledger records.
//!
//! An order is a denormalized snapshot of a checkout: who bought, what they
//! bought (by name), and what it cost. Orders carry no ID and no timestamp.

use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::types::Price;

/// One completed checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub username: String,
    pub products: Vec<String>,
    pub total: Price,
}

impl Order {
    /// Snapshot a cart for `username`.
    #[must_use]
    pub fn from_cart(username: &str, cart: &Cart) -> Self {
        Self {
            username: username.to_owned(),
            products: cart.item_names(),
            total: cart.total(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::cart::CartItem;
    use crate::catalog::find_product;
    use crate::types::ProductId;

    #[test]
    fn test_from_cart_snapshots_names_and_total() {
        let mut cart = Cart::new();
        cart.add(CartItem::from(find_product(ProductId::new(1)).unwrap()));
        cart.add(CartItem::from(find_product(ProductId::new(2)).unwrap()));

        let order = Order::from_cart("anna", &cart);
        assert_eq!(order.username, "anna");
        assert_eq!(
            order.products,
            vec!["E-Book: Break Up With Sugar", "E-Book: 12 Affirmations"]
        );
        assert_eq!(order.total, Price::from_minor(2000));
    }

    #[test]
    fn test_json_shape() {
        let order = Order {
            username: "anna".to_owned(),
            products: vec!["Follow-up Consultation".to_owned()],
            total: Price::from_minor(22000),
        };
        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "username": "anna",
                "products": ["Follow-up Consultation"],
                "total": "220.00"
            })
        );
    }
}
