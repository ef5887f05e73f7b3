//! Cart and checkout through the HTTP surface.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use nutribook_core::Price;
use nutribook_integration_tests::TestApp;

#[tokio::test]
async fn test_shop_lists_catalog_for_guests() {
    let mut app = TestApp::new().await;

    let res = app.get("/shop").await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(res.body.contains("E-Book: Break Up With Sugar"));
    assert!(res.body.contains("Follow-up Consultation"));
    assert!(res.body.contains("/add_to_cart/5"));
}

#[tokio::test]
async fn test_checkout_writes_one_ledger_record_and_empties_cart() {
    let mut app = TestApp::new().await;
    app.register_and_login("anna").await;

    assert_eq!(app.get("/add_to_cart/1").await.redirect_target(), "/shop");
    assert_eq!(app.get("/add_to_cart/2").await.redirect_target(), "/shop");
    assert_eq!(app.get("/add_to_cart/5").await.redirect_target(), "/shop");

    let cart = app.get("/cart").await;
    assert_eq!(cart.status, StatusCode::OK);
    assert!(cart.body.contains("240.00 PLN"));

    let res = app.get("/checkout").await;
    assert_eq!(res.redirect_target(), "/");

    let ledger = app.ledger();
    assert_eq!(ledger.len(), 1);
    let order = ledger.first().unwrap();
    assert_eq!(order.username, "anna");
    assert_eq!(
        order.products,
        [
            "E-Book: Break Up With Sugar",
            "E-Book: 12 Affirmations",
            "Follow-up Consultation"
        ]
    );
    assert_eq!(order.total, Price::from_minor(24_000));

    let home = app.get("/").await;
    assert!(home.body.contains("Order submitted!"));

    let cart = app.get("/cart").await;
    assert!(cart.body.contains("Your cart is empty."));
}

#[tokio::test]
async fn test_empty_checkout_redirects_to_shop_without_writing() {
    let mut app = TestApp::new().await;
    app.register_and_login("anna").await;

    let res = app.get("/checkout").await;
    assert_eq!(res.redirect_target(), "/shop");
    assert!(!app.ledger_exists());

    let shop = app.get("/shop").await;
    assert!(shop.body.contains("Your cart is empty!"));
}

#[tokio::test]
async fn test_unknown_product_is_reported_and_cart_unchanged() {
    let mut app = TestApp::new().await;
    app.register_and_login("anna").await;

    let res = app.get("/add_to_cart/99").await;
    assert_eq!(res.redirect_target(), "/shop");

    let shop = app.get("/shop").await;
    assert!(shop.body.contains("That product does not exist."));
    assert!(shop.body.contains("Cart (0)"));
}

#[tokio::test]
async fn test_remove_from_cart_by_position() {
    let mut app = TestApp::new().await;
    app.register_and_login("anna").await;
    app.get("/add_to_cart/3").await;
    app.get("/add_to_cart/4").await;

    // Out of range: nothing changes.
    assert_eq!(app.get("/remove_from_cart/5").await.redirect_target(), "/cart");
    let cart = app.get("/cart").await;
    assert!(cart.body.contains("300.00 PLN"));

    assert_eq!(app.get("/remove_from_cart/0").await.redirect_target(), "/cart");
    let cart = app.get("/cart").await;
    assert!(cart.body.contains("from the cart."));

    // Second render has no flash left mentioning the removed line.
    let cart = app.get("/cart").await;
    assert!(!cart.body.contains("Meal Plan 1200 kcal"));
    assert!(cart.body.contains("Diagnostic Consultation"));
    assert!(cart.body.contains("260.00 PLN"));
}

#[tokio::test]
async fn test_account_lists_only_own_orders() {
    let mut anna = TestApp::new().await;
    anna.register_and_login("anna").await;
    anna.get("/add_to_cart/1").await;
    anna.get("/checkout").await;

    let mut bob = anna.fresh_browser();
    bob.register_and_login("bob").await;
    bob.get("/add_to_cart/4").await;
    bob.get("/checkout").await;

    assert_eq!(anna.ledger().len(), 2);

    let page = anna.get("/account").await;
    assert_eq!(page.status, StatusCode::OK);
    assert!(page.body.contains("E-Book: Break Up With Sugar"));
    assert!(!page.body.contains("Diagnostic Consultation"));
}

#[tokio::test]
async fn test_oversized_product_id_is_an_unknown_product() {
    let mut app = TestApp::new().await;
    app.register_and_login("anna").await;

    let res = app.get("/add_to_cart/99999999999999999999").await;
    assert_eq!(res.redirect_target(), "/shop");

    let shop = app.get("/shop").await;
    assert!(shop.body.contains("That product does not exist."));
    assert!(shop.body.contains("Cart (0)"));
}

#[tokio::test]
async fn test_oversized_cart_index_changes_nothing() {
    let mut app = TestApp::new().await;
    app.register_and_login("anna").await;
    app.get("/add_to_cart/3").await;
    app.get("/add_to_cart/4").await;

    let res = app.get("/remove_from_cart/18446744073709551616").await;
    assert_eq!(res.redirect_target(), "/cart");
    let res = app.get("/remove_from_cart/-1").await;
    assert_eq!(res.redirect_target(), "/cart");

    let cart = app.get("/cart").await;
    assert!(cart.body.contains("300.00 PLN"));
}
