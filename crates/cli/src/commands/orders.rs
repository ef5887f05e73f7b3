//! Order ledger inspection.
//!
//! # Usage
//!
//! ```bash
//! nb-cli orders
//! nb-cli orders --username anna
//! nb-cli orders --path /var/lib/nutribook/orders.json --json
//! ```

use std::path::PathBuf;

use nutribook_core::{Order, Price};
use nutribook_storefront::services::OrderLedger;

use super::CliError;

fn ledger_path(explicit: Option<PathBuf>) -> PathBuf {
    explicit
        .or_else(|| std::env::var_os("STOREFRONT_ORDERS_PATH").map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("orders.json"))
}

/// One human-readable line per order.
fn format_order(order: &Order) -> String {
    format!(
        "{:<20} {:>12}  {}",
        order.username,
        order.total.to_string(),
        order.products.join(", ")
    )
}

/// Load the ledger and keep the records for `username` (all when `None`).
async fn select(ledger: &OrderLedger, username: Option<&str>) -> Vec<Order> {
    match username {
        Some(username) => ledger.orders_for(username).await,
        None => ledger.load().await,
    }
}

/// Print ledger records to stdout.
///
/// # Errors
///
/// Returns `CliError::Json` if `--json` output cannot be serialized.
#[allow(clippy::print_stdout)]
pub async fn print(
    path: Option<PathBuf>,
    username: Option<&str>,
    json: bool,
) -> Result<(), CliError> {
    let ledger = OrderLedger::new(ledger_path(path));
    let orders = select(&ledger, username).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&orders)?);
        return Ok(());
    }

    if orders.is_empty() {
        println!("No orders in {}", ledger.path().display());
        return Ok(());
    }

    for order in &orders {
        println!("{}", format_order(order));
    }
    let revenue: Price = orders.iter().map(|o| o.total).sum();
    println!("{} order(s), {revenue} total", orders.len());
    Ok(())
}
