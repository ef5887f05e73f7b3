//! Append-only JSON file of completed orders.
//!
//! The file holds a single JSON array. Appending reads the whole array, pushes
//! the record and rewrites the file. Entries that do not decode as an
//! [`Order`] are kept on disk untouched and skipped when reading. Nothing
//! locks the file between the read and the write, so of two concurrent
//! checkouts the later write wins and the other record is lost.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use nutribook_core::Order;

/// Errors that can occur while writing the ledger.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Reading or writing the file failed.
    #[error("ledger I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the records failed.
    #[error("ledger serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Handle to the order ledger file.
#[derive(Debug, Clone)]
pub struct OrderLedger {
    path: PathBuf,
}

impl OrderLedger {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw entries of the array on disk.
    ///
    /// A missing file, content that does not parse as JSON, or a JSON value
    /// that is not an array all count as an empty ledger.
    async fn entries(&self) -> Result<Vec<Value>, std::io::Error> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e),
        };

        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Array(entries)) => Ok(entries),
            Ok(_) => {
                warn!(path = %self.path.display(), "Order ledger is not a JSON array, treating as empty");
                Ok(Vec::new())
            }
            Err(e) => {
                warn!(path = %self.path.display(), "Order ledger is not valid JSON, treating as empty: {e}");
                Ok(Vec::new())
            }
        }
    }

    /// Read every record that decodes as an [`Order`].
    ///
    /// An unreadable file reads as an empty ledger.
    pub async fn load(&self) -> Vec<Order> {
        let entries = self.entries().await.unwrap_or_else(|e| {
            warn!(path = %self.path.display(), "Could not read order ledger: {e}");
            Vec::new()
        });

        entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                serde_json::from_value(entry)
                    .map_err(|e| warn!(index, "Skipping ledger entry: {e}"))
                    .ok()
            })
            .collect()
    }

    /// Append one record and rewrite the file, keeping every existing entry.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Io` if the existing file cannot be read or the
    /// new content cannot be written.
    pub async fn append(&self, order: Order) -> Result<(), LedgerError> {
        let mut entries = self.entries().await?;
        entries.push(serde_json::to_value(order)?);

        let json = serde_json::to_vec_pretty(&entries)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }

    /// Records filed under a username, in ledger order.
    pub async fn orders_for(&self, username: &str) -> Vec<Order> {
        self.load()
            .await
            .into_iter()
            .filter(|order| order.username == username)
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use nutribook_core::{Cart, CartItem, ProductId, find_product};

    use super::*;

    fn order(username: &str, product_ids: &[i64]) -> Order {
        let cart: Cart = product_ids
            .iter()
            .map(|&id| CartItem::from(find_product(ProductId::new(id)).unwrap()))
            .collect();
        Order::from_cart(username, &cart)
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = OrderLedger::new(dir.path().join("orders.json"));
        assert!(ledger.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_append_accumulates_records() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = OrderLedger::new(dir.path().join("orders.json"));

        ledger.append(order("anna", &[1, 2])).await.unwrap();
        ledger.append(order("bob", &[5])).await.unwrap();

        let all = ledger.load().await;
        assert_eq!(all.len(), 2);
        assert_eq!(all.first().unwrap().products.len(), 2);

        let raw: serde_json::Value =
            serde_json::from_slice(&std::fs::read(ledger.path()).unwrap()).unwrap();
        assert_eq!(raw[1]["username"], "bob");
        assert_eq!(raw[1]["total"], "220.00");
    }

    #[tokio::test]
    async fn test_corrupt_file_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.json");
        std::fs::write(&path, "{not json").unwrap();
        let ledger = OrderLedger::new(&path);

        assert!(ledger.load().await.is_empty());
        ledger.append(order("anna", &[3])).await.unwrap();
        assert_eq!(ledger.load().await.len(), 1);
    }

    #[tokio::test]
    async fn test_orders_for_filters_by_username() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = OrderLedger::new(dir.path().join("orders.json"));
        ledger.append(order("anna", &[1])).await.unwrap();
        ledger.append(order("bob", &[2])).await.unwrap();
        ledger.append(order("anna", &[4])).await.unwrap();

        let mine = ledger.orders_for("anna").await;
        assert_eq!(mine.len(), 2);
        assert!(mine.iter().all(|o| o.username == "anna"));
        assert!(ledger.orders_for("carol").await.is_empty());
    }

    #[tokio::test]
    async fn test_append_keeps_entries_it_cannot_decode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.json");
        std::fs::write(
            &path,
            r#"[
                {"username": "anna", "products": ["A"], "total": "20.00"},
                {"username": "bob", "products": ["B"], "total": "40.00", "note": "x"},
                {"username": "carol", "products": ["C"]}
            ]"#,
        )
        .unwrap();
        let ledger = OrderLedger::new(&path);

        ledger.append(order("dave", &[5])).await.unwrap();

        let raw: Vec<serde_json::Value> =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        let names: Vec<_> = raw.iter().map(|e| e["username"].as_str().unwrap()).collect();
        assert_eq!(names, ["anna", "bob", "carol", "dave"]);
        assert_eq!(raw[1]["note"], "x");

        let decoded: Vec<_> = ledger.load().await.into_iter().map(|o| o.username).collect();
        assert_eq!(decoded, ["anna", "bob", "dave"]);
    }

    #[tokio::test]
    async fn test_non_array_json_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.json");
        std::fs::write(&path, r#"{"username": "anna"}"#).unwrap();
        let ledger = OrderLedger::new(&path);

        assert!(ledger.load().await.is_empty());
        ledger.append(order("anna", &[1])).await.unwrap();
        assert_eq!(ledger.load().await.len(), 1);
    }
}
