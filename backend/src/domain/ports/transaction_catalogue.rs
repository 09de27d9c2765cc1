//! Driven port for read-only lookup of sample transactions.

use async_trait::async_trait;

use crate::domain::{Error, Transaction};

/// Read-only source of transactions used to manufacture outbound payloads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionCatalogue: Send + Sync {
    /// Every known transaction, in catalogue order.
    async fn list(&self) -> Result<Vec<Transaction>, Error>;

    /// The transaction with `id`, if present.
    async fn find(&self, id: i64) -> Result<Option<Transaction>, Error>;

    /// One transaction chosen uniformly at random, or `None` when empty.
    async fn sample(&self) -> Result<Option<Transaction>, Error>;
}
