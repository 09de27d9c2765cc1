//! In-memory transaction catalogue seeded with fixture records.

use std::sync::Arc;

use async_trait::async_trait;
use rand::seq::SliceRandom;

use crate::domain::ports::TransactionCatalogue;
use crate::domain::{Direction, Error, Transaction};

/// Catalogue built once at startup and shared immutably between workers.
///
/// # Examples
/// ```
/// use relay::domain::ports::TransactionCatalogue;
/// use relay::outbound::catalogue::FixtureTransactionCatalogue;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let catalogue = FixtureTransactionCatalogue::default();
/// let found = catalogue.find(2).await.expect("lookup");
/// assert_eq!(found.map(|tx| tx.amount), Some(200));
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct FixtureTransactionCatalogue {
    transactions: Arc<[Transaction]>,
}

impl FixtureTransactionCatalogue {
    /// Build a catalogue over the supplied transactions.
    pub fn new(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: transactions.into(),
        }
    }
}

impl Default for FixtureTransactionCatalogue {
    fn default() -> Self {
        Self::new(vec![
            pending(1, Direction::Inbound, 100, "John Doe", "1234567890"),
            pending(2, Direction::Outbound, 200, "Jane Doe", "1234567764"),
            pending(3, Direction::Inbound, 300, "Jason Deen", "1234567123"),
        ])
    }
}

fn pending(
    id: i64,
    direction: Direction,
    amount: i64,
    account_name: &str,
    account_number: &str,
) -> Transaction {
    Transaction {
        id,
        direction: Some(direction),
        amount,
        account_name: account_name.to_owned(),
        account_number: Some(account_number.to_owned()),
        status: Some("pending".to_owned()),
        reference: account_number.to_owned(),
        ..Transaction::default()
    }
}

#[async_trait]
impl TransactionCatalogue for FixtureTransactionCatalogue {
    async fn list(&self) -> Result<Vec<Transaction>, Error> {
        Ok(self.transactions.to_vec())
    }

    async fn find(&self, id: i64) -> Result<Option<Transaction>, Error> {
        Ok(self.transactions.iter().find(|tx| tx.id == id).cloned())
    }

    async fn sample(&self) -> Result<Option<Transaction>, Error> {
        Ok(self.transactions.choose(&mut rand::thread_rng()).cloned())
    }
}
