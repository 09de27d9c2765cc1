//! Driving port used by inbound adapters to dispatch and ingest transactions.

use async_trait::async_trait;

use crate::domain::{DecodedTransaction, DispatchError, DispatchReceipt, Transaction};

/// Single entry point for outbound dispatch and inbound ingestion.
///
/// Implementations route outbound calls to whichever delivery backend the
/// deployment selected and route every inbound body through the push
/// decoder. They perform no business validation on field values.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TransactionDispatch: Send + Sync {
    /// Dispatch `transaction` for delivery after `delay_seconds`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::InvalidDelay`] for a negative delay before
    /// any downstream call, or the backend's own failure otherwise.
    async fn dispatch_outbound(
        &self,
        transaction: &Transaction,
        delay_seconds: i64,
    ) -> Result<DispatchReceipt, DispatchError>;

    /// Decode an inbound push body.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::Decode`] or [`DispatchError::EmptyPayload`].
    fn ingest_inbound(&self, body: &[u8]) -> Result<DecodedTransaction, DispatchError>;
}
