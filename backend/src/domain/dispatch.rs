//! Dispatch facade: the single entry point for outbound delivery and
//! inbound push decoding.
//!
//! A deployment uses exactly one outbound backend, chosen once at startup.
//! The delay is validated before the backend is touched so a bad request
//! never reaches the broker.

use async_trait::async_trait;
use tracing::{error, info};

use super::ports::TransactionDispatch;
use super::{
    DecodedTransaction, DeferredTaskSubmitter, DeliveryDelay, DispatchError, TopicPublisher,
    Transaction, decode_inbound,
};

/// Identifier returned by a successful outbound dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchReceipt {
    /// Broker-assigned message id from a topic publish.
    MessageId(String),
    /// Queue-assigned task name from a task submission.
    TaskName(String),
}

impl DispatchReceipt {
    /// The identifier, whichever backend produced it.
    pub fn id(&self) -> &str {
        match self {
            Self::MessageId(id) | Self::TaskName(id) => id,
        }
    }
}

/// The outbound backend selected for this deployment.
#[derive(Clone)]
pub enum DispatchBackend {
    Topic(TopicPublisher),
    TaskQueue(DeferredTaskSubmitter),
}

impl DispatchBackend {
    fn label(&self) -> &'static str {
        match self {
            Self::Topic(_) => "topic",
            Self::TaskQueue(_) => "task_queue",
        }
    }
}

/// Domain service implementing [`TransactionDispatch`].
#[derive(Clone)]
pub struct DispatchService {
    backend: DispatchBackend,
}

impl DispatchService {
    /// Create a facade over the selected backend.
    pub fn new(backend: DispatchBackend) -> Self {
        Self { backend }
    }

    async fn send(
        &self,
        transaction: &Transaction,
        delay: DeliveryDelay,
    ) -> Result<DispatchReceipt, DispatchError> {
        match &self.backend {
            DispatchBackend::Topic(publisher) => publisher
                .publish(transaction, delay)
                .await
                .map(DispatchReceipt::MessageId),
            DispatchBackend::TaskQueue(submitter) => submitter
                .enqueue(transaction, delay)
                .await
                .map(DispatchReceipt::TaskName),
        }
    }
}

#[async_trait]
impl TransactionDispatch for DispatchService {
    async fn dispatch_outbound(
        &self,
        transaction: &Transaction,
        delay_seconds: i64,
    ) -> Result<DispatchReceipt, DispatchError> {
        let delay = DeliveryDelay::from_seconds(delay_seconds)?;
        let backend = self.backend.label();

        match self.send(transaction, delay).await {
            Ok(receipt) => {
                info!(
                    backend,
                    id = receipt.id(),
                    transaction_id = transaction.id,
                    "transaction dispatched"
                );
                Ok(receipt)
            }
            Err(err) => {
                error!(
                    backend,
                    transaction_id = transaction.id,
                    error = %err,
                    "transaction dispatch failed"
                );
                Err(err)
            }
        }
    }

    fn ingest_inbound(&self, body: &[u8]) -> Result<DecodedTransaction, DispatchError> {
        decode_inbound(body)
    }
}

#[cfg(test)]
mod tests {
    //! Behavioural coverage for backend selection and delay handling.

    use std::sync::Arc;

    use super::*;
    use crate::domain::ports::{MockMessageBroker, MockTaskQueue};
    use crate::domain::test_clock::fixed_clock;
    use crate::domain::{InboundSource, QueuePath};
    use chrono::{TimeDelta, Utc};
    use mockable::DefaultClock;
    use rstest::rstest;
    use url::Url;

    fn record() -> Transaction {
        Transaction {
            id: 1,
            amount: 100,
            ..Transaction::default()
        }
    }

    fn topic_service(broker: MockMessageBroker) -> DispatchService {
        let (clock, _) = fixed_clock();
        DispatchService::new(DispatchBackend::Topic(TopicPublisher::new(
            Arc::new(broker),
            "payments",
            clock,
        )))
    }

    fn queue_service(queue: MockTaskQueue, clock: Arc<dyn mockable::Clock>) -> DispatchService {
        let callback =
            Url::parse("https://relay.example.test/api/v1/transactions/poll").expect("valid url");
        DispatchService::new(DispatchBackend::TaskQueue(DeferredTaskSubmitter::new(
            Arc::new(queue),
            QueuePath::new("acme", "europe-west1", "settlements"),
            callback,
            clock,
        )))
    }

    #[rstest]
    #[case(-1)]
    #[case(-3600)]
    #[tokio::test]
    async fn negative_delay_never_reaches_the_broker(#[case] delay: i64) {
        let mut broker = MockMessageBroker::new();
        broker.expect_publish().times(0);
        let service = topic_service(broker);

        let error = service
            .dispatch_outbound(&record(), delay)
            .await
            .expect_err("negative delay must fail");
        assert!(matches!(error, DispatchError::InvalidDelay { .. }));
    }

    #[tokio::test]
    async fn negative_delay_never_reaches_the_queue() {
        let mut queue = MockTaskQueue::new();
        queue.expect_create_task().times(0);
        let (clock, _) = fixed_clock();
        let service = queue_service(queue, clock);

        let error = service
            .dispatch_outbound(&record(), -1)
            .await
            .expect_err("negative delay must fail");
        assert!(matches!(error, DispatchError::InvalidDelay { .. }));
    }

    #[tokio::test]
    async fn zero_delay_topic_dispatch_publishes_once_without_delivery_time() {
        let mut broker = MockMessageBroker::new();
        broker
            .expect_publish()
            .times(1)
            .withf(|request| request.deliver_at.is_none())
            .return_once(|_| Ok("msg-42".to_owned()));
        let service = topic_service(broker);

        let receipt = service
            .dispatch_outbound(&record(), 0)
            .await
            .expect("dispatch");
        assert_eq!(receipt, DispatchReceipt::MessageId("msg-42".to_owned()));
        assert_eq!(receipt.id(), "msg-42");
    }

    #[tokio::test]
    async fn delayed_task_dispatch_schedules_about_thirty_seconds_ahead() {
        let started = Utc::now();
        let mut queue = MockTaskQueue::new();
        queue
            .expect_create_task()
            .times(1)
            .withf(move |request| {
                let offset = request.schedule_time - started;
                offset >= TimeDelta::seconds(29) && offset <= TimeDelta::seconds(31)
            })
            .return_once(|_| Ok("tasks/7".to_owned()));
        let service = queue_service(queue, Arc::new(DefaultClock));

        let receipt = service
            .dispatch_outbound(&record(), 30)
            .await
            .expect("dispatch");
        assert_eq!(receipt, DispatchReceipt::TaskName("tasks/7".to_owned()));
    }

    #[tokio::test]
    async fn backend_failures_propagate_unchanged() {
        let mut queue = MockTaskQueue::new();
        queue.expect_create_task().times(1).return_once(|_| {
            Err(crate::domain::ports::TaskQueueError::connection("no route to host"))
        });
        let (clock, _) = fixed_clock();
        let service = queue_service(queue, clock);

        let error = service
            .dispatch_outbound(&record(), 5)
            .await
            .expect_err("queue failure");
        assert!(matches!(error, DispatchError::QueueConnection { .. }));
    }

    #[test]
    fn ingest_routes_bodies_through_the_decoder() {
        let service = topic_service(MockMessageBroker::new());
        let decoded = service
            .ingest_inbound(br#"{"message":{"data":"eyJpZCI6MSwiYW1vdW50IjoxMDB9"}}"#)
            .expect("decode");
        assert_eq!(decoded.transaction, record());
        assert!(matches!(decoded.source, InboundSource::Envelope(_)));

        let error = service
            .ingest_inbound(br#"{"message":{"data":""}}"#)
            .expect_err("empty envelope");
        assert_eq!(error, DispatchError::empty_payload());
    }
}
