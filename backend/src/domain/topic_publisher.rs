//! Publishes transactions straight to a broker topic.

use std::sync::Arc;

use mockable::Clock;
use tracing::info;

use super::ports::{MessageBroker, PublishRequest};
use super::{DeliveryDelay, DispatchError, TopicName, Transaction};

/// Serialises a transaction and publishes it to one topic.
///
/// A delivery time is attached only for a positive delay. The call waits
/// for the broker acknowledgement and is not retried here.
#[derive(Clone)]
pub struct TopicPublisher {
    broker: Arc<dyn MessageBroker>,
    topic: TopicName,
    clock: Arc<dyn Clock>,
}

impl TopicPublisher {
    /// Build a publisher for `topic`, which may be bare or fully qualified.
    /// ```rust,no_run
    /// # use std::sync::Arc;
    /// # use mockable::DefaultClock;
    /// # use relay::domain::TopicPublisher;
    /// # fn broker() -> Arc<dyn relay::domain::ports::MessageBroker> { unimplemented!() }
    /// let publisher =
    ///     TopicPublisher::new(broker(), "projects/acme/topics/payments", Arc::new(DefaultClock));
    /// assert_eq!(publisher.topic().as_str(), "payments");
    /// ```
    pub fn new(broker: Arc<dyn MessageBroker>, topic: &str, clock: Arc<dyn Clock>) -> Self {
        Self {
            broker,
            topic: TopicName::resolve(topic),
            clock,
        }
    }

    /// Resolved topic name.
    pub fn topic(&self) -> &TopicName {
        &self.topic
    }

    /// Publish `transaction` and return the broker-assigned message id.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::Serialization`] when the transaction cannot be encoded.
    /// - [`DispatchError::InvalidDelay`] when the delivery time overflows.
    /// - [`DispatchError::Publish`] for any broker failure.
    pub async fn publish(
        &self,
        transaction: &Transaction,
        delay: DeliveryDelay,
    ) -> Result<String, DispatchError> {
        let data = serde_json::to_vec(transaction)
            .map_err(|err| DispatchError::serialization(err.to_string()))?;
        let deliver_at = delay.deliver_at(self.clock.utc())?;

        let message_id = self
            .broker
            .publish(PublishRequest {
                topic: self.topic.clone(),
                data,
                deliver_at,
            })
            .await?;

        info!(
            topic = %self.topic,
            message_id = %message_id,
            transaction_id = transaction.id,
            delay_seconds = delay.as_seconds(),
            "transaction published"
        );
        Ok(message_id)
    }
}
