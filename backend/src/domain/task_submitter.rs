//! Schedules transactions as HTTP-callback tasks on a queue.

use std::sync::Arc;

use mockable::Clock;
use tracing::info;
use url::Url;

use super::ports::{HttpTaskRequest, TaskQueue};
use super::{DeliveryDelay, DispatchError, QueuePath, Transaction};

/// Serialises a transaction into a task that POSTs it to a callback URL
/// once `now + delay` is reached.
///
/// A zero delay is passed through unchanged; the queue fires such tasks
/// immediately.
#[derive(Clone)]
pub struct DeferredTaskSubmitter {
    queue: Arc<dyn TaskQueue>,
    queue_path: QueuePath,
    callback_url: Url,
    clock: Arc<dyn Clock>,
}

impl DeferredTaskSubmitter {
    /// Build a submitter targeting `queue_path` with tasks calling back `callback_url`.
    pub fn new(
        queue: Arc<dyn TaskQueue>,
        queue_path: QueuePath,
        callback_url: Url,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            queue,
            queue_path,
            callback_url,
            clock,
        }
    }

    /// Queue the tasks are created in.
    pub fn queue_path(&self) -> &QueuePath {
        &self.queue_path
    }

    /// Create the task and return the queue-assigned task name.
    ///
    /// # Errors
    ///
    /// - [`DispatchError::Serialization`] when the transaction cannot be encoded.
    /// - [`DispatchError::InvalidDelay`] when the schedule time overflows.
    /// - [`DispatchError::QueueConnection`] when the queue cannot be reached.
    /// - [`DispatchError::TaskCreation`] when the queue rejects the task.
    pub async fn enqueue(
        &self,
        transaction: &Transaction,
        delay: DeliveryDelay,
    ) -> Result<String, DispatchError> {
        let body = serde_json::to_vec(transaction)
            .map_err(|err| DispatchError::serialization(err.to_string()))?;
        let schedule_time = delay.schedule_from(self.clock.utc())?;

        let task_name = self
            .queue
            .create_task(HttpTaskRequest {
                queue: self.queue_path.clone(),
                url: self.callback_url.clone(),
                body,
                schedule_time,
            })
            .await?;

        info!(
            queue = %self.queue_path,
            task_name = %task_name,
            transaction_id = transaction.id,
            schedule_time = %schedule_time.to_rfc3339(),
            "transaction task created"
        );
        Ok(task_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockTaskQueue, TaskQueueError};
    use crate::domain::test_clock::fixed_clock;
    use chrono::TimeDelta;
    use rstest::rstest;

    fn callback() -> Url {
        Url::parse("https://relay.example.test/api/v1/transactions/poll").expect("valid url")
    }

    fn submitter(queue: MockTaskQueue) -> (DeferredTaskSubmitter, chrono::DateTime<chrono::Utc>) {
        let (clock, now) = fixed_clock();
        let submitter = DeferredTaskSubmitter::new(
            Arc::new(queue),
            QueuePath::new("acme", "europe-west1", "settlements"),
            callback(),
            clock,
        );
        (submitter, now)
    }

    #[rstest]
    #[case(0)]
    #[case(30)]
    #[tokio::test]
    async fn schedules_task_at_now_plus_delay(#[case] seconds: i64) {
        let (clock, now) = fixed_clock();
        let tx = Transaction {
            id: 4,
            amount: 75,
            ..Transaction::default()
        };
        let expected_body = serde_json::to_vec(&tx).expect("serialise");
        let mut queue = MockTaskQueue::new();
        queue
            .expect_create_task()
            .times(1)
            .withf(move |request| {
                request.queue.to_string()
                    == "projects/acme/locations/europe-west1/queues/settlements"
                    && request.url == callback()
                    && request.body == expected_body
                    && request.schedule_time == now + TimeDelta::seconds(seconds)
            })
            .return_once(|_| {
                Ok("projects/acme/locations/europe-west1/queues/settlements/tasks/1".to_owned())
            });

        let submitter = DeferredTaskSubmitter::new(
            Arc::new(queue),
            QueuePath::new("acme", "europe-west1", "settlements"),
            callback(),
            clock,
        );
        let delay = DeliveryDelay::from_seconds(seconds).expect("valid delay");
        let name = submitter.enqueue(&tx, delay).await.expect("enqueue");
        assert!(name.ends_with("/tasks/1"));
    }

    #[tokio::test]
    async fn unreachable_queue_is_a_connection_error() {
        let mut queue = MockTaskQueue::new();
        queue
            .expect_create_task()
            .times(1)
            .return_once(|_| Err(TaskQueueError::connection("connection refused")));
        let (submitter, _) = submitter(queue);

        let error = submitter
            .enqueue(&Transaction::default(), DeliveryDelay::IMMEDIATE)
            .await
            .expect_err("connection failure");
        assert!(matches!(error, DispatchError::QueueConnection { .. }));
    }

    #[tokio::test]
    async fn rejected_task_is_a_creation_error() {
        let mut queue = MockTaskQueue::new();
        queue
            .expect_create_task()
            .times(1)
            .return_once(|_| Err(TaskQueueError::rejected("status 400: invalid parent")));
        let (submitter, _) = submitter(queue);

        let error = submitter
            .enqueue(&Transaction::default(), DeliveryDelay::IMMEDIATE)
            .await
            .expect_err("rejected task");
        assert!(matches!(error, DispatchError::TaskCreation { .. }));
    }
}
