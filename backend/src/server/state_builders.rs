//! Builders wiring the resolved configuration to concrete adapters.

use std::sync::Arc;

use mockable::DefaultClock;
use tracing::info;

use relay::config::{DispatchMode, RuntimeConfig};
use relay::domain::ports::{TransactionCatalogue, TransactionDispatch};
use relay::domain::{
    DeferredTaskSubmitter, DispatchBackend, DispatchService, QueuePath, TopicPublisher,
};
use relay::inbound::http::state::HttpState;
use relay::outbound::catalogue::FixtureTransactionCatalogue;
use relay::outbound::cloud_tasks::CloudTasksHttpQueue;
use relay::outbound::pubsub::PubSubHttpBroker;

/// Build the dispatch facade for the configured backend.
///
/// # Errors
///
/// Returns [`std::io::Error`] when the HTTP client cannot be constructed.
pub(crate) fn build_dispatch(
    config: &RuntimeConfig,
) -> std::io::Result<Arc<dyn TransactionDispatch>> {
    let clock = Arc::new(DefaultClock);
    let backend = match &config.dispatch {
        DispatchMode::Topic(target) => {
            let broker = PubSubHttpBroker::new(
                config.pubsub_endpoint.clone(),
                target.project_id.clone(),
                config.access_token.clone(),
            )
            .map_err(|err| std::io::Error::other(format!("pubsub client: {err}")))?;
            let publisher = TopicPublisher::new(Arc::new(broker), &target.topic, clock);
            info!(
                topic = %publisher.topic(),
                project_id = %target.project_id,
                "dispatching to topic"
            );
            DispatchBackend::Topic(publisher)
        }
        DispatchMode::TaskQueue(target) => {
            let queue = CloudTasksHttpQueue::new(
                config.cloud_tasks_endpoint.clone(),
                config.access_token.clone(),
            )
            .map_err(|err| std::io::Error::other(format!("cloud tasks client: {err}")))?;
            let queue_path = QueuePath::new(&target.project_id, &target.location, &target.queue_id);
            info!(
                queue = %queue_path,
                callback_url = %target.callback_url,
                "dispatching to task queue"
            );
            DispatchBackend::TaskQueue(DeferredTaskSubmitter::new(
                Arc::new(queue),
                queue_path,
                target.callback_url.clone(),
                clock,
            ))
        }
    };
    Ok(Arc::new(DispatchService::new(backend)))
}

/// Assemble handler state from the dispatch facade and the fixture catalogue.
pub(crate) fn build_http_state(
    config: &RuntimeConfig,
    dispatch: Arc<dyn TransactionDispatch>,
) -> HttpState {
    let catalogue: Arc<dyn TransactionCatalogue> =
        Arc::new(FixtureTransactionCatalogue::default());
    HttpState::new(dispatch, catalogue, config.task_delay_seconds)
}
