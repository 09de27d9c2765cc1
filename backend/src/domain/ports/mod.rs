//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod message_broker;
mod task_queue;
mod transaction_catalogue;
mod transaction_dispatch;

#[cfg(test)]
pub use message_broker::MockMessageBroker;
pub use message_broker::{MessageBroker, MessageBrokerError, PublishRequest};
#[cfg(test)]
pub use task_queue::MockTaskQueue;
pub use task_queue::{HttpTaskRequest, TaskQueue, TaskQueueError};
#[cfg(test)]
pub use transaction_catalogue::MockTransactionCatalogue;
pub use transaction_catalogue::TransactionCatalogue;
#[cfg(test)]
pub use transaction_dispatch::MockTransactionDispatch;
pub use transaction_dispatch::TransactionDispatch;
