//! Error taxonomy for dispatch and ingestion.
//!
//! Decode-time failures are terminal for the current request. Downstream
//! broker and queue failures carry the failing operation in their message so
//! connectivity problems can be told apart from rejections. Nothing here is
//! retried; inbound redelivery is left to the broker.

use super::ports::{MessageBrokerError, TaskQueueError, define_port_error};

define_port_error! {
    /// Errors surfaced by the dispatch facade and its components.
    pub enum DispatchError {
        /// Body is not valid JSON or carries invalid base64 data.
        Decode { message: String } => "decode failed: {message}",
        /// A recognised push envelope carried no data.
        EmptyPayload => "push envelope has no data",
        /// Caller supplied a negative or out-of-range delay.
        InvalidDelay { message: String } => "invalid delay: {message}",
        /// The transaction could not be serialised.
        Serialization { message: String } => "serialisation failed: {message}",
        /// The broker failed to accept a topic publish.
        Publish { message: String } => "publish failed: {message}",
        /// The queue service could not be reached.
        QueueConnection { message: String } => "queue connection failed: {message}",
        /// The queue service rejected the task.
        TaskCreation { message: String } => "task creation failed: {message}",
    }
}

impl DispatchError {
    /// Return whether the failure was caused by the request payload rather
    /// than the server or a downstream service.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::Decode { .. } | Self::EmptyPayload | Self::InvalidDelay { .. }
        )
    }
}

impl From<MessageBrokerError> for DispatchError {
    fn from(error: MessageBrokerError) -> Self {
        Self::publish(format!("topic publish: {error}"))
    }
}

impl From<TaskQueueError> for DispatchError {
    fn from(error: TaskQueueError) -> Self {
        match error {
            TaskQueueError::Connection { .. } => {
                Self::queue_connection(format!("create task: {error}"))
            }
            TaskQueueError::Rejected { .. } => Self::task_creation(format!("create task: {error}")),
        }
    }
}
