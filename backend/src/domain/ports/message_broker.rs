//! Driven port for publishing serialised payloads to a broker topic.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::define_port_error;
use crate::domain::TopicName;

/// A single publish call against a topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    /// Bare topic name.
    pub topic: TopicName,
    /// Serialised payload.
    pub data: Vec<u8>,
    /// Target delivery time; `None` for immediate delivery.
    pub deliver_at: Option<DateTime<Utc>>,
}

define_port_error! {
    /// Errors surfaced by the broker adapter.
    pub enum MessageBrokerError {
        /// The broker could not be reached.
        Unavailable { message: String } => "broker is unavailable: {message}",
        /// The broker refused the message (permission, quota, unknown topic).
        Rejected { message: String } => "broker rejected message: {message}",
    }
}

/// Port for publishing to a topic.
///
/// Implementations block until the broker acknowledges the message and return
/// the identifier it assigned. They must not retry internally.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessageBroker: Send + Sync {
    /// Publish one message and return the broker-assigned message id.
    async fn publish(&self, request: PublishRequest) -> Result<String, MessageBrokerError>;
}
