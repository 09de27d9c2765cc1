//! Pub/Sub REST adapter for the message broker port.

mod dto;
mod http_broker;

pub use crate::domain::DELIVER_AT_ATTRIBUTE;
pub use http_broker::PubSubHttpBroker;
