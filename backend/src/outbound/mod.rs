//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **pubsub**: topic publish over the Pub/Sub REST API
//! - **cloud_tasks**: HTTP-target task creation over the Cloud Tasks REST API
//! - **catalogue**: in-memory fixture transactions
//!
//! Adapters are thin translators between domain types and wire
//! representations. They contain no business logic.

pub mod catalogue;
pub mod cloud_tasks;
mod http_support;
pub mod pubsub;
