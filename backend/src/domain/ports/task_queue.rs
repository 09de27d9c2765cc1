//! Driven port for scheduling HTTP-callback tasks on a queue service.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use url::Url;

use super::define_port_error;
use crate::domain::QueuePath;

/// A task that POSTs `body` to `url` once `schedule_time` is reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpTaskRequest {
    /// Queue the task is created in.
    pub queue: QueuePath,
    /// Callback URL receiving the POST.
    pub url: Url,
    /// JSON body of the POST.
    pub body: Vec<u8>,
    /// Earliest time the queue may fire the task.
    pub schedule_time: DateTime<Utc>,
}

define_port_error! {
    /// Errors surfaced by the queue adapter.
    pub enum TaskQueueError {
        /// The queue service could not be reached.
        Connection { message: String } => "queue service unreachable: {message}",
        /// The queue service refused the task, e.g. for a malformed queue path.
        Rejected { message: String } => "queue service rejected task: {message}",
    }
}

/// Port for creating deferred HTTP tasks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskQueue: Send + Sync {
    /// Create a task and return the service-assigned task name.
    async fn create_task(&self, request: HttpTaskRequest) -> Result<String, TaskQueueError>;
}
