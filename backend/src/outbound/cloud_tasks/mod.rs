//! Cloud Tasks REST adapter for the task queue port.

mod dto;
mod http_queue;

pub use http_queue::CloudTasksHttpQueue;
