//! Reqwest-backed Cloud Tasks client creating HTTP-target tasks.

use std::collections::BTreeMap;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::SecondsFormat;
use reqwest::{Client, Url};

use super::dto::{CreateTaskBodyDto, HttpRequestDto, TaskDto, TaskResponseDto};
use crate::domain::QueuePath;
use crate::domain::ports::{HttpTaskRequest, TaskQueue, TaskQueueError};
use crate::outbound::http_support::{api_url, status_message, with_bearer};

/// Queue adapter submitting tasks over REST.
pub struct CloudTasksHttpQueue {
    client: Client,
    endpoint: Url,
    access_token: Option<String>,
}

impl CloudTasksHttpQueue {
    /// Build an adapter against `endpoint`, for example
    /// `https://cloudtasks.googleapis.com`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(endpoint: Url, access_token: Option<String>) -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            endpoint,
            access_token,
        })
    }

    fn tasks_url(&self, queue: &QueuePath) -> Result<Url, TaskQueueError> {
        api_url(&self.endpoint, &format!("v2/{queue}/tasks"))
            .map_err(|err| TaskQueueError::rejected(format!("invalid queue URL: {err}")))
    }
}

fn create_task_body(request: &HttpTaskRequest) -> CreateTaskBodyDto {
    CreateTaskBodyDto {
        task: TaskDto {
            http_request: HttpRequestDto {
                http_method: "POST",
                url: request.url.to_string(),
                headers: BTreeMap::from([("Content-Type", "application/json")]),
                body: STANDARD.encode(&request.body),
            },
            schedule_time: request
                .schedule_time
                .to_rfc3339_opts(SecondsFormat::Secs, true),
        },
    }
}

#[async_trait]
impl TaskQueue for CloudTasksHttpQueue {
    async fn create_task(&self, request: HttpTaskRequest) -> Result<String, TaskQueueError> {
        let url = self.tasks_url(&request.queue)?;
        let response = with_bearer(
            self.client.post(url).json(&create_task_body(&request)),
            self.access_token.as_deref(),
        )
        .send()
        .await
        .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(TaskQueueError::rejected(status_message(
                status,
                body.as_ref(),
            )));
        }

        let decoded: TaskResponseDto = serde_json::from_slice(&body)
            .map_err(|err| TaskQueueError::rejected(format!("invalid task response: {err}")))?;
        if decoded.name.is_empty() {
            return Err(TaskQueueError::rejected("task response carried no name"));
        }
        Ok(decoded.name)
    }
}

fn map_transport_error(error: reqwest::Error) -> TaskQueueError {
    TaskQueueError::connection(error.to_string())
}
