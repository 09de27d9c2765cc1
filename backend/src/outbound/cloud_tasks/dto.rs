//! Wire DTOs for the Cloud Tasks `tasks.create` REST call.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(super) struct CreateTaskBodyDto {
    pub(super) task: TaskDto,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct TaskDto {
    pub(super) http_request: HttpRequestDto,
    /// RFC 3339 UTC timestamp.
    pub(super) schedule_time: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct HttpRequestDto {
    pub(super) http_method: &'static str,
    pub(super) url: String,
    pub(super) headers: BTreeMap<&'static str, &'static str>,
    /// Base64 request body.
    pub(super) body: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct TaskResponseDto {
    #[serde(default)]
    pub(super) name: String,
}
