//! Wire DTOs for the Pub/Sub `topics.publish` REST call.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub(super) struct PublishBodyDto {
    pub(super) messages: Vec<PubsubMessageDto>,
}

#[derive(Debug, Serialize)]
pub(super) struct PubsubMessageDto {
    /// Base64 payload.
    pub(super) data: String,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub(super) attributes: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct PublishResponseDto {
    #[serde(rename = "messageIds", default)]
    pub(super) message_ids: Vec<String>,
}
