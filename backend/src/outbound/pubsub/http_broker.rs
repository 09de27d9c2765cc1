//! Reqwest-backed Pub/Sub publisher.
//!
//! This adapter owns transport details only: the REST path, base64 framing,
//! bearer authentication and HTTP error mapping.

use std::collections::BTreeMap;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::SecondsFormat;
use reqwest::{Client, Url};

use super::dto::{PublishBodyDto, PublishResponseDto, PubsubMessageDto};
use crate::domain::{DELIVER_AT_ATTRIBUTE, TopicName};
use crate::domain::ports::{MessageBroker, MessageBrokerError, PublishRequest};
use crate::outbound::http_support::{api_url, status_message, with_bearer};

/// Broker adapter publishing to one project's topics over REST.
pub struct PubSubHttpBroker {
    client: Client,
    endpoint: Url,
    project_id: String,
    access_token: Option<String>,
}

impl PubSubHttpBroker {
    /// Build an adapter against `endpoint`, for example
    /// `https://pubsub.googleapis.com` or an emulator address.
    ///
    /// No request timeout is set; the client defaults apply.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        project_id: impl Into<String>,
        access_token: Option<String>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            endpoint,
            project_id: project_id.into(),
            access_token,
        })
    }

    fn publish_url(&self, topic: &TopicName) -> Result<Url, MessageBrokerError> {
        api_url(
            &self.endpoint,
            &format!("v1/projects/{}/topics/{topic}:publish", self.project_id),
        )
        .map_err(|err| MessageBrokerError::rejected(format!("invalid publish URL: {err}")))
    }
}

fn publish_body(request: &PublishRequest) -> PublishBodyDto {
    let mut attributes = BTreeMap::new();
    if let Some(at) = request.deliver_at {
        attributes.insert(
            DELIVER_AT_ATTRIBUTE.to_owned(),
            at.to_rfc3339_opts(SecondsFormat::Secs, true),
        );
    }
    PublishBodyDto {
        messages: vec![PubsubMessageDto {
            data: STANDARD.encode(&request.data),
            attributes,
        }],
    }
}

#[async_trait]
impl MessageBroker for PubSubHttpBroker {
    async fn publish(&self, request: PublishRequest) -> Result<String, MessageBrokerError> {
        let url = self.publish_url(&request.topic)?;
        let response = with_bearer(
            self.client.post(url).json(&publish_body(&request)),
            self.access_token.as_deref(),
        )
        .send()
        .await
        .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(MessageBrokerError::rejected(status_message(
                status,
                body.as_ref(),
            )));
        }

        let decoded: PublishResponseDto = serde_json::from_slice(&body).map_err(|err| {
            MessageBrokerError::rejected(format!("invalid publish response: {err}"))
        })?;
        decoded
            .message_ids
            .into_iter()
            .next()
            .ok_or_else(|| MessageBrokerError::rejected("publish response carried no message id"))
    }
}

fn map_transport_error(error: reqwest::Error) -> MessageBrokerError {
    MessageBrokerError::unavailable(error.to_string())
}
