//! Startup configuration loaded via OrthoConfig.
//!
//! [`RelaySettings`] is the raw layered input (environment, config file and
//! CLI flags, prefix `RELAY`). [`RelaySettings::resolve`] validates it once
//! into a [`RuntimeConfig`] whose [`DispatchMode`] names the single outbound
//! backend this deployment uses.

use std::fmt;
use std::str::FromStr;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_PUBSUB_ENDPOINT: &str = "https://pubsub.googleapis.com";
const DEFAULT_CLOUD_TASKS_ENDPOINT: &str = "https://cloudtasks.googleapis.com";

/// Raw configuration values, read once at startup.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RELAY")]
pub struct RelaySettings {
    /// Deployment environment: `dev`, `sandbox` or `prod`.
    pub environment: Option<String>,
    /// HTTP listen port.
    #[ortho_config(default = 8080)]
    pub port: u16,
    /// Outbound backend: `topic` or `task_queue`.
    pub dispatch_mode: Option<String>,
    /// Cloud project owning the topic or queue.
    pub project_id: Option<String>,
    /// Topic, bare or `projects/{project}/topics/{name}`.
    pub topic_id: Option<String>,
    /// Queue location, for example `europe-west1`.
    pub location: Option<String>,
    /// Queue identifier.
    pub queue_id: Option<String>,
    /// URL the queue calls back with the transaction body.
    pub callback_url: Option<String>,
    /// Delay applied when a dispatch request does not name one.
    #[ortho_config(default = 0)]
    pub task_delay_seconds: i64,
    /// Pub/Sub REST base URL.
    pub pubsub_endpoint: Option<String>,
    /// Cloud Tasks REST base URL.
    pub cloud_tasks_endpoint: Option<String>,
    /// Bearer token forwarded to the broker APIs.
    pub access_token: Option<String>,
}

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Dev,
    Sandbox,
    Prod,
}

impl Environment {
    pub fn is_prod(self) -> bool {
        matches!(self, Self::Prod)
    }

    pub fn is_sandbox(self) -> bool {
        matches!(self, Self::Sandbox)
    }

    pub fn is_dev(self) -> bool {
        matches!(self, Self::Dev)
    }
}

impl FromStr for Environment {
    type Err = SettingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" => Ok(Self::Dev),
            "sandbox" => Ok(Self::Sandbox),
            "prod" | "production" => Ok(Self::Prod),
            other => Err(SettingsError::invalid(
                "environment",
                format!("unknown environment '{other}'; expected dev, sandbox or prod"),
            )),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Dev => "dev",
            Self::Sandbox => "sandbox",
            Self::Prod => "prod",
        })
    }
}

/// Topic publish target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicTarget {
    pub project_id: String,
    /// As configured; resolved to a bare name by the publisher.
    pub topic: String,
}

/// Task queue target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueTarget {
    pub project_id: String,
    pub location: String,
    pub queue_id: String,
    pub callback_url: Url,
}

/// Outbound backend selected for this deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchMode {
    Topic(TopicTarget),
    TaskQueue(QueueTarget),
}

impl DispatchMode {
    /// Short label used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Topic(_) => "topic",
            Self::TaskQueue(_) => "task_queue",
        }
    }
}

/// Validated configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub environment: Environment,
    pub port: u16,
    pub dispatch: DispatchMode,
    pub task_delay_seconds: i64,
    pub pubsub_endpoint: Url,
    pub cloud_tasks_endpoint: Url,
    pub access_token: Option<String>,
}

/// Startup validation failures, each naming the offending field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("missing required setting `{field}` for dispatch mode `{mode}`")]
    Missing { field: &'static str, mode: &'static str },
    #[error("invalid setting `{field}`: {message}")]
    Invalid { field: &'static str, message: String },
}

impl SettingsError {
    fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }
}

impl RelaySettings {
    /// Validate the raw settings into a [`RuntimeConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] for unknown modes or environments, missing
    /// fields required by the selected mode, a negative default delay and
    /// unparsable URLs.
    ///
    /// # Examples
    /// ```
    /// use relay::config::{DispatchMode, RelaySettings};
    ///
    /// let settings = RelaySettings {
    ///     environment: None,
    ///     port: 8080,
    ///     dispatch_mode: Some("topic".into()),
    ///     project_id: Some("acme".into()),
    ///     topic_id: Some("payments".into()),
    ///     location: None,
    ///     queue_id: None,
    ///     callback_url: None,
    ///     task_delay_seconds: 0,
    ///     pubsub_endpoint: None,
    ///     cloud_tasks_endpoint: None,
    ///     access_token: None,
    /// };
    /// let config = settings.resolve().expect("valid settings");
    /// assert!(matches!(config.dispatch, DispatchMode::Topic(_)));
    /// ```
    pub fn resolve(&self) -> Result<RuntimeConfig, SettingsError> {
        let environment = match non_empty(&self.environment) {
            Some(raw) => raw.parse()?,
            None => Environment::default(),
        };
        if self.task_delay_seconds < 0 {
            return Err(SettingsError::invalid(
                "task_delay_seconds",
                format!("must be non-negative, got {}", self.task_delay_seconds),
            ));
        }

        Ok(RuntimeConfig {
            environment,
            port: if self.port == 0 { DEFAULT_PORT } else { self.port },
            dispatch: self.dispatch_mode()?,
            task_delay_seconds: self.task_delay_seconds,
            pubsub_endpoint: parse_url(
                "pubsub_endpoint",
                non_empty(&self.pubsub_endpoint).unwrap_or(DEFAULT_PUBSUB_ENDPOINT),
            )?,
            cloud_tasks_endpoint: parse_url(
                "cloud_tasks_endpoint",
                non_empty(&self.cloud_tasks_endpoint).unwrap_or(DEFAULT_CLOUD_TASKS_ENDPOINT),
            )?,
            access_token: non_empty(&self.access_token).map(str::to_owned),
        })
    }

    fn dispatch_mode(&self) -> Result<DispatchMode, SettingsError> {
        let mode = non_empty(&self.dispatch_mode)
            .unwrap_or("topic")
            .trim()
            .to_ascii_lowercase();
        match mode.as_str() {
            "topic" => Ok(DispatchMode::Topic(TopicTarget {
                project_id: required(&self.project_id, "project_id", "topic")?,
                topic: required(&self.topic_id, "topic_id", "topic")?,
            })),
            "task_queue" | "task-queue" | "queue" => {
                let callback = required(&self.callback_url, "callback_url", "task_queue")?;
                Ok(DispatchMode::TaskQueue(QueueTarget {
                    project_id: required(&self.project_id, "project_id", "task_queue")?,
                    location: required(&self.location, "location", "task_queue")?,
                    queue_id: required(&self.queue_id, "queue_id", "task_queue")?,
                    callback_url: parse_url("callback_url", &callback)?,
                }))
            }
            other => Err(SettingsError::invalid(
                "dispatch_mode",
                format!("unknown dispatch mode '{other}'; expected topic or task_queue"),
            )),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn required(
    value: &Option<String>,
    field: &'static str,
    mode: &'static str,
) -> Result<String, SettingsError> {
    non_empty(value)
        .map(str::to_owned)
        .ok_or(SettingsError::Missing { field, mode })
}

fn parse_url(field: &'static str, raw: &str) -> Result<Url, SettingsError> {
    Url::parse(raw).map_err(|err| SettingsError::invalid(field, format!("'{raw}': {err}")))
}
