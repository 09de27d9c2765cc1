//! Names of the broker destinations a transaction can be dispatched to.

use std::fmt;

const TOPIC_PATH_MARKER: &str = "/topics/";

/// Bare topic name, stripped of any `projects/.../topics/` prefix.
///
/// # Examples
/// ```
/// use relay::domain::TopicName;
///
/// assert_eq!(TopicName::resolve("projects/acme/topics/payments").as_str(), "payments");
/// assert_eq!(TopicName::resolve("payments").as_str(), "payments");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TopicName(String);

impl TopicName {
    /// Resolve a configured topic identifier into its bare name.
    ///
    /// Accepts both a bare name and a fully qualified path. The trailing
    /// segment after the last `/topics/` marker is used; input without the
    /// marker is returned unchanged.
    pub fn resolve(raw: &str) -> Self {
        let name = raw
            .rsplit_once(TOPIC_PATH_MARKER)
            .map_or(raw, |(_, name)| name);
        Self(name.to_owned())
    }

    /// Borrow the bare topic name.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for TopicName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Fully qualified queue path, `projects/{project}/locations/{location}/queues/{queue}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueuePath {
    project_id: String,
    location: String,
    queue_id: String,
}

impl QueuePath {
    /// Build a queue path from its identifiers.
    pub fn new(
        project_id: impl Into<String>,
        location: impl Into<String>,
        queue_id: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            location: location.into(),
            queue_id: queue_id.into(),
        }
    }

    /// Project owning the queue.
    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    /// Queue location, for example `europe-west1`.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Queue identifier within the location.
    pub fn queue_id(&self) -> &str {
        &self.queue_id
    }
}

impl fmt::Display for QueuePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "projects/{}/locations/{}/queues/{}",
            self.project_id, self.location, self.queue_id
        )
    }
}
