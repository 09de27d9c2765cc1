//! Helpers shared by the reqwest-backed broker adapters.

use reqwest::{RequestBuilder, StatusCode, Url};

const PREVIEW_CHAR_LIMIT: usize = 160;

/// Append `path` to a configured API base, tolerating a trailing slash on
/// the base.
pub(crate) fn api_url(base: &Url, path: &str) -> Result<Url, url::ParseError> {
    let base = base.as_str().trim_end_matches('/');
    Url::parse(&format!("{base}/{}", path.trim_start_matches('/')))
}

/// Attach a bearer token when one is configured.
pub(crate) fn with_bearer(builder: RequestBuilder, token: Option<&str>) -> RequestBuilder {
    match token {
        Some(token) => builder.bearer_auth(token),
        None => builder,
    }
}

/// Describe a non-success status with a compact preview of the body.
pub(crate) fn status_message(status: StatusCode, body: &[u8]) -> String {
    let body_preview = body_preview(body);
    if body_preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), body_preview)
    }
}

fn body_preview(body: &[u8]) -> String {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::bare("https://pubsub.googleapis.com")]
    #[case::slash("https://pubsub.googleapis.com/")]
    fn joins_paths_onto_bases(#[case] base: &str) {
        let base = Url::parse(base).expect("valid base");
        let url = api_url(&base, "v1/projects/acme/topics/payments:publish").expect("join");
        assert_eq!(
            url.as_str(),
            "https://pubsub.googleapis.com/v1/projects/acme/topics/payments:publish"
        );
    }

    #[test]
    fn keeps_base_path_prefixes() {
        let base = Url::parse("http://127.0.0.1:8085/emulator").expect("valid base");
        let url = api_url(&base, "/v2/projects/acme/tasks").expect("join");
        assert_eq!(url.as_str(), "http://127.0.0.1:8085/emulator/v2/projects/acme/tasks");
    }

    #[test]
    fn status_message_compacts_whitespace() {
        let message = status_message(
            StatusCode::FORBIDDEN,
            b"{\n  \"error\": {\n    \"status\": \"PERMISSION_DENIED\"\n  }\n}",
        );
        assert_eq!(
            message,
            "status 403: { \"error\": { \"status\": \"PERMISSION_DENIED\" } }"
        );
    }

    #[test]
    fn status_message_omits_empty_bodies() {
        assert_eq!(status_message(StatusCode::NOT_FOUND, b"  "), "status 404");
    }

    #[test]
    fn long_bodies_are_truncated() {
        let body = "x".repeat(PREVIEW_CHAR_LIMIT + 40);
        let message = status_message(StatusCode::BAD_GATEWAY, body.as_bytes());
        assert!(message.ends_with("..."));
        assert_eq!(
            message.len(),
            "status 502: ".len() + PREVIEW_CHAR_LIMIT + "...".len()
        );
    }
}
