//! Inbound push decoding.
//!
//! Push bodies arrive in one of two encodings:
//!
//! - **envelope**: `{"message": {"data": "<base64>", "attributes": {...},
//!   "messageId": "...", "publishTime": "..."}, "subscription": "..."}` where
//!   `data` decodes to the transaction JSON;
//! - **direct**: the transaction JSON itself.
//!
//! Precedence is envelope first, direct second. A body is an envelope when it
//! is a JSON object whose `message` is an object with a `data` key. Only that
//! key path counts, so a direct payload that happens to carry it is read as
//! an envelope, and off-type metadata (`attributes`, `messageId`,
//! `publishTime`, `subscription`) never demotes an envelope to direct JSON.
//! A recognised envelope with `null` or empty `data` fails with
//! [`DispatchError::EmptyPayload`] and is never retried as direct JSON. Every
//! other failure is a terminal [`DispatchError::Decode`]. Transactions only
//! decode from JSON objects.

use std::collections::BTreeMap;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::{Map, Value};
use tracing::info;

use super::{DispatchError, Transaction};

/// Message attribute carrying the requested delivery time (RFC 3339, UTC).
pub const DELIVER_AT_ATTRIBUTE: &str = "deliver_at";

/// Delivery metadata captured from a push envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvelopeProvenance {
    /// Broker-assigned message identifier.
    pub message_id: String,
    /// Subscription that delivered the push.
    pub subscription: String,
    /// Publish timestamp as reported by the broker.
    pub publish_time: String,
    /// Message attributes.
    pub attributes: BTreeMap<String, String>,
}

impl EnvelopeProvenance {
    /// Requested delivery time set by the publisher, if any.
    pub fn deliver_at(&self) -> Option<&str> {
        self.attributes.get(DELIVER_AT_ATTRIBUTE).map(String::as_str)
    }
}

/// Which encoding an inbound body used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundSource {
    /// Wrapped push envelope.
    Envelope(EnvelopeProvenance),
    /// Bare transaction JSON.
    Direct,
}

impl InboundSource {
    /// Short label for logs and responses.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Envelope(_) => "envelope",
            Self::Direct => "direct",
        }
    }

    /// Requested delivery time carried by an envelope.
    pub fn deliver_at(&self) -> Option<&str> {
        match self {
            Self::Envelope(provenance) => provenance.deliver_at(),
            Self::Direct => None,
        }
    }
}

/// A decoded inbound transaction with the encoding it arrived in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedTransaction {
    pub transaction: Transaction,
    pub source: InboundSource,
}

/// Decode an inbound push body into a transaction.
///
/// # Errors
///
/// - [`DispatchError::EmptyPayload`] for an envelope whose `data` is empty
///   or `null`.
/// - [`DispatchError::Decode`] for invalid base64, invalid transaction JSON
///   inside an envelope, or a non-envelope body that is not transaction JSON.
///
/// # Examples
/// ```
/// use relay::domain::{InboundSource, decode_inbound};
///
/// let body = br#"{"message":{"data":"eyJpZCI6MSwiYW1vdW50IjoxMDB9"}}"#;
/// let decoded = decode_inbound(body).expect("valid envelope");
/// assert_eq!(decoded.transaction.id, 1);
/// assert_eq!(decoded.transaction.amount, 100);
/// assert!(matches!(decoded.source, InboundSource::Envelope(_)));
/// ```
pub fn decode_inbound(body: &[u8]) -> Result<DecodedTransaction, DispatchError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|err| DispatchError::decode(format!("invalid transaction JSON: {err}")))?;
    match value {
        Value::Object(mut object) => match take_envelope_message(&mut object) {
            Some(message) => decode_envelope(message, &object),
            None => decode_direct(Value::Object(object)),
        },
        other => decode_direct(other),
    }
}

/// Detach `message` when it is an object carrying a `data` key. Only that
/// key path decides whether the body is an envelope.
fn take_envelope_message(body: &mut Map<String, Value>) -> Option<Map<String, Value>> {
    match body.get("message") {
        Some(Value::Object(message)) if message.contains_key("data") => {}
        _ => return None,
    }
    match body.remove("message") {
        Some(Value::Object(message)) => Some(message),
        _ => None,
    }
}

fn decode_envelope(
    mut message: Map<String, Value>,
    body: &Map<String, Value>,
) -> Result<DecodedTransaction, DispatchError> {
    let data = match message.remove("data") {
        None | Some(Value::Null) => return Err(DispatchError::empty_payload()),
        Some(Value::String(data)) if data.is_empty() => {
            return Err(DispatchError::empty_payload());
        }
        Some(Value::String(data)) => data,
        Some(other) => {
            return Err(DispatchError::decode(format!(
                "envelope data must be a base64 string, got {}",
                json_kind(&other)
            )));
        }
    };

    let payload = STANDARD
        .decode(data.as_bytes())
        .map_err(|err| DispatchError::decode(format!("invalid base64 envelope data: {err}")))?;
    let transaction: Transaction = serde_json::from_slice(&payload).map_err(|err| {
        DispatchError::decode(format!("invalid transaction in envelope data: {err}"))
    })?;

    let provenance = EnvelopeProvenance {
        message_id: metadata_text(message.get("messageId")),
        subscription: metadata_text(body.get("subscription")),
        publish_time: metadata_text(message.get("publishTime")),
        attributes: match message.get("attributes") {
            Some(Value::Object(attributes)) => attributes
                .iter()
                .map(|(key, value)| (key.clone(), metadata_text(Some(value))))
                .collect(),
            _ => BTreeMap::new(),
        },
    };

    info!(
        message_id = %provenance.message_id,
        subscription = %provenance.subscription,
        publish_time = %provenance.publish_time,
        deliver_at = provenance.deliver_at().unwrap_or_default(),
        transaction_id = transaction.id,
        amount = transaction.amount,
        status = transaction.status.as_deref().unwrap_or_default(),
        "transaction received from push envelope"
    );

    Ok(DecodedTransaction {
        transaction,
        source: InboundSource::Envelope(provenance),
    })
}

/// Metadata is observability only, so off-type values are kept as their
/// JSON text instead of failing the decode.
fn metadata_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn decode_direct(body: Value) -> Result<DecodedTransaction, DispatchError> {
    let transaction: Transaction = serde_json::from_value(body)
        .map_err(|err| DispatchError::decode(format!("invalid transaction JSON: {err}")))?;

    info!(
        transaction_id = transaction.id,
        amount = transaction.amount,
        status = transaction.status.as_deref().unwrap_or_default(),
        direction = transaction.direction.map(|d| d.as_str()).unwrap_or_default(),
        account_name = %transaction.account_name,
        "transaction received directly"
    );

    Ok(DecodedTransaction {
        transaction,
        source: InboundSource::Direct,
    })
}

#[cfg(test)]
mod tests {
    //! Coverage for envelope detection precedence and failure classes.

    use super::*;
    use crate::domain::Direction;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn transaction() -> Transaction {
        Transaction {
            id: 42,
            direction: Some(Direction::Outbound),
            amount: 9_000,
            account_name: "Jane Doe".to_owned(),
            account_number: Some("1234567764".to_owned()),
            currency_code: "NGN".to_owned(),
            status: Some("pending".to_owned()),
            reference: "1234567764".to_owned(),
            bank_name: "Zenith".to_owned(),
            bank_code: "057".to_owned(),
            narration: "school fees".to_owned(),
        }
    }

    fn wrap(transaction: &Transaction) -> Vec<u8> {
        let data = STANDARD.encode(serde_json::to_vec(transaction).expect("serialise"));
        serde_json::to_vec(&json!({
            "message": {
                "data": data,
                "attributes": {"origin": "relay"},
                "messageId": "1234567",
                "publishTime": "2026-10-15T08:00:00Z"
            },
            "subscription": "projects/acme/subscriptions/poll"
        }))
        .expect("serialise envelope")
    }

    #[rstest]
    fn envelope_round_trips(transaction: Transaction) {
        let decoded = decode_inbound(&wrap(&transaction)).expect("decode");
        assert_eq!(decoded.transaction, transaction);
        let InboundSource::Envelope(provenance) = decoded.source else {
            panic!("expected envelope source");
        };
        assert_eq!(provenance.message_id, "1234567");
        assert_eq!(provenance.subscription, "projects/acme/subscriptions/poll");
        assert_eq!(provenance.publish_time, "2026-10-15T08:00:00Z");
        assert_eq!(
            provenance.attributes.get("origin").map(String::as_str),
            Some("relay")
        );
    }

    #[rstest]
    fn direct_round_trips(transaction: Transaction) {
        let body = serde_json::to_vec(&transaction).expect("serialise");
        let decoded = decode_inbound(&body).expect("decode");
        assert_eq!(decoded.transaction, transaction);
        assert_eq!(decoded.source, InboundSource::Direct);
    }

    #[test]
    fn minimal_envelope_decodes_with_zero_values() {
        let body = br#"{"message":{"data":"eyJpZCI6MSwiYW1vdW50IjoxMDB9"}}"#;
        let decoded = decode_inbound(body).expect("decode");
        assert_eq!(
            decoded.transaction,
            Transaction {
                id: 1,
                amount: 100,
                ..Transaction::default()
            }
        );
        assert_eq!(decoded.source.label(), "envelope");
    }

    #[test]
    fn bare_transaction_decodes_directly() {
        let decoded =
            decode_inbound(br#"{"id":2,"amount":200,"direction":"out"}"#).expect("decode");
        assert_eq!(
            decoded.transaction,
            Transaction {
                id: 2,
                amount: 200,
                direction: Some(Direction::Outbound),
                ..Transaction::default()
            }
        );
        assert_eq!(decoded.source, InboundSource::Direct);
    }

    #[rstest]
    #[case::empty_data(br#"{"message":{"data":""}}"#.as_slice())]
    #[case::empty_data_with_record_fields(
        br#"{"id":5,"amount":10,"message":{"data":"","messageId":"9"}}"#.as_slice()
    )]
    fn empty_envelope_data_never_falls_back(#[case] body: &[u8]) {
        let error = decode_inbound(body).expect_err("empty data must fail");
        assert_eq!(error, DispatchError::empty_payload());
    }

    #[rstest]
    #[case::not_base64(br#"{"message":{"data":"***not base64***"}}"#.as_slice())]
    #[case::bad_padding(br#"{"message":{"data":"eyJpZCI6MX0"}}"#.as_slice())]
    fn malformed_base64_is_a_decode_error(#[case] body: &[u8]) {
        let error = decode_inbound(body).expect_err("invalid base64 must fail");
        assert!(matches!(error, DispatchError::Decode { .. }));
        assert!(error.to_string().contains("base64"));
    }

    #[test]
    fn envelope_with_non_transaction_data_is_a_decode_error() {
        let data = STANDARD.encode(b"[1,2,3]");
        let body = serde_json::to_vec(&json!({"message": {"data": data}})).expect("serialise");
        let error = decode_inbound(&body).expect_err("array payload must fail");
        assert!(matches!(error, DispatchError::Decode { .. }));
    }

    #[rstest]
    #[case::not_json(b"definitely not json".as_slice())]
    #[case::array(b"[]".as_slice())]
    #[case::positional_array(br#"[5,"in",100]"#.as_slice())]
    #[case::null(b"null".as_slice())]
    #[case::wrong_field_type(br#"{"id":"seven"}"#.as_slice())]
    fn invalid_direct_bodies_are_decode_errors(#[case] body: &[u8]) {
        let error = decode_inbound(body).expect_err("invalid body must fail");
        assert!(matches!(error, DispatchError::Decode { .. }));
    }

    #[test]
    fn null_envelope_data_is_an_empty_payload() {
        let error = decode_inbound(br#"{"message":{"data":null}}"#).expect_err("null data");
        assert_eq!(error, DispatchError::empty_payload());
    }

    #[rstest]
    #[case::numeric_attribute(
        br#"{"message":{"data":"eyJpZCI6MSwiYW1vdW50IjoxMDB9","attributes":{"retry":1}}}"#
            .as_slice()
    )]
    #[case::numeric_message_id(
        br#"{"message":{"data":"eyJpZCI6MSwiYW1vdW50IjoxMDB9","messageId":123}}"#.as_slice()
    )]
    #[case::attributes_not_a_map(
        br#"{"message":{"data":"eyJpZCI6MSwiYW1vdW50IjoxMDB9","attributes":["a"]},"subscription":7}"#
            .as_slice()
    )]
    fn off_type_metadata_keeps_the_envelope(#[case] body: &[u8]) {
        let decoded = decode_inbound(body).expect("decode");
        assert_eq!(decoded.transaction.id, 1);
        assert_eq!(decoded.transaction.amount, 100);
        assert_eq!(decoded.source.label(), "envelope");
    }

    #[test]
    fn off_type_metadata_is_kept_as_text() {
        let body = br#"{"message":{"data":"eyJpZCI6MSwiYW1vdW50IjoxMDB9","messageId":123,
            "attributes":{"retry":1,"deliver_at":"2026-10-15T08:00:45Z"}}}"#;
        let InboundSource::Envelope(provenance) = decode_inbound(body).expect("decode").source
        else {
            panic!("expected envelope source");
        };
        assert_eq!(provenance.message_id, "123");
        assert_eq!(provenance.attributes.get("retry").map(String::as_str), Some("1"));
        assert_eq!(provenance.deliver_at(), Some("2026-10-15T08:00:45Z"));
    }

    #[rstest]
    #[case::number(br#"{"message":{"data":42}}"#.as_slice())]
    #[case::object(br#"{"message":{"data":{"id":1}}}"#.as_slice())]
    fn non_string_envelope_data_is_a_decode_error(#[case] body: &[u8]) {
        let error = decode_inbound(body).expect_err("non-string data must fail");
        assert!(matches!(error, DispatchError::Decode { .. }));
    }

    #[test]
    fn envelope_data_holding_an_array_is_a_decode_error() {
        let data = STANDARD.encode(b"[]");
        let body = serde_json::to_vec(&json!({"message": {"data": data}})).expect("serialise");
        let error = decode_inbound(&body).expect_err("array payload must fail");
        assert!(matches!(error, DispatchError::Decode { .. }));
    }

    #[test]
    fn non_object_message_is_treated_as_direct() {
        let decoded = decode_inbound(br#"{"id":9,"message":"hello"}"#).expect("direct decode");
        assert_eq!(decoded.transaction.id, 9);
        assert_eq!(decoded.source.deliver_at(), None);
        assert_eq!(decoded.source, InboundSource::Direct);
    }

    #[test]
    fn message_without_data_key_is_treated_as_direct() {
        let decoded =
            decode_inbound(br#"{"id":8,"message":{"messageId":"1"}}"#).expect("direct decode");
        assert_eq!(decoded.transaction.id, 8);
        assert_eq!(decoded.source, InboundSource::Direct);
    }
}
