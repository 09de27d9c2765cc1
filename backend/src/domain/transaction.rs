//! Transaction record carried through dispatch and ingestion.
//!
//! The JSON field set is a wire contract shared with producers and
//! subscribers: `id`, `direction`, `amount`, `account_name`,
//! `account_number`, `currency_code`, `status`, `reference`, `bank_name`,
//! `bank_code` and `narration`. Absent fields decode to their zero value and
//! unknown fields are ignored.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::{Map, Value};

/// Flow of funds relative to the account holder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Funds credited to the account.
    #[serde(rename = "in")]
    Inbound,
    /// Funds debited from the account.
    #[serde(rename = "out")]
    Outbound,
}

impl Direction {
    /// Wire representation of the direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inbound => "in",
            Self::Outbound => "out",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a direction string is neither `in` nor `out`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transaction direction '{value}'; expected in or out")]
pub struct DirectionParseError {
    value: String,
}

impl FromStr for Direction {
    type Err = DirectionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in" => Ok(Self::Inbound),
            "out" => Ok(Self::Outbound),
            other => Err(DirectionParseError {
                value: other.to_owned(),
            }),
        }
    }
}

/// A transaction-like payload being dispatched or ingested.
///
/// `amount` is in minor currency units and may be any signed value; this
/// layer performs no business validation on field values. Identifiers are
/// expected to be unique within a batch but uniqueness is not enforced.
///
/// Only a JSON object decodes into a transaction. Arrays, strings and
/// `null` are rejected rather than read positionally or zero-filled.
///
/// # Examples
/// ```
/// use relay::domain::{Direction, Transaction};
///
/// let tx: Transaction =
///     serde_json::from_str(r#"{"id":2,"amount":200,"direction":"out"}"#).expect("valid JSON");
/// assert_eq!(tx.id, 2);
/// assert_eq!(tx.direction, Some(Direction::Outbound));
/// assert!(tx.account_name.is_empty());
/// assert!(serde_json::from_str::<Transaction>("[]").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Transaction {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    pub amount: i64,
    pub account_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    pub currency_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub reference: String,
    pub bank_name: String,
    pub bank_code: String,
    pub narration: String,
}

/// Wire field set. Absent fields take their zero value and unknown fields
/// are ignored.
#[derive(Default, Deserialize)]
#[serde(default)]
struct WireTransaction {
    id: i64,
    #[serde(deserialize_with = "deserialize_direction")]
    direction: Option<Direction>,
    amount: i64,
    account_name: String,
    account_number: Option<String>,
    currency_code: String,
    status: Option<String>,
    reference: String,
    bank_name: String,
    bank_code: String,
    narration: String,
}

impl From<WireTransaction> for Transaction {
    fn from(wire: WireTransaction) -> Self {
        Self {
            id: wire.id,
            direction: wire.direction,
            amount: wire.amount,
            account_name: wire.account_name,
            account_number: wire.account_number,
            currency_code: wire.currency_code,
            status: wire.status,
            reference: wire.reference,
            bank_name: wire.bank_name,
            bank_code: wire.bank_code,
            narration: wire.narration,
        }
    }
}

impl<'de> Deserialize<'de> for Transaction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // A derived impl also accepts sequences and would zero-fill `[]`.
        let object = Map::<String, Value>::deserialize(deserializer)?;
        serde_json::from_value::<WireTransaction>(Value::Object(object))
            .map(Self::from)
            .map_err(de::Error::custom)
    }
}
