//! Domain types and services for transaction dispatch and ingestion.
//!
//! Everything here is transport agnostic. Driven ports live in [`ports`];
//! inbound adapters reach the domain through
//! [`ports::TransactionDispatch`].

mod delay;
mod destination;
mod dispatch;
mod dispatch_error;
mod envelope;
mod error;
pub mod ports;
mod task_submitter;
#[cfg(test)]
pub(crate) mod test_clock;
mod topic_publisher;
mod trace_id;
mod transaction;

pub use self::delay::DeliveryDelay;
pub use self::destination::{QueuePath, TopicName};
pub use self::dispatch::{DispatchBackend, DispatchReceipt, DispatchService};
pub use self::dispatch_error::DispatchError;
pub use self::envelope::{
    DELIVER_AT_ATTRIBUTE, DecodedTransaction, EnvelopeProvenance, InboundSource, decode_inbound,
};
pub use self::error::{Error, ErrorCode, TRACE_ID_HEADER};
pub use self::task_submitter::DeferredTaskSubmitter;
pub use self::topic_publisher::TopicPublisher;
pub use self::trace_id::TraceId;
pub use self::transaction::{Direction, DirectionParseError, Transaction};
