//! OpenAPI schema definitions for domain types.
//!
//! Domain types do not derive `ToSchema`. The wrappers here mirror their
//! wire shape for documentation only.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// An unexpected error occurred on the server or a downstream broker.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "failed to publish transaction")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` header.
    #[schema(rename = "traceId", example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::Direction`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Direction)]
pub enum DirectionSchema {
    /// Funds credited to the account.
    #[schema(rename = "in")]
    Inbound,
    /// Funds debited from the account.
    #[schema(rename = "out")]
    Outbound,
}

/// OpenAPI schema for [`crate::domain::Transaction`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Transaction)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct TransactionSchema {
    #[schema(example = 1)]
    id: i64,
    direction: Option<DirectionSchema>,
    /// Minor currency units.
    #[schema(example = 100)]
    amount: i64,
    #[schema(example = "John Doe")]
    account_name: String,
    #[schema(example = "1234567890")]
    account_number: Option<String>,
    #[schema(example = "NGN")]
    currency_code: String,
    #[schema(example = "pending")]
    status: Option<String>,
    reference: String,
    bank_name: String,
    bank_code: String,
    narration: String,
}
