//! OpenAPI documentation for the REST API.
//!
//! Registers every inbound HTTP path and the schema wrappers from
//! [`crate::inbound::http::schemas`]. Served by Swagger UI in debug,
//! non-prod builds and exported by the `openapi-dump` binary.

use utoipa::OpenApi;

use crate::inbound::http::health::HealthResponse;
use crate::inbound::http::schemas::{
    DirectionSchema, ErrorCodeSchema, ErrorSchema, TransactionSchema,
};
use crate::inbound::http::transactions::{DispatchRequestBody, PollResponse, PublishResponse};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Relay transaction dispatch API",
        description = "Dispatches transactions to a topic or task queue and accepts pushes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::transactions::list_transactions,
        crate::inbound::http::transactions::get_transaction,
        crate::inbound::http::transactions::publish_sample,
        crate::inbound::http::transactions::dispatch_transaction,
        crate::inbound::http::transactions::poll_transaction,
        crate::inbound::http::health::api_health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        TransactionSchema,
        DirectionSchema,
        ErrorSchema,
        ErrorCodeSchema,
        DispatchRequestBody,
        PublishResponse,
        PollResponse,
        HealthResponse,
    )),
    tags(
        (name = "transactions", description = "Dispatch and ingestion of transactions"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
