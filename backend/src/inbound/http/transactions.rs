//! Transaction HTTP handlers.
//!
//! ```text
//! GET  /api/v1/transactions
//! GET  /api/v1/transactions/{id}
//! GET  /api/v1/publish?delay=N
//! POST /api/v1/transactions/dispatch
//! POST /api/v1/transactions/poll
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{DecodedTransaction, Error, Transaction};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, TransactionSchema};
use crate::inbound::http::state::HttpState;

const PUBLISHED_MESSAGE: &str = "Transaction published";
const PROCESSED_MESSAGE: &str = "Transaction processed successfully";

/// Query string accepted by `GET /publish`.
#[derive(Debug, Deserialize, IntoParams)]
pub struct PublishQuery {
    /// Delivery delay in seconds; required, non-negative integer.
    #[param(value_type = i64, example = 30)]
    pub delay: Option<String>,
}

/// Request body for dispatching a caller-supplied transaction.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DispatchRequestBody {
    #[schema(value_type = TransactionSchema)]
    pub transaction: Transaction,
    /// Falls back to the configured default delay when omitted.
    #[serde(default)]
    pub delay_seconds: Option<i64>,
}

/// Response returned after a successful dispatch.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct PublishResponse {
    #[schema(example = "Transaction published")]
    pub message: String,
    /// Broker message id or queue task name.
    #[schema(example = "4213867390118")]
    pub id: String,
}

/// Response returned after an inbound push is decoded.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct PollResponse {
    #[schema(example = "Transaction processed successfully")]
    pub message: String,
    #[schema(value_type = TransactionSchema)]
    pub transaction: Transaction,
    /// `envelope` or `direct`.
    #[schema(example = "envelope")]
    pub source: String,
    /// Delivery time the publisher requested through the `deliver_at`
    /// attribute. Absent for direct bodies and immediate publishes.
    #[serde(default, rename = "deliverAt", skip_serializing_if = "Option::is_none")]
    #[schema(example = "2026-10-15T08:00:45Z")]
    pub deliver_at: Option<String>,
}

fn parse_delay(raw: Option<&str>) -> Result<i64, Error> {
    let raw = raw
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            Error::invalid_request("delay query parameter is required")
                .with_details(json!({ "field": "delay" }))
        })?;
    raw.parse::<i64>().map_err(|_| {
        Error::invalid_request(format!("delay must be an integer number of seconds, got '{raw}'"))
            .with_details(json!({ "field": "delay" }))
    })
}

fn parse_id(raw: &str) -> Result<i64, Error> {
    raw.parse::<i64>().map_err(|_| {
        Error::invalid_request(format!("invalid transaction id '{raw}'"))
            .with_details(json!({ "field": "id" }))
    })
}

async fn dispatch(
    state: &HttpState,
    transaction: &Transaction,
    delay_seconds: i64,
) -> ApiResult<web::Json<PublishResponse>> {
    let receipt = state
        .dispatch
        .dispatch_outbound(transaction, delay_seconds)
        .await
        .map_err(Error::from)?;
    Ok(web::Json(PublishResponse {
        message: PUBLISHED_MESSAGE.to_owned(),
        id: receipt.id().to_owned(),
    }))
}

/// List the fixture transactions.
#[utoipa::path(
    get,
    path = "/api/v1/transactions",
    tags = ["transactions"],
    responses(
        (status = 200, description = "All known transactions", body = [TransactionSchema]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    )
)]
#[get("/transactions")]
pub async fn list_transactions(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<Transaction>>> {
    state.catalogue.list().await.map(web::Json)
}

/// Fetch one fixture transaction by id.
#[utoipa::path(
    get,
    path = "/api/v1/transactions/{id}",
    tags = ["transactions"],
    params(("id" = i64, Path, description = "Transaction identifier")),
    responses(
        (status = 200, description = "The transaction", body = TransactionSchema),
        (status = 400, description = "Id is not an integer", body = ErrorSchema),
        (status = 404, description = "No such transaction", body = ErrorSchema)
    )
)]
#[get("/transactions/{id}")]
pub async fn get_transaction(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Transaction>> {
    let id = parse_id(&path)?;
    state
        .catalogue
        .find(id)
        .await?
        .map(web::Json)
        .ok_or_else(|| Error::not_found(format!("transaction {id} not found")))
}

/// Dispatch a randomly chosen fixture transaction.
#[utoipa::path(
    get,
    path = "/api/v1/publish",
    tags = ["transactions"],
    params(PublishQuery),
    responses(
        (status = 200, description = "Transaction dispatched", body = PublishResponse),
        (status = 400, description = "Missing, non-integer or negative delay", body = ErrorSchema),
        (status = 500, description = "Broker or queue failure", body = ErrorSchema)
    )
)]
#[get("/publish")]
pub async fn publish_sample(
    state: web::Data<HttpState>,
    query: web::Query<PublishQuery>,
) -> ApiResult<web::Json<PublishResponse>> {
    let delay_seconds = parse_delay(query.delay.as_deref())?;
    let transaction = state
        .catalogue
        .sample()
        .await?
        .ok_or_else(|| Error::not_found("no transactions available to publish"))?;
    dispatch(&state, &transaction, delay_seconds).await
}

/// Dispatch a caller-supplied transaction.
#[utoipa::path(
    post,
    path = "/api/v1/transactions/dispatch",
    tags = ["transactions"],
    request_body = DispatchRequestBody,
    responses(
        (status = 200, description = "Transaction dispatched", body = PublishResponse),
        (status = 400, description = "Malformed body or negative delay", body = ErrorSchema),
        (status = 500, description = "Broker or queue failure", body = ErrorSchema)
    )
)]
#[post("/transactions/dispatch")]
pub async fn dispatch_transaction(
    state: web::Data<HttpState>,
    body: web::Bytes,
) -> ApiResult<web::Json<PublishResponse>> {
    let request: DispatchRequestBody = serde_json::from_slice(&body)
        .map_err(|err| Error::invalid_request(format!("invalid dispatch request: {err}")))?;
    let delay_seconds = request.delay_seconds.unwrap_or(state.default_delay_seconds);
    dispatch(&state, &request.transaction, delay_seconds).await
}

/// Push endpoint for broker deliveries.
///
/// Accepts a push envelope or bare transaction JSON. Any non-2xx response
/// makes the broker redeliver.
#[utoipa::path(
    post,
    path = "/api/v1/transactions/poll",
    tags = ["transactions"],
    request_body(
        content = String,
        description = "Push envelope or transaction JSON",
        content_type = "application/json"
    ),
    responses(
        (status = 200, description = "Transaction decoded", body = PollResponse),
        (status = 400, description = "Undecodable body or empty envelope", body = ErrorSchema)
    )
)]
#[post("/transactions/poll")]
pub async fn poll_transaction(
    state: web::Data<HttpState>,
    body: web::Bytes,
) -> ApiResult<web::Json<PollResponse>> {
    let DecodedTransaction {
        transaction,
        source,
    } = state.dispatch.ingest_inbound(&body).map_err(|err| {
        warn!(error = %err, body_len = body.len(), "rejected inbound push");
        Error::from(err)
    })?;

    let deliver_at = source.deliver_at().map(str::to_owned);
    info!(
        transaction_id = transaction.id,
        source = source.label(),
        deliver_at = deliver_at.as_deref().unwrap_or_default(),
        "transaction processed"
    );
    Ok(web::Json(PollResponse {
        message: PROCESSED_MESSAGE.to_owned(),
        transaction,
        source: source.label().to_owned(),
        deliver_at,
    }))
}

/// Register every `/api/v1` transaction route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(list_transactions)
        .service(dispatch_transaction)
        .service(poll_transaction)
        .service(get_transaction)
        .service(publish_sample);
}

#[cfg(test)]
#[path = "transactions_tests.rs"]
mod tests;
