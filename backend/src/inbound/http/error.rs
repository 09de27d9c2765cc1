//! HTTP adapter mapping for domain errors.
//!
//! Status codes are chosen from [`ErrorCode`]; every error response carries
//! the `trace-id` header when the error captured one.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::error;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// The payload a client sees. Server-side failures keep their curated
/// message and trace id but lose any details.
fn client_view(error: &Error) -> Error {
    match error.code() {
        ErrorCode::InternalError => {
            let view = Error::internal(error.message());
            match error.trace_id() {
                Some(id) => view.with_trace_id(id),
                None => view,
            }
        }
        _ => error.clone(),
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!(
                trace_id = self.trace_id().unwrap_or_default(),
                message = self.message(),
                details = ?self.details(),
                "request failed"
            );
        }
        let mut response = HttpResponse::build(status);
        if let Some(id) = self.trace_id() {
            response.insert_header((TRACE_ID_HEADER, id));
        }
        response.json(client_view(self))
    }
}
