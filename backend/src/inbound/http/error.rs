//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while giving every
//! handler the same `{ "error": message }` body and status mapping.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode, web};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode, REQUIRED_FIELDS_MESSAGE, TRACE_ID_HEADER};

const INTERNAL_MESSAGE: &str = "Internal server error";
const INVALID_JSON_MESSAGE: &str = "Invalid JSON body";

/// JSON error payload returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    /// Human-readable reason.
    #[schema(example = "User not found")]
    pub error: String,
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest | ErrorCode::Conflict => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn public_message(error: &Error) -> &str {
    if matches!(error.code(), ErrorCode::InternalError) {
        INTERNAL_MESSAGE
    } else {
        error.message()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        builder.json(ErrorBody {
            error: public_message(self).to_owned(),
        })
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Self::internal(INTERNAL_MESSAGE)
    }
}

fn is_empty_body(err: &serde_json::Error) -> bool {
    err.is_eof() && err.line() == 1 && err.column() == 0
}

fn reject_json(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected request body");
    let message = match &err {
        JsonPayloadError::ContentType => REQUIRED_FIELDS_MESSAGE,
        JsonPayloadError::Deserialize(inner) if is_empty_body(inner) => REQUIRED_FIELDS_MESSAGE,
        _ => INVALID_JSON_MESSAGE,
    };
    Error::invalid_request(message).into()
}

/// JSON extractor settings for the API scope.
///
/// A missing body, or one not declared as JSON, carries no fields and is
/// answered with 400 `{ "error": "Name and email are required" }`. A JSON
/// body that fails to deserialise gets 400 `{ "error": "Invalid JSON body" }`.
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(reject_json)
}
