//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while letting Actix
//! handlers turn domain failures into consistent JSON bodies and status
//! codes. Store failures are logged with their full chain and reported to
//! clients with a generic message.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::{Error, ErrorCode, ErrorPayload};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Message sent instead of the real one for store failures.
pub const REDACTED_MESSAGE: &str = "Internal server error";

/// Status for a known error code.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Duplicated => StatusCode::CONFLICT,
        ErrorCode::Limit => StatusCode::FORBIDDEN,
        ErrorCode::Invalid => StatusCode::BAD_REQUEST,
        ErrorCode::Payment => StatusCode::PAYMENT_REQUIRED,
        ErrorCode::Store => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Status for a numeric code received from elsewhere.
///
/// Codes outside the closed set map to 500.
pub fn status_for_raw(raw: i64) -> StatusCode {
    ErrorCode::from_raw(raw).map_or(StatusCode::INTERNAL_SERVER_ERROR, status_for)
}

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: ErrorCode,
    pub layer: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ErrorPayload>,
}

impl ErrorBody {
    fn redacted(code: ErrorCode, layer: &str) -> Self {
        Self {
            code,
            layer: layer.to_owned(),
            message: REDACTED_MESSAGE.to_owned(),
            data: None,
        }
    }
}

impl From<&Error> for ErrorBody {
    fn from(err: &Error) -> Self {
        if err.code() == ErrorCode::Store {
            return Self::redacted(err.code(), err.layer());
        }
        Self {
            code: err.code(),
            layer: err.layer().to_owned(),
            message: err.message().to_owned(),
            data: err.payload().cloned(),
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if self.code() == ErrorCode::Store {
            error!(error = %self, "store failure surfaced to HTTP client");
        }
        HttpResponse::build(self.status_code()).json(ErrorBody::from(self))
    }
}

#[cfg(test)]
mod tests;
