//! Error types for the country lookup service
//!
//! Every failed lookup carries exactly one of these kinds. The HTTP boundary
//! is the only place where kinds are translated into status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, warn};

use crate::models::ErrorResponse;

// == Lookup Error Enum ==
/// Classified failure of a country lookup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    /// Upstream reported that no such country exists
    #[error("Not found: {0}")]
    NotFound(String),

    /// Unexpected upstream status or transport failure
    #[error("Upstream service error: {0}")]
    Upstream(String),

    /// Payload or input failed validation
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Deadline exceeded or call cancelled before completion
    #[error("Request timeout: {0}")]
    Timeout(String),

    /// Anything that does not fit the kinds above
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LookupError {
    /// Status code the HTTP boundary renders for this kind.
    pub fn status_code(&self) -> StatusCode {
        match self {
            LookupError::NotFound(_) => StatusCode::NOT_FOUND,
            LookupError::Upstream(_) => StatusCode::BAD_GATEWAY,
            LookupError::InvalidData(_) => StatusCode::UNPROCESSABLE_ENTITY,
            LookupError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            LookupError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message for this kind. Never includes upstream detail.
    pub fn public_message(&self) -> &'static str {
        match self {
            LookupError::NotFound(_) => "country not found",
            LookupError::Upstream(_) => "upstream service error",
            LookupError::InvalidData(_) => "could not validate country details",
            LookupError::Timeout(_) => "request timeout",
            LookupError::Internal(_) => "unable to get country details",
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for LookupError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Lookup failed with {}: {}", status, self);
        } else {
            warn!("Lookup failed with {}: {}", status, self);
        }
        let body = Json(ErrorResponse::new(self.public_message()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for lookups.
pub type Result<T> = std::result::Result<T, LookupError>;
