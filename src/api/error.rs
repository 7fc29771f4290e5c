//! Maps domain failures to HTTP responses

use axum::{
    Json,
    extract::{FromRequest, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::domain::DomainError;

#[derive(Debug)]
pub enum ApiError {
    Domain(DomainError),
    /// Request body missing, not JSON, or not the expected shape
    InvalidBody { status: StatusCode, message: String },
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        ApiError::Domain(e)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Domain(DomainError::NotFound) => StatusCode::NOT_FOUND,
            ApiError::Domain(
                DomainError::UniqueConstraintViolation(_)
                | DomainError::ReferentialConstraintViolation(_)
                | DomainError::CopyUnavailable(_)
                | DomainError::LoanAlreadyClosed(_),
            ) => StatusCode::CONFLICT,
            ApiError::Domain(DomainError::StoreUnavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Domain(DomainError::Database(_) | DomainError::Internal(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::InvalidBody { status, .. } => *status,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Domain(e) => e.kind(),
            ApiError::InvalidBody { .. } => "invalid_body",
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Domain(e) => write!(f, "{}", e),
            ApiError::InvalidBody { message, .. } => write!(f, "{}", message),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match status {
            StatusCode::CONFLICT => tracing::warn!("Request rejected: {}", self),
            s if s.is_client_error() => tracing::debug!("Request rejected: {}", self),
            _ => tracing::error!(error.message = %self, "Unexpected error happened"),
        }

        (
            status,
            Json(json!({
                "error": self.to_string(),
                "kind": self.kind(),
            })),
        )
            .into_response()
    }
}

/// `axum::Json` whose rejection uses the API error body
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
