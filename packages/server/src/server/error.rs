//! HTTP mapping for domain errors.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use tracing::error;

use crate::common::DomainError;

#[derive(Serialize)]
struct ErrorBody {
    status: String,
    reason: String,
    message: String,
    timestamp: String,
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        let (status, reason) = match &self {
            DomainError::NotFound(_) => (StatusCode::NOT_FOUND, "The required object was not found."),
            DomainError::Forbidden(_) => (
                StatusCode::FORBIDDEN,
                "For the requested operation the conditions are not met.",
            ),
            DomainError::Conflict(_) => (
                StatusCode::CONFLICT,
                "Integrity constraint has been violated.",
            ),
            DomainError::StatisticsUnavailable(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "A downstream dependency is unavailable.",
            ),
            DomainError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred.",
            ),
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Internal error: {self:#}");
        }

        let body = ErrorBody {
            status: status
                .canonical_reason()
                .unwrap_or("UNKNOWN")
                .to_uppercase()
                .replace(' ', "_"),
            reason: reason.to_string(),
            message: self.to_string(),
            timestamp: Utc::now().to_rfc3339(),
        };
        (status, Json(body)).into_response()
    }
}
