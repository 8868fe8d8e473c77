use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    storage: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Health check endpoint
///
/// Pings the database when one is configured; the in-memory backend is
/// always healthy. Returns 503 when the database does not answer.
pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    match &state.pool {
        None => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok".to_string(),
                storage: "memory".to_string(),
                error: None,
            }),
        ),
        Some(pool) => match tokio::time::timeout(
            std::time::Duration::from_secs(5),
            sqlx::query("SELECT 1").execute(pool),
        )
        .await
        {
            Ok(Ok(_)) => (
                StatusCode::OK,
                Json(HealthResponse {
                    status: "ok".to_string(),
                    storage: "postgres".to_string(),
                    error: None,
                }),
            ),
            Ok(Err(e)) => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "degraded".to_string(),
                    storage: "postgres".to_string(),
                    error: Some(e.to_string()),
                }),
            ),
            Err(_) => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "degraded".to_string(),
                    storage: "postgres".to_string(),
                    error: Some("database ping timed out".to_string()),
                }),
            ),
        },
    }
}
