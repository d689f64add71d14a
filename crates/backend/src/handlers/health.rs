use axum::Json;
use contracts::shared::api_response::HealthStatus;

/// GET /health
pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus::ok())
}
