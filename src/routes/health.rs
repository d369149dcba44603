use crate::models::responses::HealthResponse;
use axum::response::Json;
use chrono::Utc;

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        service: "bookshop-metrics".to_string(),
        status: "running".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}
