use crate::{
    health::{HealthStatus, OverallHealthResponse},
    server::Server,
};
use axum::{Router, extract::State, http::StatusCode, response::Json, routing::get};

/// Run every registered health checker and report the aggregate.
/// Unhealthy components push the whole response to 503 so load
/// balancers can act on the status code alone.
pub async fn health_check(
    State(server): State<Server>,
) -> (StatusCode, Json<OverallHealthResponse>) {
    let response = server.health_service.check_health().await;
    let status = match response.status {
        HealthStatus::Healthy => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };
    (status, Json(response))
}

pub fn create_health_routes() -> Router<Server> {
    Router::new().route("/", get(health_check))
}
