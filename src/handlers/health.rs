use crate::errors::ServiceError;
use crate::AppState;
use axum::{extract::State, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

/// Liveness plus a database ping.
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Service and database reachable"),
        (status = 500, description = "Database unreachable", body = crate::errors::ErrorResponse)
    ),
    tag = "health"
)]
pub async fn health(State(state): State<AppState>) -> Result<impl IntoResponse, ServiceError> {
    state.db.ping().await?;
    Ok(Json(json!({
        "status": "ok",
        "database": "reachable",
        "version": env!("CARGO_PKG_VERSION"),
    })))
}
