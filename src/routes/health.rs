use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app::AppState;
use crate::errors::AppResult;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: &'static str,
    pub kafka_ok: bool,
    pub kafka_error: Option<String>,
}

#[utoipa::path(
    get,
    path = "/admin/health",
    tag = "Health",
    responses((status = 200, description = "Health check", body = HealthResponse))
)]
pub async fn health(State(state): State<AppState>) -> AppResult<Json<HealthResponse>> {
    // Lightweight cluster check
    match state.kafka.cluster_version().await {
        Ok(_) => Ok(Json(HealthResponse { status: "ok", kafka_ok: true, kafka_error: None })),
        Err(e) => Ok(Json(HealthResponse { status: "ok", kafka_ok: false, kafka_error: Some(e.to_string()) })),
    }
}

/// Ready once the router is serving; the license and feature hooks already
/// ran while it was built.
#[utoipa::path(
    get,
    path = "/admin/startup",
    tag = "Health",
    responses((status = 200, description = "Startup probe"))
)]
pub async fn startup() -> StatusCode {
    StatusCode::OK
}
