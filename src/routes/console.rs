use axum::extract::State;
use axum::Json;

use crate::app::AppState;
use crate::compat::{self, EndpointCompatibility, EndpointCompatibilityResponse};
use crate::errors::AppResult;
use crate::hooks::HookContext;

/// Tells the frontend which endpoints it may call and under which license.
#[utoipa::path(
    get,
    path = "/api/console/endpoints",
    tag = "Console",
    responses((status = 200, description = "Endpoint compatibility", body = EndpointCompatibilityResponse))
)]
pub async fn get_endpoint_compatibility(
    State(state): State<AppState>,
    ctx: HookContext,
) -> AppResult<Json<EndpointCompatibilityResponse>> {
    let kafka_version = state.kafka.cluster_version().await?;
    let endpoints = compat::merge(
        compat::baseline(&state.config),
        state.hooks.console.endpoint_compatibility(),
    );
    let license = state.hooks.console.console_license_information(&ctx).await;

    Ok(Json(EndpointCompatibilityResponse {
        endpoint_compatibility: EndpointCompatibility {
            kafka_version,
            endpoints,
        },
        licenses: vec![license],
    }))
}
