use axum::extract::State;
use axum::Json;

use crate::app::AppState;
use crate::errors::{AppError, AppResult};
use crate::hooks::{authorize, HookContext};
use crate::models::topic::{PatchConfigsRequest, PatchConfigsResponse};

const TOPIC_RESOURCE: &str = "topic";

/// Bulk configuration patch across resources.
///
/// Guarded by the cluster level check only; per-topic edit permissions are
/// not consulted here.
#[utoipa::path(
    patch,
    path = "/api/operations/configs",
    tag = "Operations",
    request_body = PatchConfigsRequest,
    responses(
        (status = 200, description = "All resources patched", body = PatchConfigsResponse),
        (status = 400, description = "Unsupported resource type"),
        (status = 404, description = "A named topic does not exist; nothing was patched")
    )
)]
pub async fn patch_configs(
    State(state): State<AppState>,
    ctx: HookContext,
    Json(payload): Json<PatchConfigsRequest>,
) -> AppResult<Json<PatchConfigsResponse>> {
    authorize(&ctx, "patch configs", state.hooks.authorization.can_patch_configs(&ctx)).await?;

    if let Some(other) = payload
        .resources
        .iter()
        .find(|r| !r.resource_type.eq_ignore_ascii_case(TOPIC_RESOURCE))
    {
        return Err(AppError::bad_request(format!(
            "unsupported resource type '{}'",
            other.resource_type
        )));
    }

    // every topic must exist before the first one is altered
    for resource in &payload.resources {
        state.kafka.topic_config(&resource.resource_name).await?;
    }

    for resource in &payload.resources {
        state
            .kafka
            .alter_topic_config(&resource.resource_name, &resource.configs)
            .await?;
    }
    tracing::info!(resources = payload.resources.len(), "configs patched");

    Ok(Json(PatchConfigsResponse {
        patched_resources: payload.resources.len(),
    }))
}
