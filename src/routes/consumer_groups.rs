use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::app::AppState;
use crate::errors::AppResult;
use crate::hooks::{authorize, HookContext};
use crate::models::consumer_group::{ConsumerGroupListItem, GetConsumerGroupsResponse};

#[utoipa::path(
    get,
    path = "/api/consumer-groups",
    tag = "Consumer Groups",
    responses((status = 200, description = "Visible consumer groups", body = GetConsumerGroupsResponse))
)]
pub async fn list_consumer_groups(
    State(state): State<AppState>,
    ctx: HookContext,
) -> AppResult<Json<GetConsumerGroupsResponse>> {
    let authz = &state.hooks.authorization;
    let groups = state.kafka.list_consumer_groups().await?;

    let mut consumer_groups = Vec::with_capacity(groups.len());
    for group in groups {
        if !ctx.guard(authz.can_see_consumer_group(&ctx, &group.group_id)).await? {
            continue;
        }
        let actions = ctx
            .guard(authz.allowed_consumer_group_actions(&ctx, &group.group_id))
            .await?;
        consumer_groups.push(ConsumerGroupListItem::new(group, actions));
    }

    Ok(Json(GetConsumerGroupsResponse { consumer_groups }))
}

#[utoipa::path(
    delete,
    path = "/api/consumer-groups/{group}",
    tag = "Consumer Groups",
    params(("group" = String, Path, description = "Consumer group id")),
    responses(
        (status = 204, description = "Consumer group deleted"),
        (status = 403, description = "Not allowed to delete this group"),
        (status = 409, description = "Group still has active members")
    )
)]
pub async fn delete_consumer_group(
    State(state): State<AppState>,
    ctx: HookContext,
    Path(group): Path<String>,
) -> AppResult<StatusCode> {
    authorize(
        &ctx,
        &format!("delete consumer group '{group}'"),
        state.hooks.authorization.can_delete_consumer_group(&ctx, &group),
    )
    .await?;

    state.kafka.delete_consumer_group(&group).await?;
    tracing::info!(group = %group, "consumer group deleted");

    Ok(StatusCode::NO_CONTENT)
}
