use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::app::AppState;
use crate::errors::{AppError, AppResult};
use crate::hooks::{authorize, HookContext};
use crate::models::user::{CreateUserRequest, GetUsersResponse};

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    responses((status = 200, description = "SCRAM users", body = GetUsersResponse))
)]
pub async fn list_users(State(state): State<AppState>, ctx: HookContext) -> AppResult<Json<GetUsersResponse>> {
    authorize(
        &ctx,
        "list Kafka users",
        state.hooks.authorization.can_list_kafka_users(&ctx),
    )
    .await?;

    let users = state.kafka.list_users().await?;
    Ok(Json(GetUsersResponse { users }))
}

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created"),
        (status = 403, description = "Not allowed to create users")
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    ctx: HookContext,
    Json(payload): Json<CreateUserRequest>,
) -> AppResult<StatusCode> {
    authorize(
        &ctx,
        "create Kafka users",
        state.hooks.authorization.can_create_kafka_users(&ctx),
    )
    .await?;

    state.kafka.create_user(&payload).await?;
    tracing::info!(user = %payload.username, mechanism = ?payload.mechanism, "kafka user created");

    Ok(StatusCode::CREATED)
}

/// Protected users are refused before the policy is consulted at all.
#[utoipa::path(
    delete,
    path = "/api/users/{user}",
    tag = "Users",
    params(("user" = String, Path, description = "SCRAM user name")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 403, description = "User is protected or caller lacks permission")
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    ctx: HookContext,
    Path(user): Path<String>,
) -> AppResult<StatusCode> {
    let authz = &state.hooks.authorization;
    if authz.is_protected_kafka_user(&user) {
        tracing::debug!(request_id = %ctx.request_id, user = %user, "refusing to delete protected user");
        return Err(AppError::forbidden(format!(
            "The user '{user}' is protected and cannot be deleted"
        )));
    }

    authorize(&ctx, "delete Kafka users", authz.can_delete_kafka_users(&ctx)).await?;

    state.kafka.delete_user(&user).await?;
    tracing::info!(user = %user, "kafka user deleted");

    Ok(StatusCode::NO_CONTENT)
}
