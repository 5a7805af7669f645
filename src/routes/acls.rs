use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::app::AppState;
use crate::errors::AppResult;
use crate::hooks::{authorize, HookContext};
use crate::models::acl::{AclBinding, DeleteAclsRequest, DeleteAclsResponse, GetAclsResponse, QuotaResponse};

#[utoipa::path(
    get,
    path = "/api/acls",
    tag = "ACLs",
    responses((status = 200, description = "ACL bindings", body = GetAclsResponse))
)]
pub async fn list_acls(State(state): State<AppState>, ctx: HookContext) -> AppResult<Json<GetAclsResponse>> {
    authorize(&ctx, "list ACLs", state.hooks.authorization.can_list_acls(&ctx)).await?;

    let acl_resources = state.kafka.list_acls().await?;
    Ok(Json(GetAclsResponse { acl_resources }))
}

#[utoipa::path(
    post,
    path = "/api/acls",
    tag = "ACLs",
    request_body = AclBinding,
    responses((status = 201, description = "ACL created"))
)]
pub async fn create_acl(
    State(state): State<AppState>,
    ctx: HookContext,
    Json(acl): Json<AclBinding>,
) -> AppResult<StatusCode> {
    authorize(&ctx, "create ACLs", state.hooks.authorization.can_create_acl(&ctx)).await?;

    state.kafka.create_acl(&acl).await?;
    tracing::info!(principal = %acl.principal, resource = %acl.resource_name, operation = %acl.operation, "acl created");

    Ok(StatusCode::CREATED)
}

#[utoipa::path(
    delete,
    path = "/api/acls",
    tag = "ACLs",
    request_body = DeleteAclsRequest,
    responses((status = 200, description = "Matching ACLs deleted", body = DeleteAclsResponse))
)]
pub async fn delete_acls(
    State(state): State<AppState>,
    ctx: HookContext,
    Json(filter): Json<DeleteAclsRequest>,
) -> AppResult<Json<DeleteAclsResponse>> {
    authorize(&ctx, "delete ACLs", state.hooks.authorization.can_delete_acl(&ctx)).await?;

    let deleted = state.kafka.delete_acls(&filter).await?;
    tracing::info!(deleted, "acls deleted");

    Ok(Json(DeleteAclsResponse { deleted }))
}

#[utoipa::path(
    get,
    path = "/api/quotas",
    tag = "Quotas",
    responses((status = 200, description = "Client quotas", body = QuotaResponse))
)]
pub async fn list_quotas(State(state): State<AppState>, ctx: HookContext) -> AppResult<Json<QuotaResponse>> {
    authorize(&ctx, "list quotas", state.hooks.authorization.can_list_quotas(&ctx)).await?;

    let items = state.kafka.list_quotas().await?;
    Ok(Json(QuotaResponse { items }))
}
