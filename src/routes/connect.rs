use axum::extract::{Path, State};
use axum::Json;

use crate::app::AppState;
use crate::connect::ClusterInfo;
use crate::errors::AppResult;
use crate::hooks::{authorize, HookContext};
use crate::models::connect::{ConnectClusterListItem, GetConnectClustersResponse};

/// Lists the configured clusters the caller can view, without contacting them.
#[utoipa::path(
    get,
    path = "/api/kafka-connect/clusters",
    tag = "Kafka Connect",
    responses((status = 200, description = "Configured connect clusters", body = GetConnectClustersResponse))
)]
pub async fn list_clusters(
    State(state): State<AppState>,
    ctx: HookContext,
) -> AppResult<Json<GetConnectClustersResponse>> {
    let authz = &state.hooks.authorization;

    let mut clusters = Vec::with_capacity(state.connect.clusters().len());
    for cluster in state.connect.clusters() {
        if !ctx.guard(authz.can_view_connect_cluster(&ctx, &cluster.cfg.name)).await? {
            continue;
        }
        let actions = ctx
            .guard(authz.allowed_connect_cluster_actions(&ctx, &cluster.cfg.name))
            .await?;
        clusters.push(ConnectClusterListItem::new(&cluster.cfg.name, &cluster.cfg.url, actions));
    }

    Ok(Json(GetConnectClustersResponse { clusters }))
}

#[utoipa::path(
    get,
    path = "/api/kafka-connect/clusters/{cluster}",
    tag = "Kafka Connect",
    params(("cluster" = String, Path, description = "Configured cluster name")),
    responses(
        (status = 200, description = "Cluster version and plugins", body = ClusterInfo),
        (status = 403, description = "Not allowed to view this cluster"),
        (status = 404, description = "No cluster with this name"),
        (status = 503, description = "Cluster unreachable")
    )
)]
pub async fn get_cluster_info(
    State(state): State<AppState>,
    ctx: HookContext,
    Path(cluster): Path<String>,
) -> AppResult<Json<ClusterInfo>> {
    authorize(
        &ctx,
        &format!("view connect cluster '{cluster}'"),
        state.hooks.authorization.can_view_connect_cluster(&ctx, &cluster),
    )
    .await?;

    let mut info = state.connect.get_cluster_info(&cluster).await?;
    info.enabled_features = state
        .hooks
        .console
        .enabled_connect_cluster_features(&ctx, &cluster)
        .await;

    Ok(Json(info))
}
