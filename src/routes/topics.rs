use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::app::AppState;
use crate::errors::{AppError, AppResult};
use crate::hooks::{authorize, HookContext};
use crate::models::topic::{
    ConfigEntry, CreateTopicRequest, GetTopicsResponse, PublishRecordRequest, PublishRecordResponse,
    TopicConfigResponse, TopicListItem, TopicSummary,
};

/// Lists the topics the caller can see, each annotated with its allowed actions.
#[utoipa::path(
    get,
    path = "/api/topics",
    tag = "Topics",
    responses(
        (status = 200, description = "Visible topics", body = GetTopicsResponse),
        (status = 503, description = "Authorization backend unavailable")
    )
)]
pub async fn list_topics(State(state): State<AppState>, ctx: HookContext) -> AppResult<Json<GetTopicsResponse>> {
    let authz = &state.hooks.authorization;
    let topics = state.kafka.list_topics().await?;

    let mut visible = Vec::with_capacity(topics.len());
    for topic in topics {
        if !ctx.guard(authz.can_see_topic(&ctx, &topic.topic_name)).await? {
            continue;
        }
        let allowed_actions = ctx.guard(authz.allowed_topic_actions(&ctx, &topic.topic_name)).await?;
        visible.push(TopicListItem { topic, allowed_actions });
    }

    Ok(Json(GetTopicsResponse { topics: visible }))
}

#[utoipa::path(
    post,
    path = "/api/topics",
    tag = "Topics",
    request_body = CreateTopicRequest,
    responses(
        (status = 201, description = "Topic created", body = TopicSummary),
        (status = 400, description = "Invalid topic name or partition count"),
        (status = 403, description = "Not allowed to create this topic"),
        (status = 409, description = "Topic already exists")
    )
)]
pub async fn create_topic(
    State(state): State<AppState>,
    ctx: HookContext,
    Json(payload): Json<CreateTopicRequest>,
) -> AppResult<(StatusCode, Json<TopicSummary>)> {
    // the name the policy sees must be the name that gets created
    let name = payload.topic_name.as_str();
    if name.is_empty() || name.trim() != name {
        return Err(AppError::bad_request(format!(
            "topic name '{name}' must be non-empty without surrounding whitespace"
        )));
    }

    authorize(
        &ctx,
        &format!("create topic '{}'", payload.topic_name),
        state.hooks.authorization.can_create_topic(&ctx, &payload.topic_name),
    )
    .await?;

    let topic = state.kafka.create_topic(&payload).await?;
    tracing::info!(topic = %topic.topic_name, partitions = topic.partition_count, "topic created");

    Ok((StatusCode::CREATED, Json(topic)))
}

#[utoipa::path(
    delete,
    path = "/api/topics/{topic}",
    tag = "Topics",
    params(("topic" = String, Path, description = "Topic name")),
    responses(
        (status = 204, description = "Topic deleted"),
        (status = 403, description = "Not allowed to delete this topic"),
        (status = 404, description = "Topic not found")
    )
)]
pub async fn delete_topic(
    State(state): State<AppState>,
    ctx: HookContext,
    Path(topic): Path<String>,
) -> AppResult<StatusCode> {
    authorize(
        &ctx,
        &format!("delete topic '{topic}'"),
        state.hooks.authorization.can_delete_topic(&ctx, &topic),
    )
    .await?;

    state.kafka.delete_topic(&topic).await?;
    tracing::info!(topic = %topic, "topic deleted");

    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/topics/{topic}/configuration",
    tag = "Topics",
    params(("topic" = String, Path, description = "Topic name")),
    responses((status = 200, description = "Topic configuration", body = TopicConfigResponse))
)]
pub async fn get_topic_config(
    State(state): State<AppState>,
    ctx: HookContext,
    Path(topic): Path<String>,
) -> AppResult<Json<TopicConfigResponse>> {
    authorize(
        &ctx,
        &format!("view the config of topic '{topic}'"),
        state.hooks.authorization.can_view_topic_config(&ctx, &topic),
    )
    .await?;

    let config_entries = state.kafka.topic_config(&topic).await?;
    Ok(Json(TopicConfigResponse {
        topic_name: topic,
        config_entries,
    }))
}

#[utoipa::path(
    patch,
    path = "/api/topics/{topic}/configuration",
    tag = "Topics",
    params(("topic" = String, Path, description = "Topic name")),
    request_body = Vec<ConfigEntry>,
    responses((status = 200, description = "Updated topic configuration", body = TopicConfigResponse))
)]
pub async fn patch_topic_config(
    State(state): State<AppState>,
    ctx: HookContext,
    Path(topic): Path<String>,
    Json(entries): Json<Vec<ConfigEntry>>,
) -> AppResult<Json<TopicConfigResponse>> {
    authorize(
        &ctx,
        &format!("edit the config of topic '{topic}'"),
        state.hooks.authorization.can_edit_topic_config(&ctx, &topic),
    )
    .await?;

    let config_entries = state.kafka.alter_topic_config(&topic, &entries).await?;
    Ok(Json(TopicConfigResponse {
        topic_name: topic,
        config_entries,
    }))
}

#[utoipa::path(
    post,
    path = "/api/topics/{topic}/records",
    tag = "Topics",
    params(("topic" = String, Path, description = "Topic name")),
    request_body = PublishRecordRequest,
    responses((status = 201, description = "Record appended", body = PublishRecordResponse))
)]
pub async fn publish_record(
    State(state): State<AppState>,
    ctx: HookContext,
    Path(topic): Path<String>,
    Json(payload): Json<PublishRecordRequest>,
) -> AppResult<(StatusCode, Json<PublishRecordResponse>)> {
    authorize(
        &ctx,
        &format!("publish records to topic '{topic}'"),
        state.hooks.authorization.can_publish_topic_records(&ctx, &topic),
    )
    .await?;

    let (partition_id, offset) = state.kafka.produce(&topic, &payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(PublishRecordResponse {
            topic_name: topic,
            partition_id,
            offset,
        }),
    ))
}
